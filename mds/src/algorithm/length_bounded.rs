// ============================================================================
// This code is part of Rusty-PBBS.
// ----------------------------------------------------------------------------
// MIT License
// 
// Copyright (c) 2023-present Javad Abdi, Mark C. Jeffrey
// 
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
// 
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
// 
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
// ============================================================================

//! Construction bounding interval lengths instead of in-degrees.
//!
//! Every pair longer than `l_max` is cut into pieces of length `l_max`
//! (the last one possibly shorter). No balancing takes place.

use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::common::error::{MdsError, Result};
use crate::common::input::{interval_len, validate, Pair, Position};
use crate::common::list::LinkedList;
use crate::common::store::{IntervalStore, NodeId};

/// Builds the store of `pairs` over `[0, n)` with every interval cut to
/// at most `l_max`. Consumes the pairs.
pub fn construct<P: Position>(pairs: Vec<Pair<P>>, n: P, l_max: P) -> Result<IntervalStore<P>> {
    validate(&pairs, n)?;
    construct_unchecked(pairs, n, l_max)
}

pub(crate) fn construct_unchecked<P: Position>(pairs: Vec<Pair<P>>, n: P, l_max: P) -> Result<IntervalStore<P>> {
    if l_max.is_zero() { return Err(MdsError::LengthBound); }
    let k = pairs.len();
    let _span = info_span!("length_bounded", k).entered();

    let mut store = IntervalStore::with_capacity(P::zero(), n, k);
    for &v in &pairs { store.alloc(v); }
    let mut by_q: Vec<NodeId> = (0..k).collect();
    by_q.par_sort_unstable_by_key(|&i| pairs[i].q);
    store.build_tree(&by_q);
    drop(by_q);

    for (i, &v) in pairs.iter().enumerate() {
        let end = v.p + interval_len(&pairs, i, n);
        let mut chain = LinkedList::new();
        chain.push_back(&mut store.nodes, i);

        let (mut cur, mut start) = (i, v.p);
        while end - start > l_max {
            start = start + l_max;
            let piece = store.alloc(Pair::new(start, v.q + (start - v.p)));
            store.insert_node_in(piece, cur);
            chain.push_back(&mut store.nodes, piece);
            cur = piece;
        }
        store.list.concat(&mut store.nodes, &mut chain);
    }
    drop(pairs);

    debug!(k, k_out = store.list().len(), "cut to length bound");
    Ok(store)
}
