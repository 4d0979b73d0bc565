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

//! Final encoding of a balanced interval sequence.
//!
//! `D_p[i]` and `D_q[i]` are the input and output starts of the `i`-th
//! pair in input order, `D_p[k']` is `n`. `D_idx[i]` is the index of the
//! input interval containing `D_q[i]` and `D_offs[i]` the offset of
//! `D_q[i]` inside it.

use num_traits::cast;
use rayon::prelude::*;
use tracing::debug;

use super::balance::par;
use crate::common::error::{MdsError, Result};
use crate::common::input::{to_u64, Pair, Position};
use crate::common::store::{IntervalStore, Order};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveStructure<P> {
    n: P,
    d_p: Vec<P>,
    d_q: Vec<P>,
    d_idx: Vec<P>,
    d_offs: Vec<P>,
}

impl<P: Position> MoveStructure<P> {
    pub fn n(&self) -> P { self.n }
    /// Number of pairs k'.
    pub fn num_intervals(&self) -> usize { self.d_q.len() }

    pub fn p(&self, i: usize) -> P { self.d_p[i] }
    pub fn q(&self, i: usize) -> P { self.d_q[i] }
    pub fn idx(&self, i: usize) -> P { self.d_idx[i] }
    pub fn offs(&self, i: usize) -> P { self.d_offs[i] }
    pub fn len(&self, i: usize) -> P { self.d_p[i + 1] - self.d_p[i] }

    pub fn d_p(&self) -> &[P] { &self.d_p }
    pub fn d_q(&self) -> &[P] { &self.d_q }
    pub fn d_idx(&self) -> &[P] { &self.d_idx }
    pub fn d_offs(&self) -> &[P] { &self.d_offs }

    pub fn pairs(&self) -> Vec<Pair<P>> {
        self.d_p.iter().zip(&self.d_q).map(|(&p, &q)| Pair::new(p, q)).collect()
    }

    // index of the input interval containing x
    fn interval_of(&self, x: P) -> usize {
        self.d_p[..self.num_intervals()].partition_point(|&p| p <= x) - 1
    }

    /// Image of `x` under the encoded permutation.
    pub fn map(&self, x: P) -> P {
        let i = self.interval_of(x);
        self.d_q[i] + (x - self.d_p[i])
    }

    /// Input starts inside output interval `j`.
    pub fn in_degree(&self, j: usize) -> usize {
        let starts = &self.d_p[..self.num_intervals()];
        let lo = self.d_q[j];
        let hi = lo + self.len(j);
        starts.partition_point(|&p| p < hi) - starts.partition_point(|&p| p < lo)
    }

    pub fn max_in_degree(&self) -> usize {
        (0..self.num_intervals()).into_par_iter().map(|j| self.in_degree(j)).max().unwrap_or(0)
    }

    pub fn max_length(&self) -> P {
        (0..self.num_intervals()).into_par_iter().map(|i| self.len(i)).max().unwrap_or_else(P::zero)
    }
}

fn index<P: Position>(i: usize) -> Result<P> {
    cast(i).ok_or(MdsError::PositionOverflow)
}

/// Encodes a store holding every pair in both orders. Ranks from one list
/// walk, then the tree walk and `D_p` are merged with two pointers.
pub fn encode_store<P: Position>(store: &IntervalStore<P>) -> Result<MoveStructure<P>> {
    let k = store.list().len();
    let n = store.end();
    let mut d_p = Vec::with_capacity(k + 1);
    let mut d_q = Vec::with_capacity(k);
    let mut rank = vec![usize::MAX; store.num_nodes()];
    for (i, id) in store.input_iter().enumerate() {
        d_p.push(store.p(id));
        d_q.push(store.q(id));
        rank[id] = i;
    }
    d_p.push(n);

    let mut d_idx = vec![P::zero(); k];
    let mut d_offs = vec![P::zero(); k];
    if let Some(min) = store.tree().min(store.nodes()) {
        let mut cur = store.cursor(min, Order::Output);
        let mut i = 0;
        loop {
            let j = cur.current();
            let q = store.q(j);
            while d_p[i + 1] <= q { i += 1; }
            let r = rank[j];
            if r == usize::MAX { return Err(MdsError::NotAPermutation { at: to_u64(q) }); }
            d_idx[r] = index(i)?;
            d_offs[r] = q - d_p[i];
            if cur.move_next().is_none() { break; }
        }
    }
    debug!(k, "encoded store");
    Ok(MoveStructure { n, d_p, d_q, d_idx, d_offs })
}

/// Encodes p-ordered pairs over `[0, n)`, locating each output start by
/// binary search in parallel.
pub fn encode_pairs<P: Position>(pairs: Vec<Pair<P>>, n: P) -> Result<MoveStructure<P>> {
    let k = pairs.len();
    index::<P>(k)?;
    let mut d_p: Vec<P> = Vec::with_capacity(k + 1);
    pairs.par_iter().map(|v| v.p).collect_into_vec(&mut d_p);
    d_p.push(n);
    let d_q: Vec<P> = pairs.par_iter().map(|v| v.q).collect();
    drop(pairs);

    let located: Vec<(P, P)> = d_q.par_iter().map(|&q| {
        let i = parlay::max_leq(&d_p[..k], q).ok_or(MdsError::NotAPermutation { at: to_u64(q) })?;
        Ok((index(i)?, q - d_p[i]))
    }).collect::<Result<_>>()?;
    let (d_idx, d_offs): (Vec<P>, Vec<P>) = located.into_par_iter().unzip();

    debug!(k, "encoded pairs");
    Ok(MoveStructure { n, d_p, d_q, d_idx, d_offs })
}

/// Encodes the stores of the parallel balancer, concatenated in range order.
pub fn encode_workers<P: Position>(stores: &[IntervalStore<P>], a: usize) -> Result<MoveStructure<P>> {
    let n = stores.last().map(|s| s.end()).ok_or(MdsError::EmptyInput)?;
    encode_pairs(par::into_pairs(stores, a), n)
}
