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

use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{PrimInt, Unsigned};
use rayon::prelude::*;

use super::error::{MdsError, Result};


/// Unsigned integer type used for positions, lengths and interval indices.
pub trait Position: PrimInt + Unsigned + Hash + Default + Debug + Send + Sync + 'static {}

impl<T> Position for T
where T: PrimInt + Unsigned + Hash + Default + Debug + Send + Sync + 'static {}

/// Starts of an input interval `[p, p + d)` and of the output interval
/// `[q, q + d)` it is shifted onto. `d` is implied by the next pair in
/// p-order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair<P> {
    pub p: P,
    pub q: P,
}

impl<P> Pair<P> {
    pub fn new(p: P, q: P) -> Self { Self { p, q } }
}

impl<P> From<(P, P)> for Pair<P> {
    fn from((p, q): (P, P)) -> Self { Self { p, q } }
}

#[inline]
pub(crate) fn to_u64<P: Position>(x: P) -> u64 {
    x.to_u64().unwrap_or(u64::MAX)
}

/// Length of the `i`-th interval of a p-sorted pair sequence over `[0, n)`.
#[inline]
pub fn interval_len<P: Position>(pairs: &[Pair<P>], i: usize, n: P) -> P {
    let end = if i + 1 < pairs.len() { pairs[i + 1].p } else { n };
    end - pairs[i].p
}

/// Checks that `pairs` describe a permutation of `[0, n)`: p-sorted,
/// starting at 0, inside the domain, and with output intervals that
/// partition the domain.
pub fn validate<P: Position>(pairs: &[Pair<P>], n: P) -> Result<()> {
    if n.is_zero() { return Err(MdsError::EmptyDomain); }
    let k = pairs.len();
    if k == 0 { return Err(MdsError::EmptyInput); }
    if !pairs[0].p.is_zero() {
        return Err(MdsError::FirstPairNotAtZero { p: to_u64(pairs[0].p) });
    }

    if let Some(index) = pairs.par_iter().position_first(|v| v.p >= n || v.q >= n) {
        let v = pairs[index];
        let value = if v.p >= n { v.p } else { v.q };
        return Err(MdsError::PositionOutOfRange { index, value: to_u64(value), n: to_u64(n) });
    }

    if let Some(i) = (1..k).into_par_iter().position_first(|i| pairs[i - 1].p >= pairs[i].p) {
        return Err(MdsError::UnsortedPairs { index: i + 1 });
    }

    // walking the output intervals by q must tile [0, n) without gaps
    let mut by_q: Vec<usize> = (0..k).collect();
    by_q.par_sort_unstable_by_key(|&i| pairs[i].q);

    let mut expected = P::zero();
    for &i in &by_q {
        if pairs[i].q != expected {
            return Err(MdsError::NotAPermutation { at: to_u64(expected.min(pairs[i].q)) });
        }
        expected = expected + interval_len(pairs, i, n);
    }
    debug_assert!(expected == n);
    Ok(())
}
