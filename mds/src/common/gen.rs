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

//! Random run permutations for benchmarks and tests.

use std::collections::HashSet;

use num_traits::cast;
use parlay::random::Random;

use super::input::{Pair, Position};

/// A permutation of `[0, n)` made of `k` runs: the domain is cut at `k - 1`
/// random points and the pieces are laid out again in shuffled order.
/// Returns the pairs sorted by `p`. `k` is clamped to `[1, n]`.
pub fn random_runs<P: Position>(n: P, k: usize, seed: u64) -> Vec<Pair<P>> {
    let n64 = n.to_u64().unwrap_or(u64::MAX);
    let k = k.min(n64.min(usize::MAX as u64) as usize).max(1);
    let rnd = Random::new(seed);

    let mut cuts = HashSet::with_capacity(k);
    cuts.insert(0u64);
    let mut i = 0;
    while cuts.len() < k {
        cuts.insert(1 + rnd.ith_below(i, n64 - 1));
        i += 1;
    }
    let mut starts: Vec<u64> = cuts.into_iter().collect();
    starts.sort_unstable();

    let mut order: Vec<usize> = (0..k).collect();
    rnd.fork(1).shuffle(&mut order);

    let mut q = vec![0u64; k];
    let mut acc = 0;
    for &i in &order {
        q[i] = acc;
        acc += if i + 1 < k { starts[i + 1] } else { n64 } - starts[i];
    }

    starts.iter().zip(q)
        .map(|(&p, q)| Pair::new(cast(p).unwrap_or_else(P::zero), cast(q).unwrap_or_else(P::zero)))
        .collect()
}
