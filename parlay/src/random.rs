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

use crate::utilities::hash64;

/// Counter-based random source: `ith_rand(i)` depends only on the seed and
/// `i`, so generated inputs are reproducible regardless of thread count.
#[derive(Clone, Copy, Debug)]
pub struct Random {
    state: u64,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn fork(&self, i: u64) -> Self {
        Self::new(hash64(hash64(i.wrapping_add(self.state))))
    }

    pub fn ith_rand(&self, i: u64) -> u64 {
        hash64(i.wrapping_add(self.state))
    }

    /// `i`-th value drawn uniformly enough from `[0, bound)`; `bound > 0`.
    pub fn ith_below(&self, i: u64, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        ((self.ith_rand(i) as u128 * bound as u128) >> 64) as u64
    }

    /// Fisher-Yates shuffle driven by `ith_below`.
    pub fn shuffle<T>(&self, v: &mut [T]) {
        for i in (1..v.len()).rev() {
            let j = self.ith_below(i as u64, i as u64 + 1) as usize;
            v.swap(i, j);
        }
    }
}
