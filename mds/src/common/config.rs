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

use std::thread::available_parallelism;

use super::error::{MdsError, Result};
use super::input::Position;

/// Default balancing parameter.
pub const DEFAULT_BALANCING: usize = 8;

/// Tuning knobs of a construction.
///
/// `a` bounds the in-degree of every output interval by `2a - 1`;
/// `workers` is the number of threads of the parallel balancer (1 runs the
/// sequential one).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceConfig {
    pub a: usize,
    pub workers: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self { Self { a: DEFAULT_BALANCING, workers: 1 } }
}

impl BalanceConfig {
    pub fn new(a: usize, workers: usize) -> Self { Self { a, workers } }

    /// Largest worker count accepted for a domain of size `n`.
    pub fn max_workers<P: Position>(n: P) -> usize {
        let cores = available_parallelism().map_or(1, |c| c.get());
        n.to_usize().map_or(cores, |n| n.min(cores))
    }

    pub fn validate<P: Position>(&self, n: P) -> Result<()> {
        if self.a < 2 {
            return Err(MdsError::BalancingParameter { a: self.a });
        }
        let max = Self::max_workers(n);
        if self.workers == 0 || self.workers > max {
            return Err(MdsError::WorkerCount { workers: self.workers, max });
        }
        Ok(())
    }
}
