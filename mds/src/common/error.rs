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

//! Construction errors.
//!
//! Every variant is a precondition violation detected before balancing
//! starts, except `WorkerPanicked`. Construction is not transactional, so
//! there is nothing to roll back and nothing to retry.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MdsError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MdsError {
    #[error("no run pairs given (k = 0)")]
    EmptyInput,

    #[error("domain size n must be positive")]
    EmptyDomain,

    #[error("the first pair must start at position 0, found {p}")]
    FirstPairNotAtZero { p: u64 },

    #[error("pairs are not strictly increasing by p at index {index}")]
    UnsortedPairs { index: usize },

    #[error("pair {index} holds position {value} outside [0, {n})")]
    PositionOutOfRange { index: usize, value: u64, n: u64 },

    #[error("output intervals do not partition the domain (gap or overlap at {at})")]
    NotAPermutation { at: u64 },

    #[error("balancing parameter a = {a} must be at least 2")]
    BalancingParameter { a: usize },

    #[error("worker count {workers} must lie in [1, {max}]")]
    WorkerCount { workers: usize, max: usize },

    #[error("length bound l_max must be positive")]
    LengthBound,

    #[error("a position or index does not fit the position type")]
    PositionOverflow,

    #[error("worker thread {worker} panicked")]
    WorkerPanicked { worker: usize },
}
