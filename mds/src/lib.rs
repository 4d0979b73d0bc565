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

//! Construction of move data structures.
//!
//! A permutation of `[0, n)` given as `k` runs is encoded so that a move
//! step costs O(1): the runs are split until no output interval holds more
//! than `2a - 1` input interval starts (or, alternatively, until no
//! interval is longer than a bound), then written out as the arrays
//! `D_p`, `D_q`, `D_idx` and `D_offs`.

pub mod algorithm;
pub mod builder;
pub mod common;

pub use algorithm::balance::BalanceStats;
pub use algorithm::encode::MoveStructure;
pub use builder::MdsBuilder;
pub use common::config::BalanceConfig;
pub use common::error::{MdsError, Result};
pub use common::input::{Pair, Position};
