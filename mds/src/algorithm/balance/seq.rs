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

use tracing::{debug, info_span};

use super::{BalanceStats, Balancer, Local};
use crate::common::input::Position;
use crate::common::store::IntervalStore;


/// Balances `store` in place so that no output interval holds more than
/// `2a - 1` input starts. `a >= 2`.
pub fn balance<P: Position>(store: &mut IntervalStore<P>, a: usize) -> BalanceStats {
    let _span = info_span!("balance_seq", a, k = store.list().len()).entered();

    let mut bal = Balancer::new(store, Local, a);
    bal.sweep();
    let splits = bal.splits;

    debug!(splits, k = store.list().len(), "sweep done");
    BalanceStats { splits, ..Default::default() }
}
