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

use parlay::Timer;
use tracing::info;

use crate::algorithm::balance::{par, seq, BalanceStats};
use crate::algorithm::encode::{encode_pairs, encode_store, encode_workers, MoveStructure};
use crate::algorithm::length_bounded;
use crate::common::config::BalanceConfig;
use crate::common::error::Result;
use crate::common::input::{validate, Pair, Position};
use crate::common::store::IntervalStore;

/// Entry point of a construction.
///
/// ```no_run
/// use mds::{MdsBuilder, Pair};
///
/// let pairs = vec![Pair::new(0u32, 13), Pair::new(7, 0), Pair::new(14, 7)];
/// let mds = MdsBuilder::new(pairs, 20).with_balancing(2).build()?;
/// assert_eq!(mds.num_intervals(), 3);
/// # Ok::<(), mds::MdsError>(())
/// ```
#[derive(Clone, Debug)]
pub struct MdsBuilder<P> {
    pairs: Vec<Pair<P>>,
    n: P,
    config: BalanceConfig,
}

impl<P: Position> MdsBuilder<P> {
    /// `pairs` sorted by `p`, describing a permutation of `[0, n)`.
    pub fn new(pairs: Vec<Pair<P>>, n: P) -> Self {
        Self { pairs, n, config: BalanceConfig::default() }
    }

    pub fn with_balancing(mut self, a: usize) -> Self {
        self.config.a = a;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn with_config(mut self, config: BalanceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BalanceConfig { &self.config }

    /// Balances and encodes.
    pub fn build(self) -> Result<MoveStructure<P>> {
        self.build_with_stats().map(|(mds, _)| mds)
    }

    pub fn build_with_stats(self) -> Result<(MoveStructure<P>, BalanceStats)> {
        let Self { pairs, n, config } = self;
        validate(&pairs, n)?;
        config.validate(n)?;

        let k = pairs.len();
        info!(k, a = config.a, workers = config.workers, "building move data structure");
        let mut t = Timer::started("mds");

        let (mds, stats) = if config.workers == 1 {
            let mut store = IntervalStore::from_pairs_unchecked(&pairs, n);
            drop(pairs);
            t.next("build store");
            let stats = seq::balance(&mut store, config.a);
            t.next("balance");
            (encode_store(&store)?, stats)
        } else {
            let (stores, stats) = par::balance_unchecked(&pairs, n, &config)?;
            drop(pairs);
            t.next("balance");
            (encode_workers(&stores, config.a)?, stats)
        };
        t.next("encode");
        t.total();

        info!(k_out = mds.num_intervals(), splits = stats.splits, secs = t.total_time().as_secs_f64(), "done");
        Ok((mds, stats))
    }

    /// Cuts every interval to length at most `l_max` instead of balancing.
    /// Only `n` and the pairs are used from the builder.
    pub fn build_length_bounded(self, l_max: P) -> Result<MoveStructure<P>> {
        validate(&self.pairs, self.n)?;
        let k = self.pairs.len();
        let mut t = Timer::started("mds");

        let store = length_bounded::construct_unchecked(self.pairs, self.n, l_max)?;
        t.next("cut");
        let mds = encode_store(&store)?;
        t.next("encode");
        t.total();

        info!(k, k_out = mds.num_intervals(), secs = t.total_time().as_secs_f64(), "done");
        Ok(mds)
    }

    /// Encodes the pairs as given, without balancing.
    pub fn build_unbalanced(self) -> Result<MoveStructure<P>> {
        validate(&self.pairs, self.n)?;
        encode_pairs(self.pairs, self.n)
    }
}
