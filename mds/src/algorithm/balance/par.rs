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

//! Parallel balancing with a fixed pool of workers.
//!
//! The domain `[0, n)` is cut into `p` ranges. Worker `t` keeps the input
//! starts in its range in a list and the output starts in its range in a
//! tree. A split always happens in the tree of the worker owning the output
//! interval, but the new input start may belong to someone else; such
//! starts travel as messages. Messages are exchanged in rounds separated
//! by barriers until a round moves none.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Barrier;
use std::thread;

use num_traits::cast;
use rayon::prelude::*;
use tracing::{debug, debug_span, info, info_span, trace, warn};

use super::{BalanceStats, Balancer, SplitRouter};
use crate::common::config::BalanceConfig;
use crate::common::error::{MdsError, Result};
use crate::common::input::{interval_len, validate, Pair, Position};
use crate::common::store::{IntervalStore, NodeId, NIL};

/// A new input start for the worker owning `pair.p`. `after` is the
/// sequence number of the list record it has to follow.
#[derive(Clone, Copy, Debug)]
struct Message<P> {
    pair: Pair<P>,
    after: usize,
}

type Batch<P> = Vec<Message<P>>;

/// Range boundaries `s[0..=p]` with `s[t] = floor(t * n / p)`.
pub fn boundaries<P: Position>(n: P, p: usize) -> Result<Vec<P>> {
    let n = n.to_u128().ok_or(MdsError::PositionOverflow)?;
    (0..=p)
        .map(|t| cast(n * t as u128 / p as u128).ok_or(MdsError::PositionOverflow))
        .collect()
}

/// Worker owning position `x`.
pub fn owner<P: Position>(bounds: &[P], x: P) -> usize {
    parlay::max_leq(&bounds[..bounds.len() - 1], x).unwrap_or(0)
}

// offsets of the boundaries strictly inside [start, start + d)
fn cuts_in<P: Position>(inner: &[P], start: P, d: P) -> impl Iterator<Item = P> + '_ {
    let lo = inner.partition_point(|&s| s <= start);
    let hi = inner.partition_point(|&s| s < start + d);
    inner[lo..hi].iter().map(move |&s| s - start)
}

/// Cuts pairs so that neither an input nor an output interval crosses a
/// range boundary. The permutation is unchanged.
pub fn presplit<P: Position>(pairs: &[Pair<P>], n: P, bounds: &[P]) -> Vec<Pair<P>> {
    let inner = &bounds[1..bounds.len() - 1];
    pairs.par_iter().enumerate().flat_map_iter(|(i, &v)| {
        let d = interval_len(pairs, i, n);
        let mut cuts: Vec<P> = cuts_in(inner, v.p, d).chain(cuts_in(inner, v.q, d)).collect();
        cuts.sort_unstable();
        cuts.dedup();
        std::iter::once(v).chain(cuts.into_iter().map(move |x| Pair::new(v.p + x, v.q + x)))
    }).collect()
}

/// Joins the pairs flagged in `cut` back onto their predecessor where it
/// continues into them and the joined output interval still holds at most
/// `2a - 1` input starts. Unflagged pairs are always kept.
pub fn coalesce<P: Position>(pairs: Vec<Pair<P>>, cut: &[bool], n: P, a: usize) -> Vec<Pair<P>> {
    debug_assert_eq!(pairs.len(), cut.len());
    let starts: Vec<P> = pairs.iter().map(|v| v.p).collect();
    let mut removed: Vec<P> = vec![];
    let in_degree = |lo: P, hi: P, removed: &[P]| {
        let all = starts.partition_point(|&x| x < hi) - starts.partition_point(|&x| x < lo);
        all - removed.iter().filter(|&&x| lo <= x && x < hi).count()
    };

    let mut out: Vec<Pair<P>> = Vec::with_capacity(pairs.len());
    for (i, &v) in pairs.iter().enumerate() {
        if let Some(last) = out.last() {
            let len = v.p - last.p;
            if cut[i] && last.q + len == v.q {
                let hi = v.q + interval_len(&pairs, i, n);
                let own = usize::from(last.q <= v.p && v.p < hi);
                if in_degree(last.q, hi, &removed) - own < a.saturating_mul(2) {
                    removed.push(v.p);
                    continue;
                }
            }
        }
        out.push(v);
    }
    out
}

/// Pairs of all workers in input order, with boundary cuts undone.
pub fn into_pairs<P: Position>(stores: &[IntervalStore<P>], a: usize) -> Vec<Pair<P>> {
    let Some(last) = stores.last() else { return vec![] };
    let n = last.end();
    let (pairs, cut): (Vec<Pair<P>>, Vec<bool>) = stores.iter()
        .flat_map(|s| s.input_iter().map(move |id| (s.pair(id), s.node(id).cut)))
        .unzip();
    coalesce(pairs, &cut, n, a)
}

struct Worker<P> {
    id: usize,
    store: IntervalStore<P>,
    // per source worker: list records in sequence number order
    resolve: Vec<Vec<NodeId>>,
    next_seq: Vec<usize>,
}

/// Builds every worker's store from the pre-split pairs. `cut` flags the
/// pieces whose start was made by `presplit`.
fn distribute<P: Position>(pieces: &[Pair<P>], cut: &[bool], bounds: &[P]) -> Vec<Worker<P>> {
    let p = bounds.len() - 1;
    let m = pieces.len();
    let own_p: Vec<usize> = pieces.par_iter().map(|v| owner(bounds, v.p)).collect();
    let own_q: Vec<usize> = pieces.par_iter().map(|v| owner(bounds, v.q)).collect();

    // sequence numbers of cross pairs, per (owner of q, owner of p), in p order
    let mut next_seq = vec![vec![0usize; p]; p];
    let seq: Vec<usize> = (0..m).map(|i| {
        if own_p[i] == own_q[i] { return NIL; }
        let c = &mut next_seq[own_q[i]][own_p[i]];
        *c += 1;
        *c - 1
    }).collect();

    let mut by_q: Vec<usize> = (0..m).collect();
    by_q.par_sort_unstable_by_key(|&i| pieces[i].q);

    let list_lo = |t: usize| if t == p { m } else { pieces.partition_point(|v| v.p < bounds[t]) };
    let tree_lo = |t: usize| if t == p { m } else { by_q.partition_point(|&i| pieces[i].q < bounds[t]) };

    next_seq.into_par_iter().enumerate().map(|(t, next_seq)| {
        let (l0, l1) = (list_lo(t), list_lo(t + 1));
        let (t0, t1) = (tree_lo(t), tree_lo(t + 1));
        let mut store = IntervalStore::with_capacity(bounds[t], bounds[t + 1], (l1 - l0) + (t1 - t0));
        let mut resolve = vec![vec![]; p];

        for i in l0..l1 {
            let id = store.alloc(pieces[i]);
            store.push_back(id);
            if cut[i] { store.mark_cut(id); }
            if own_q[i] != t { resolve[own_q[i]].push(id); }
        }
        let tree: Vec<NodeId> = by_q[t0..t1].iter().map(|&i| {
            if own_p[i] == t { return i - l0; }
            let id = store.alloc(pieces[i]);
            store.set_twin(id, seq[i]);
            id
        }).collect();
        store.build_tree(&tree);

        Worker { id: t, store, resolve, next_seq }
    }).collect()
}

/// Staging area for outgoing messages, flushed once per round.
struct Outbox<'a, P> {
    bounds: &'a [P],
    next_seq: Vec<usize>,
    staged: Vec<Batch<P>>,
}

impl<P: Position> SplitRouter<P> for Outbox<'_, P> {
    fn link_input(&mut self, store: &mut IntervalStore<P>, new: NodeId, j: NodeId) -> bool {
        let b = store.p(new);
        if store.start() <= b && b < store.end() {
            store.insert_after(new, j);
            return true;
        }
        let dst = owner(self.bounds, b);
        let after = store.node(j).twin;
        debug_assert!(after != NIL, "remote start split off a local pair");

        let seq = self.next_seq[dst];
        self.next_seq[dst] += 1;
        store.set_twin(new, seq);
        self.staged[dst].push(Message { pair: store.pair(new), after });
        false
    }
}

impl<P: Position> Outbox<'_, P> {
    // one batch per destination, even when empty, so receivers never block
    fn flush(&mut self, tx: &[Option<Sender<Batch<P>>>]) -> Result<usize> {
        let mut sent = 0;
        for (dst, tx) in tx.iter().enumerate() {
            let Some(tx) = tx else { continue };
            let batch = std::mem::take(&mut self.staged[dst]);
            sent += batch.len();
            tx.send(batch).map_err(|_| MdsError::WorkerPanicked { worker: dst })?;
        }
        Ok(sent)
    }
}

struct Links<P> {
    tx: Vec<Option<Sender<Batch<P>>>>,
    rx: Vec<Option<Receiver<Batch<P>>>>,
}

struct Rendezvous {
    barrier: Barrier,
    sent: AtomicUsize,
    // lowest id of a failed worker, NIL while there is none
    failed: AtomicUsize,
}

impl Rendezvous {
    fn new(p: usize) -> Self {
        Self { barrier: Barrier::new(p), sent: AtomicUsize::new(0), failed: AtomicUsize::new(NIL) }
    }
}

impl<P: Position> Worker<P> {
    // A failed worker keeps meeting the others at both barriers until all
    // of them have read the failure flag, so nobody waits on it forever.
    fn run(self, a: usize, bounds: &[P], links: Links<P>, sync: &Rendezvous) -> Result<(IntervalStore<P>, BalanceStats)> {
        let Worker { id, mut store, mut resolve, next_seq } = self;
        let _span = debug_span!("worker", id).entered();

        let p = bounds.len() - 1;
        let outbox = Outbox { bounds, next_seq, staged: vec![vec![]; p] };
        let mut bal = Balancer::new(&mut store, outbox, a);
        let mut healthy = catch_unwind(AssertUnwindSafe(|| bal.sweep())).is_ok();
        debug!(splits = bal.splits, healthy, "local sweep done");

        let mut stats = BalanceStats::default();
        let mut seen = 0;
        loop {
            if healthy {
                match bal.router.flush(&links.tx) {
                    Ok(sent) => {
                        stats.messages += sent;
                        sync.sent.fetch_add(sent, Ordering::AcqRel);
                    }
                    Err(_) => healthy = false,
                }
            }
            if !healthy {
                sync.failed.fetch_min(id, Ordering::AcqRel);
            }
            sync.barrier.wait();
            let total = sync.sent.load(Ordering::Acquire);
            let failed = sync.failed.load(Ordering::Acquire);
            sync.barrier.wait();
            if failed != NIL {
                warn!(failed, "giving up after a worker failure");
                return Err(MdsError::WorkerPanicked { worker: failed });
            }
            if total == seen { break; }
            seen = total;
            stats.rounds += 1;

            // every worker flushed this round, so no receive blocks for good
            let round = stats.rounds;
            healthy = catch_unwind(AssertUnwindSafe(|| {
                let mut received = 0;
                for (src, rx) in links.rx.iter().enumerate() {
                    let Some(rx) = rx else { continue };
                    let Ok(batch) = rx.recv() else { return false };
                    received += batch.len();
                    for m in batch {
                        receive(&mut bal, &mut resolve[src], m);
                    }
                }
                trace!(round, received, "round done");
                true
            })).unwrap_or(false);
        }
        stats.splits = bal.splits;
        drop(bal);
        debug!(rounds = stats.rounds, messages = stats.messages, k = store.list().len(), "worker done");
        Ok((store, stats))
    }
}

// links a received start and rebalances the output interval it lands in
fn receive<P: Position>(bal: &mut Balancer<'_, P, Outbox<'_, P>>, resolve: &mut Vec<NodeId>, m: Message<P>) {
    let store = bal.store();
    let at = resolve[m.after];
    let id = store.alloc(m.pair);
    store.insert_after(id, at);
    resolve.push(id);

    let end = store.end();
    if let Some((s, y)) = bal.heavy_around(id) {
        let mut c = 0;
        bal.balance_upto(s, y, end, end, &mut c);
    }
}

/// Balances `pairs` over `[0, n)` with `cfg.workers` threads. Returns the
/// worker stores in range order; their lists concatenated are the
/// balanced pairs. Pairs that do not describe a permutation of `[0, n)`
/// are rejected before any work starts.
pub fn balance<P: Position>(pairs: &[Pair<P>], n: P, cfg: &BalanceConfig) -> Result<(Vec<IntervalStore<P>>, BalanceStats)> {
    validate(pairs, n)?;
    balance_unchecked(pairs, n, cfg)
}

pub(crate) fn balance_unchecked<P: Position>(pairs: &[Pair<P>], n: P, cfg: &BalanceConfig) -> Result<(Vec<IntervalStore<P>>, BalanceStats)> {
    let p = cfg.workers;
    let max = n.to_usize().unwrap_or(usize::MAX);
    if p == 0 || p > max {
        return Err(MdsError::WorkerCount { workers: p, max });
    }
    if cfg.a < 2 {
        return Err(MdsError::BalancingParameter { a: cfg.a });
    }
    let _span = info_span!("balance_par", a = cfg.a, workers = p, k = pairs.len()).entered();

    let bounds = boundaries(n, p)?;
    let pieces = presplit(pairs, n, &bounds);
    debug!(k_pre = pieces.len(), "cut at range boundaries");
    let cut: Vec<bool> = pieces.par_iter()
        .map(|v| pairs.binary_search_by_key(&v.p, |u| u.p).is_err())
        .collect();
    let workers = distribute(&pieces, &cut, &bounds);
    drop(pieces);
    drop(cut);

    let results = exchange(workers, cfg.a, &bounds);

    let mut stores = Vec::with_capacity(p);
    let mut stats = BalanceStats::default();
    for r in results {
        let (store, s) = r?;
        stores.push(store);
        stats += s;
    }
    info!(splits = stats.splits, rounds = stats.rounds, messages = stats.messages, "parallel balancing done");
    Ok((stores, stats))
}

// runs the workers on scoped threads, one result per worker in range order
fn exchange<P: Position>(workers: Vec<Worker<P>>, a: usize, bounds: &[P]) -> Vec<Result<(IntervalStore<P>, BalanceStats)>> {
    let p = workers.len();
    let mut links: Vec<Links<P>> = (0..p)
        .map(|_| Links { tx: (0..p).map(|_| None).collect(), rx: (0..p).map(|_| None).collect() })
        .collect();
    for src in 0..p {
        for dst in (0..p).filter(|&dst| dst != src) {
            let (tx, rx) = channel();
            links[src].tx[dst] = Some(tx);
            links[dst].rx[src] = Some(rx);
        }
    }

    let sync = Rendezvous::new(p);
    let sync = &sync;
    thread::scope(|scope| {
        let handles: Vec<_> = workers.into_iter().zip(links)
            .map(|(w, l)| scope.spawn(move || w.run(a, bounds, l, sync)))
            .collect();
        handles.into_iter().enumerate()
            .map(|(worker, h)| h.join().unwrap_or_else(|_| Err(MdsError::WorkerPanicked { worker })))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // m unit runs mapped to the back, then one long run mapped to the front
    fn workers_of_comb(m: u64, tail: u64, p: usize) -> (Vec<Worker<u64>>, Vec<u64>) {
        let n = m + tail;
        let mut pairs: Vec<Pair<u64>> = (0..m).map(|i| Pair::new(i, tail + i)).collect();
        pairs.push(Pair::new(m, 0));
        let bounds = boundaries(n, p).unwrap();
        let pieces = presplit(&pairs, n, &bounds);
        let cut = vec![false; pieces.len()];
        (distribute(&pieces, &cut, &bounds), bounds)
    }

    fn all_failed(results: &[Result<(IntervalStore<u64>, BalanceStats)>]) -> bool {
        results.iter().all(|r| matches!(r, Err(MdsError::WorkerPanicked { .. })))
    }

    #[test]
    fn can_exchange_between_healthy_workers() {
        let (workers, bounds) = workers_of_comb(400, 400, 4);
        let results = exchange(workers, 2, &bounds);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn can_stop_everyone_when_a_sweep_fails() {
        let (mut workers, bounds) = workers_of_comb(400, 400, 4);
        // worker 1 holds the short runs [200, 400) under one long output interval
        let store = &mut workers[1].store;
        let head = store.list().head().unwrap();
        store.nodes[head].sc = NIL - 1;
        let results = exchange(workers, 2, &bounds);
        assert!(all_failed(&results));
        assert_eq!(results[0].as_ref().err(), Some(&MdsError::WorkerPanicked { worker: 1 }));
    }

    #[test]
    fn can_stop_everyone_when_a_round_fails() {
        let (mut workers, bounds) = workers_of_comb(400, 400, 4);
        // received starts can no longer be placed
        for w in &mut workers {
            w.resolve.iter_mut().for_each(Vec::clear);
        }
        let results = exchange(workers, 2, &bounds);
        assert!(all_failed(&results));
    }
}
