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

//! Balancing of the interval sequence.
//!
//! An output interval is a-heavy when it holds at least `2a` input starts.
//! Balancing splits every heavy output interval at its `(a+1)`-th start,
//! which creates one new pair and may make another output interval heavy.
//! The sweep and the split cascade are shared by the sequential balancer
//! and the workers of the parallel one; they differ only in where the new
//! pair's input start gets linked (see [`SplitRouter`]).

pub mod par;
pub mod seq;

use crate::common::input::{Pair, Position};
use crate::common::store::{IntervalStore, NodeId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceStats {
    /// pairs created by splitting
    pub splits: usize,
    /// message rounds of the parallel balancer
    pub rounds: usize,
    pub messages: usize,
}

impl std::ops::AddAssign for BalanceStats {
    fn add_assign(&mut self, o: Self) {
        self.splits += o.splits;
        self.rounds = self.rounds.max(o.rounds);
        self.messages += o.messages;
    }
}

/// Links the input side of a freshly split pair.
pub(crate) trait SplitRouter<P> {
    /// `new` was split off tree node `j`. Returns false when the input
    /// start belongs to another worker and was handed off instead.
    fn link_input(&mut self, store: &mut IntervalStore<P>, new: NodeId, j: NodeId) -> bool;
}

/// Everything stays in one store.
pub(crate) struct Local;

impl<P: Position> SplitRouter<P> for Local {
    fn link_input(&mut self, store: &mut IntervalStore<P>, new: NodeId, j: NodeId) -> bool {
        store.insert_after(new, j);
        true
    }
}

/// Heaviness oracle.
///
/// `ln` is the `c`-th input start inside the output interval ending at
/// `j_end`. Counts further starts until `2a` are seen or the interval ends,
/// leaving `ln` on the last counted one. Returns the `(a+1)`-th start when
/// the interval is a-heavy.
pub fn is_a_heavy<P: Position>(store: &IntervalStore<P>, a: usize, ln: &mut NodeId, c: &mut usize, j_end: P) -> Option<NodeId> {
    let two_a = a.saturating_mul(2);
    while *c < two_a {
        match store.succ(*ln) {
            Some(s) if store.p(s) < j_end => {
                *ln = s;
                *c += 1;
            }
            _ => break,
        }
    }
    if *c < two_a { return None; }
    let mut s = *ln;
    for _ in 0..*c - a - 1 {
        s = store.pred(s)?;
    }
    Some(s)
}

pub(crate) struct Balancer<'s, P, R> {
    store: &'s mut IntervalStore<P>,
    pub(crate) router: R,
    a: usize,
    pub(crate) splits: usize,
}

impl<'s, P: Position, R: SplitRouter<P>> Balancer<'s, P, R> {
    pub(crate) fn new(store: &'s mut IntervalStore<P>, router: R, a: usize) -> Self {
        debug_assert!(a >= 2);
        Self { store, router, a, splits: 0 }
    }

    pub(crate) fn store(&mut self) -> &mut IntervalStore<P> { &mut *self.store }

    pub(crate) fn is_a_heavy(&self, ln: &mut NodeId, c: &mut usize, j_end: P) -> Option<NodeId> {
        is_a_heavy(&*self.store, self.a, ln, c, j_end)
    }

    /// Splits output interval `j` at input start `s` and settles every
    /// split that follows from it. `q_u` is the start of the new right
    /// half, `p_cur` the input start the sweep has counted up to; `c`
    /// grows when the new start lands in the part already counted.
    /// Returns the right half of the first split.
    pub(crate) fn balance_upto(&mut self, mut s: NodeId, mut j: NodeId, q_u: P, p_cur: P, c: &mut usize) -> NodeId {
        let mut first = None;
        loop {
            let Pair { p: p_j, q: q_j } = self.store.pair(j);
            let j_end = self.store.output_end(j);
            let d = self.store.p(s) - q_j;
            let b = p_j + d;

            let new = self.store.alloc(Pair::new(b, q_j + d));
            self.store.insert_node_in(new, j);
            self.splits += 1;
            let head = *first.get_or_insert(new);

            if !self.router.link_input(&mut *self.store, new, j) { return head; }

            if b < q_u {
                // left of the sweep; a start back inside j cannot make it heavy again
                if q_j <= b && b < j_end { return head; }
                match self.heavy_around(new) {
                    Some((s2, y)) => {
                        s = s2;
                        j = y;
                    }
                    None => return head,
                }
            } else {
                if b < p_cur { *c += 1; }
                return head;
            }
        }
    }

    /// Checks the output interval containing the new input start `id`.
    /// Returns its split point and tree node when it became heavy.
    pub(crate) fn heavy_around(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        let b = self.store.p(id);
        let y = self.store.maximum_leq(b)?;
        let q_y = self.store.q(y);
        let mut c = 1;
        let mut z = id;
        while let Some(pr) = self.store.pred(z) {
            if self.store.p(pr) < q_y { break; }
            z = pr;
            c += 1;
        }
        let mut ln = id;
        let s = self.is_a_heavy(&mut ln, &mut c, self.store.output_end(y))?;
        Some((s, y))
    }

    /// One pass over the output intervals in `q` order, splitting every
    /// heavy one on the way.
    pub(crate) fn sweep(&mut self) {
        let Some((mut j, mut ln)) = self.first_loaded() else { return };
        let mut c = 1;
        loop {
            let j_end = self.store.output_end(j);
            if let Some(s) = self.is_a_heavy(&mut ln, &mut c, j_end) {
                let q_u = self.store.p(s);
                let p_cur = self.store.p(ln);
                j = self.balance_upto(s, j, q_u, p_cur, &mut c);
                c -= self.a;
                continue;
            }
            match self.store.out_next(j).and_then(|next| self.loaded_from(next, ln)) {
                Some((j2, ln2)) => {
                    j = j2;
                    ln = ln2;
                    c = 1;
                }
                None => break,
            }
        }
    }

    fn first_loaded(&self) -> Option<(NodeId, NodeId)> {
        let j = self.store.tree.min(&self.store.nodes)?;
        let ln = self.store.list.head()?;
        self.loaded_from(j, ln)
    }

    // first output interval from `j` on holding an input start, with the
    // first start inside it; `ln` must not be past that start
    fn loaded_from(&self, mut j: NodeId, mut ln: NodeId) -> Option<(NodeId, NodeId)> {
        loop {
            let q = self.store.q(j);
            while self.store.p(ln) < q { ln = self.store.succ(ln)?; }
            if self.store.p(ln) < self.store.output_end(j) { return Some((j, ln)); }
            j = self.store.out_next(j)?;
        }
    }
}
