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

//! Interval sequence store: one node arena indexed two ways.
//!
//! The list orders nodes by input start `p`, the tree by output start `q`.
//! A node may sit in both, or (in a parallel worker's store) only in one of
//! them. There are no sentinel nodes: a node without a successor has its
//! interval end at the store's `end` bound.

use rayon::prelude::*;

use super::avl::AvlTree;
use super::error::Result;
use super::input::{interval_len, validate, Pair, Position};
use super::list::LinkedList;

/// Handle of a node in a store's arena.
pub type NodeId = usize;

pub(crate) const NIL: NodeId = NodeId::MAX;

#[derive(Clone, Debug)]
pub struct Node<P> {
    pub(crate) v: Pair<P>,
    pub(crate) pr: NodeId,
    pub(crate) sc: NodeId,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    // 0 while the node is not in a tree
    pub(crate) height: u8,
    pub(crate) size: usize,
    pub(crate) twin: usize,
    // start made by cutting at a range boundary, not by the input or a split
    pub(crate) cut: bool,
}

impl<P: Copy> Node<P> {
    pub fn new(v: Pair<P>) -> Self {
        Self { v, pr: NIL, sc: NIL, parent: NIL, left: NIL, right: NIL, height: 0, size: 0, twin: NIL, cut: false }
    }

    pub fn pair(&self) -> Pair<P> { self.v }

    /// Sequence number linking a tree-only record to its list record on
    /// another worker.
    pub fn twin(&self) -> Option<usize> {
        if self.twin == NIL { None } else { Some(self.twin) }
    }
}

/// Which of the two orders a cursor walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Input,
    Output,
}

#[derive(Clone, Debug)]
pub struct IntervalStore<P> {
    pub(crate) nodes: Vec<Node<P>>,
    pub(crate) list: LinkedList,
    pub(crate) tree: AvlTree,
    start: P,
    end: P,
}

impl<P: Position> IntervalStore<P> {
    /// Empty store covering positions `[start, end)`.
    pub fn new(start: P, end: P) -> Self { Self::with_capacity(start, end, 0) }

    pub fn with_capacity(start: P, end: P, cap: usize) -> Self {
        Self { nodes: Vec::with_capacity(cap), list: LinkedList::new(), tree: AvlTree::new(), start, end }
    }

    /// Store over `[0, n)` holding every pair in both orders. Fails on
    /// pairs that do not describe a permutation of `[0, n)`.
    pub fn from_pairs(pairs: &[Pair<P>], n: P) -> Result<Self> {
        validate(pairs, n)?;
        Ok(Self::from_pairs_unchecked(pairs, n))
    }

    pub(crate) fn from_pairs_unchecked(pairs: &[Pair<P>], n: P) -> Self {
        let k = pairs.len();
        let mut store = Self::with_capacity(P::zero(), n, k);
        for &v in pairs {
            let id = store.alloc(v);
            store.list.push_back(&mut store.nodes, id);
        }
        let mut by_q: Vec<NodeId> = (0..k).collect();
        by_q.par_sort_unstable_by_key(|&i| pairs[i].q);
        store.build_tree(&by_q);
        store
    }

    /// Adds an unlinked node to the arena.
    pub fn alloc(&mut self, v: Pair<P>) -> NodeId {
        self.nodes.push(Node::new(v));
        self.nodes.len() - 1
    }

    pub fn start(&self) -> P { self.start }
    pub fn end(&self) -> P { self.end }
    pub fn num_nodes(&self) -> usize { self.nodes.len() }
    pub fn nodes(&self) -> &[Node<P>] { &self.nodes }
    pub fn node(&self, id: NodeId) -> &Node<P> { &self.nodes[id] }
    pub fn list(&self) -> &LinkedList { &self.list }
    pub fn tree(&self) -> &AvlTree { &self.tree }

    #[inline] pub fn pair(&self, id: NodeId) -> Pair<P> { self.nodes[id].v }
    #[inline] pub fn p(&self, id: NodeId) -> P { self.nodes[id].v.p }
    #[inline] pub fn q(&self, id: NodeId) -> P { self.nodes[id].v.q }

    pub(crate) fn set_twin(&mut self, id: NodeId, twin: usize) { self.nodes[id].twin = twin; }
    pub(crate) fn mark_cut(&mut self, id: NodeId) { self.nodes[id].cut = true; }

    pub fn in_list(&self, id: NodeId) -> bool { self.list.contains(&self.nodes, id) }
    pub fn in_tree(&self, id: NodeId) -> bool { self.nodes[id].height > 0 }

    #[inline] pub fn succ(&self, id: NodeId) -> Option<NodeId> { LinkedList::succ(&self.nodes, id) }
    #[inline] pub fn pred(&self, id: NodeId) -> Option<NodeId> { LinkedList::pred(&self.nodes, id) }
    #[inline] pub fn out_next(&self, id: NodeId) -> Option<NodeId> { AvlTree::next(&self.nodes, id) }
    #[inline] pub fn out_prev(&self, id: NodeId) -> Option<NodeId> { AvlTree::prev(&self.nodes, id) }

    /// Exclusive end of the input interval of list node `id`.
    pub fn input_end(&self, id: NodeId) -> P {
        self.succ(id).map_or(self.end, |s| self.p(s))
    }

    /// Exclusive end of the output interval of tree node `id`.
    pub fn output_end(&self, id: NodeId) -> P {
        self.out_next(id).map_or(self.end, |s| self.q(s))
    }

    pub fn push_back(&mut self, id: NodeId) { self.list.push_back(&mut self.nodes, id); }

    pub fn insert_after(&mut self, id: NodeId, at: NodeId) {
        self.list.insert_after(&mut self.nodes, id, at);
    }

    pub fn insert_before(&mut self, id: NodeId, at: NodeId) {
        self.list.insert_before(&mut self.nodes, id, at);
    }

    pub fn tree_insert(&mut self, id: NodeId) { self.tree.insert(&mut self.nodes, id); }

    /// Puts `id` into the tree as the in-order successor of `hint`.
    pub fn insert_node_in(&mut self, id: NodeId, hint: NodeId) {
        self.tree.insert_node_in(&mut self.nodes, id, hint);
    }

    /// Replaces the tree by a balanced one over `ids` (sorted by `q`).
    pub fn build_tree(&mut self, ids: &[NodeId]) {
        self.tree = AvlTree::from_sorted(&mut self.nodes, ids);
    }

    /// Tree node whose output interval contains position `x`.
    pub fn maximum_leq(&self, x: P) -> Option<NodeId> { self.tree.maximum_leq(&self.nodes, x) }

    pub fn cursor(&self, id: NodeId, order: Order) -> Cursor<'_, P> {
        Cursor { store: self, cur: id, order }
    }

    pub fn input_iter(&self) -> impl Iterator<Item = NodeId> + '_ { self.list.iter(&self.nodes) }
    pub fn output_iter(&self) -> impl Iterator<Item = NodeId> + '_ { self.tree.iter(&self.nodes) }

    /// Pairs of the list, in input order.
    pub fn pairs(&self) -> Vec<Pair<P>> { self.input_iter().map(|id| self.pair(id)).collect() }

    /// Structural self-check: tree invariants, strictly increasing list,
    /// and equal input and output lengths for nodes held in both orders.
    pub fn check(&self) -> bool {
        if !self.tree.check(&self.nodes) { return false; }
        let pairs = self.pairs();
        if pairs.windows(2).any(|w| w[0].p >= w[1].p) { return false; }
        self.input_iter().enumerate().all(|(i, id)| {
            !self.in_tree(id) || interval_len(&pairs, i, self.end) == self.output_end(id) - self.q(id)
        })
    }
}

/// Position in one of the store's orders that can step both ways.
pub struct Cursor<'a, P> {
    store: &'a IntervalStore<P>,
    cur: NodeId,
    order: Order,
}

impl<'a, P: Position> Cursor<'a, P> {
    pub fn current(&self) -> NodeId { self.cur }
    pub fn set(&mut self, id: NodeId) { self.cur = id; }

    fn step(&self, forward: bool) -> Option<NodeId> {
        match (self.order, forward) {
            (Order::Input, true) => self.store.succ(self.cur),
            (Order::Input, false) => self.store.pred(self.cur),
            (Order::Output, true) => self.store.out_next(self.cur),
            (Order::Output, false) => self.store.out_prev(self.cur),
        }
    }

    pub fn has_next(&self) -> bool { self.step(true).is_some() }
    pub fn has_prev(&self) -> bool { self.step(false).is_some() }

    /// Steps forward; stays put and returns `None` at the last node.
    pub fn move_next(&mut self) -> Option<NodeId> {
        let id = self.step(true)?;
        self.cur = id;
        Some(id)
    }

    pub fn move_prev(&mut self) -> Option<NodeId> {
        let id = self.step(false)?;
        self.cur = id;
        Some(id)
    }
}
