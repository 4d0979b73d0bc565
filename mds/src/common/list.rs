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

//! Doubly-linked list over arena nodes, ordered by input start `p`.
//!
//! The list only stores its ends; links live in the nodes so several lists
//! (a store's list and a chain under construction) can share one arena.

use super::store::{Node, NodeId, NIL};

#[inline]
fn some(id: NodeId) -> Option<NodeId> {
    if id == NIL { None } else { Some(id) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkedList {
    head: NodeId,
    tail: NodeId,
    len: usize,
}

impl Default for LinkedList {
    fn default() -> Self { Self::new() }
}

impl LinkedList {
    pub const fn new() -> Self { Self { head: NIL, tail: NIL, len: 0 } }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn head(&self) -> Option<NodeId> { some(self.head) }
    pub fn tail(&self) -> Option<NodeId> { some(self.tail) }

    pub fn succ<P>(nodes: &[Node<P>], id: NodeId) -> Option<NodeId> { some(nodes[id].sc) }
    pub fn pred<P>(nodes: &[Node<P>], id: NodeId) -> Option<NodeId> { some(nodes[id].pr) }

    /// Whether `id` is linked into this list.
    pub fn contains<P>(&self, nodes: &[Node<P>], id: NodeId) -> bool {
        self.head == id || nodes[id].pr != NIL
    }

    pub fn push_back<P>(&mut self, nodes: &mut [Node<P>], id: NodeId) {
        nodes[id].pr = self.tail;
        nodes[id].sc = NIL;
        if self.tail == NIL { self.head = id; } else { nodes[self.tail].sc = id; }
        self.tail = id;
        self.len += 1;
    }

    pub fn push_front<P>(&mut self, nodes: &mut [Node<P>], id: NodeId) {
        nodes[id].sc = self.head;
        nodes[id].pr = NIL;
        if self.head == NIL { self.tail = id; } else { nodes[self.head].pr = id; }
        self.head = id;
        self.len += 1;
    }

    /// Links `id` directly behind `at`.
    pub fn insert_after<P>(&mut self, nodes: &mut [Node<P>], id: NodeId, at: NodeId) {
        let next = nodes[at].sc;
        nodes[id].pr = at;
        nodes[id].sc = next;
        nodes[at].sc = id;
        if next == NIL { self.tail = id; } else { nodes[next].pr = id; }
        self.len += 1;
    }

    /// Links `id` directly in front of `at`.
    pub fn insert_before<P>(&mut self, nodes: &mut [Node<P>], id: NodeId, at: NodeId) {
        let prev = nodes[at].pr;
        nodes[id].sc = at;
        nodes[id].pr = prev;
        nodes[at].pr = id;
        if prev == NIL { self.head = id; } else { nodes[prev].sc = id; }
        self.len += 1;
    }

    pub fn remove<P>(&mut self, nodes: &mut [Node<P>], id: NodeId) {
        let (prev, next) = (nodes[id].pr, nodes[id].sc);
        if prev == NIL { self.head = next; } else { nodes[prev].sc = next; }
        if next == NIL { self.tail = prev; } else { nodes[next].pr = prev; }
        nodes[id].pr = NIL;
        nodes[id].sc = NIL;
        self.len -= 1;
    }

    /// Appends all of `other` in O(1), leaving `other` empty.
    pub fn concat<P>(&mut self, nodes: &mut [Node<P>], other: &mut LinkedList) {
        if other.is_empty() { return; }
        if self.is_empty() {
            *self = *other;
        } else {
            nodes[self.tail].sc = other.head;
            nodes[other.head].pr = self.tail;
            self.tail = other.tail;
            self.len += other.len;
        }
        *other = LinkedList::new();
    }

    pub fn iter<'a, P>(&self, nodes: &'a [Node<P>]) -> impl Iterator<Item = NodeId> + 'a {
        std::iter::successors(self.head(), move |&id| Self::succ(nodes, id))
    }
}
