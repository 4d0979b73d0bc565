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

//! AVL tree over arena nodes, ordered by output start `q`.
//!
//! Nodes carry subtree sizes, so the tree also answers `select` and `rank`.
//! Like the list, the tree only owns its root.

use super::input::Position;
use super::store::{Node, NodeId, NIL};

#[inline]
fn some(id: NodeId) -> Option<NodeId> {
    if id == NIL { None } else { Some(id) }
}

#[inline]
fn height<P>(nodes: &[Node<P>], id: NodeId) -> i32 {
    if id == NIL { 0 } else { nodes[id].height as i32 }
}

#[inline]
fn size<P>(nodes: &[Node<P>], id: NodeId) -> usize {
    if id == NIL { 0 } else { nodes[id].size }
}

fn update<P>(nodes: &mut [Node<P>], id: NodeId) {
    let (l, r) = (nodes[id].left, nodes[id].right);
    nodes[id].height = (1 + height(nodes, l).max(height(nodes, r))) as u8;
    nodes[id].size = 1 + size(nodes, l) + size(nodes, r);
}

fn leftmost<P>(nodes: &[Node<P>], mut id: NodeId) -> NodeId {
    while nodes[id].left != NIL { id = nodes[id].left; }
    id
}

fn rightmost<P>(nodes: &[Node<P>], mut id: NodeId) -> NodeId {
    while nodes[id].right != NIL { id = nodes[id].right; }
    id
}

fn reset<P>(nodes: &mut [Node<P>], id: NodeId) {
    let n = &mut nodes[id];
    n.parent = NIL;
    n.left = NIL;
    n.right = NIL;
    n.height = 1;
    n.size = 1;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvlTree {
    root: NodeId,
}

impl Default for AvlTree {
    fn default() -> Self { Self::new() }
}

impl AvlTree {
    pub const fn new() -> Self { Self { root: NIL } }

    pub fn root(&self) -> Option<NodeId> { some(self.root) }
    pub fn is_empty(&self) -> bool { self.root == NIL }
    pub fn len<P>(&self, nodes: &[Node<P>]) -> usize { size(nodes, self.root) }

    /// Builds a perfectly balanced tree over `ids`, which must already be
    /// sorted by key. O(m).
    pub fn from_sorted<P>(nodes: &mut [Node<P>], ids: &[NodeId]) -> Self {
        fn build<P>(nodes: &mut [Node<P>], ids: &[NodeId], parent: NodeId) -> NodeId {
            if ids.is_empty() { return NIL; }
            let mid = ids.len() / 2;
            let id = ids[mid];
            nodes[id].parent = parent;
            nodes[id].left = build(nodes, &ids[..mid], id);
            nodes[id].right = build(nodes, &ids[mid + 1..], id);
            update(nodes, id);
            id
        }
        Self { root: build(nodes, ids, NIL) }
    }

    pub fn min<P>(&self, nodes: &[Node<P>]) -> Option<NodeId> {
        some(self.root).map(|r| leftmost(nodes, r))
    }

    pub fn max<P>(&self, nodes: &[Node<P>]) -> Option<NodeId> {
        some(self.root).map(|r| rightmost(nodes, r))
    }

    pub fn second_smallest<P>(&self, nodes: &[Node<P>]) -> Option<NodeId> {
        self.min(nodes).and_then(|m| Self::next(nodes, m))
    }

    /// In-order successor.
    pub fn next<P>(nodes: &[Node<P>], mut id: NodeId) -> Option<NodeId> {
        if nodes[id].right != NIL { return Some(leftmost(nodes, nodes[id].right)); }
        let mut up = nodes[id].parent;
        while up != NIL && nodes[up].right == id {
            id = up;
            up = nodes[up].parent;
        }
        some(up)
    }

    /// In-order predecessor.
    pub fn prev<P>(nodes: &[Node<P>], mut id: NodeId) -> Option<NodeId> {
        if nodes[id].left != NIL { return Some(rightmost(nodes, nodes[id].left)); }
        let mut up = nodes[id].parent;
        while up != NIL && nodes[up].left == id {
            id = up;
            up = nodes[up].parent;
        }
        some(up)
    }

    /// Node with the largest `q <= key`.
    pub fn maximum_leq<P: Position>(&self, nodes: &[Node<P>], key: P) -> Option<NodeId> {
        let mut cur = self.root;
        let mut best = NIL;
        while cur != NIL {
            if nodes[cur].v.q <= key {
                best = cur;
                cur = nodes[cur].right;
            } else {
                cur = nodes[cur].left;
            }
        }
        some(best)
    }

    /// The `i`-th smallest node, 0-based.
    pub fn select<P>(&self, nodes: &[Node<P>], mut i: usize) -> Option<NodeId> {
        let mut cur = self.root;
        while cur != NIL {
            let l = size(nodes, nodes[cur].left);
            if i < l {
                cur = nodes[cur].left;
            } else if i == l {
                return Some(cur);
            } else {
                i -= l + 1;
                cur = nodes[cur].right;
            }
        }
        None
    }

    /// Number of nodes before `id` in key order.
    pub fn rank<P>(nodes: &[Node<P>], id: NodeId) -> usize {
        let mut r = size(nodes, nodes[id].left);
        let mut x = id;
        while nodes[x].parent != NIL {
            let up = nodes[x].parent;
            if nodes[up].right == x { r += size(nodes, nodes[up].left) + 1; }
            x = up;
        }
        r
    }

    /// Inserts `id` by its key. Equal keys go right.
    pub fn insert<P: Position>(&mut self, nodes: &mut [Node<P>], id: NodeId) {
        reset(nodes, id);
        if self.root == NIL {
            self.root = id;
            return;
        }
        let key = nodes[id].v.q;
        let mut cur = self.root;
        loop {
            let child = if key < nodes[cur].v.q { nodes[cur].left } else { nodes[cur].right };
            if child == NIL { break; }
            cur = child;
        }
        if key < nodes[cur].v.q { nodes[cur].left = id; } else { nodes[cur].right = id; }
        nodes[id].parent = cur;
        self.rebalance_from(nodes, cur);
    }

    /// Inserts `id` as the in-order successor of `hint` without comparing
    /// keys. The caller guarantees the key order is kept.
    pub fn insert_node_in<P>(&mut self, nodes: &mut [Node<P>], id: NodeId, hint: NodeId) {
        reset(nodes, id);
        let parent = if nodes[hint].right == NIL {
            nodes[hint].right = id;
            hint
        } else {
            let p = leftmost(nodes, nodes[hint].right);
            nodes[p].left = id;
            p
        };
        nodes[id].parent = parent;
        self.rebalance_from(nodes, parent);
    }

    pub fn iter<'a, P>(&self, nodes: &'a [Node<P>]) -> impl Iterator<Item = NodeId> + 'a {
        std::iter::successors(self.min(nodes), move |&id| Self::next(nodes, id))
    }

    /// Verifies parent links, heights, sizes, balance factors and key order.
    pub fn check<P: Position>(&self, nodes: &[Node<P>]) -> bool {
        fn walk<P: Position>(nodes: &[Node<P>], id: NodeId, parent: NodeId) -> Option<(i32, usize)> {
            if id == NIL { return Some((0, 0)); }
            let n = &nodes[id];
            if n.parent != parent { return None; }
            if n.left != NIL && nodes[n.left].v.q > n.v.q { return None; }
            if n.right != NIL && nodes[n.right].v.q < n.v.q { return None; }
            let (hl, sl) = walk(nodes, n.left, id)?;
            let (hr, sr) = walk(nodes, n.right, id)?;
            let h = 1 + hl.max(hr);
            if (hl - hr).abs() > 1 || n.height as i32 != h || n.size != 1 + sl + sr {
                return None;
            }
            Some((h, n.size))
        }
        if walk(nodes, self.root, NIL).is_none() { return false; }
        let keys: Vec<P> = self.iter(nodes).map(|id| nodes[id].v.q).collect();
        keys.windows(2).all(|w| w[0] <= w[1])
    }

    fn replace_child<P>(&mut self, nodes: &mut [Node<P>], parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NIL {
            self.root = new;
        } else if nodes[parent].left == old {
            nodes[parent].left = new;
        } else {
            nodes[parent].right = new;
        }
        nodes[new].parent = parent;
    }

    fn rotate_left<P>(&mut self, nodes: &mut [Node<P>], x: NodeId) -> NodeId {
        let y = nodes[x].right;
        let b = nodes[y].left;
        let up = nodes[x].parent;
        nodes[x].right = b;
        if b != NIL { nodes[b].parent = x; }
        nodes[y].left = x;
        nodes[x].parent = y;
        self.replace_child(nodes, up, x, y);
        update(nodes, x);
        update(nodes, y);
        y
    }

    fn rotate_right<P>(&mut self, nodes: &mut [Node<P>], x: NodeId) -> NodeId {
        let y = nodes[x].left;
        let b = nodes[y].right;
        let up = nodes[x].parent;
        nodes[x].left = b;
        if b != NIL { nodes[b].parent = x; }
        nodes[y].right = x;
        nodes[x].parent = y;
        self.replace_child(nodes, up, x, y);
        update(nodes, x);
        update(nodes, y);
        y
    }

    // walks to the root, fixing sizes on the way, so it never stops early
    fn rebalance_from<P>(&mut self, nodes: &mut [Node<P>], mut id: NodeId) {
        while id != NIL {
            update(nodes, id);
            let (l, r) = (nodes[id].left, nodes[id].right);
            let bf = height(nodes, l) - height(nodes, r);
            if bf > 1 {
                if height(nodes, nodes[l].left) < height(nodes, nodes[l].right) {
                    self.rotate_left(nodes, l);
                }
                id = self.rotate_right(nodes, id);
            } else if bf < -1 {
                if height(nodes, nodes[r].right) < height(nodes, nodes[r].left) {
                    self.rotate_right(nodes, r);
                }
                id = self.rotate_left(nodes, id);
            }
            id = nodes[id].parent;
        }
    }
}
