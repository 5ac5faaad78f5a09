// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic AABB tree: incremental insertion with a perimeter cost heuristic and
//! pruned overlap queries.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::ops::ControlFlow;

use crate::error::Error;
use crate::types::{Aabb, Accumulator, Scalar, ScalarAcc, min_t, overlaps_aabb, union_aabb};

/// Index of a node in the tree arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// The root always lives in the first arena slot.
const ROOT: NodeIdx = NodeIdx::new(0);

#[derive(Clone)]
enum Kind<V> {
    /// Root of a tree that has never been inserted into.
    Vacant,
    Leaf(V),
    Internal { left: NodeIdx, right: NodeIdx },
}

#[derive(Clone)]
struct Node<T, V> {
    bbox: Aabb<T>,
    kind: Kind<V>,
}

impl<T, V> Node<T, V> {
    const fn vacant() -> Self {
        Self {
            bbox: Aabb::empty(),
            kind: Kind::Vacant,
        }
    }

    fn children(&self) -> Option<(NodeIdx, NodeIdx)> {
        match self.kind {
            Kind::Internal { left, right } => Some((left, right)),
            _ => None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children().is_none()
    }

    fn is_vacant(&self) -> bool {
        matches!(self.kind, Kind::Vacant)
    }
}

/// A dynamic, insert-only AABB tree mapping boxes to values.
///
/// Leaves hold one `(box, value)` item each; internal nodes hold the tight union
/// of their two children's boxes. New items are placed by a greedy descent that
/// minimizes perimeter growth along the path from the root (see [`Tree::insert`]).
///
/// The dimensionality of the tree is fixed by its first item.
///
/// Nodes live in an arena and refer to their children by index, so turning a
/// leaf into an internal node moves the old content into a fresh slot instead
/// of cloning it. Values therefore need no `Clone` bound.
#[derive(Clone)]
pub struct Tree<T, V> {
    arena: Vec<Node<T, V>>,
    len: usize,
}

impl<T, V> Default for Tree<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> Tree<T, V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            arena: vec![Node::vacant()],
            len: 0,
        }
    }

    /// Create an empty tree with arena room for `items` insertions.
    pub fn with_capacity(items: usize) -> Self {
        let mut arena = Vec::with_capacity(items.saturating_mul(2).saturating_sub(1).max(1));
        arena.push(Node::vacant());
        Self { arena, len: 0 }
    }

    /// Whether the root has no children. True for an empty or single-item tree.
    pub fn is_leaf(&self) -> bool {
        self.root().is_leaf()
    }

    /// Number of items inserted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Dimensionality of the tree, or `None` before the first insertion.
    pub fn dim(&self) -> Option<usize> {
        match self.root().bbox.dim() {
            0 => None,
            d => Some(d),
        }
    }

    /// The box enclosing every item; empty for an empty tree.
    pub fn bounds(&self) -> &Aabb<T> {
        &self.root().bbox
    }

    /// Number of nodes on the longest root-to-leaf path (`1` for a lone leaf).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 1)];
        while let Some((idx, d)) = stack.pop() {
            deepest = deepest.max(d);
            if let Some((left, right)) = self.arena[idx.get()].children() {
                stack.push((left, d + 1));
                stack.push((right, d + 1));
            }
        }
        deepest
    }

    fn root(&self) -> &Node<T, V> {
        &self.arena[ROOT.get()]
    }
}

impl<T: Scalar, V> Tree<T, V> {
    /// Insert `bbox` with its associated `value`.
    ///
    /// At each internal node the insertion weighs three choices:
    ///
    /// - make the new item a sibling of the whole subtree here, costing
    ///   `2 * perimeter(node ∪ box)`;
    /// - descend into a child, costing `perimeter(child ∪ box)` plus the growth
    ///   `2 * (perimeter(node ∪ box) - perimeter(node))` pushed onto this level,
    ///   minus `perimeter(child)` when the child is itself internal.
    ///
    /// The sibling option wins only when strictly cheaper than both descents;
    /// between descents, ties go right. Boxes are re-tightened bottom-up.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyBox`] if `bbox` is empty.
    /// - [`Error::DimensionMismatch`] if `bbox` does not match the tree's dimensionality.
    ///
    /// The tree is left untouched on error.
    pub fn insert(&mut self, bbox: Aabb<T>, value: V) -> Result<(), Error> {
        if bbox.is_empty() {
            return Err(Error::EmptyBox);
        }
        self.bounds().check_dim(&bbox)?;
        Self::insert_node(&mut self.arena, ROOT, bbox, value);
        self.len += 1;
        Ok(())
    }

    fn insert_node(arena: &mut Vec<Node<T, V>>, node_idx: NodeIdx, bbox: Aabb<T>, value: V) {
        let i = node_idx.get();
        if arena[i].is_vacant() {
            log::debug!("tree root initialized with {} axes", bbox.dim());
            arena[i] = Node {
                bbox,
                kind: Kind::Leaf(value),
            };
            return;
        }
        let Some((left, right)) = arena[i].children() else {
            log::debug!("leaf {i} split into a pair");
            Self::make_sibling(arena, i, bbox, value);
            return;
        };

        let tree_p = arena[i].bbox.perimeter();
        let tree_merge_p = union_aabb(&arena[i].bbox, &bbox).perimeter();
        let new_parent_cost = T::Acc::TWO.sat_mul(tree_merge_p);
        let min_pushdown_cost = T::Acc::TWO.sat_mul(tree_merge_p.sat_sub(tree_p));
        let cost_left = Self::descend_cost(&arena[left.get()], &bbox, min_pushdown_cost);
        let cost_right = Self::descend_cost(&arena[right.get()], &bbox, min_pushdown_cost);

        if new_parent_cost < min_t(cost_left, cost_right) {
            log::trace!(
                "node {i}: new sibling (cost {new_parent_cost:?} vs {cost_left:?}/{cost_right:?})"
            );
            Self::make_sibling(arena, i, bbox, value);
            return;
        }
        if cost_left < cost_right {
            log::trace!("node {i}: descend left (cost {cost_left:?} vs {cost_right:?})");
            Self::insert_node(arena, left, bbox, value);
        } else {
            log::trace!("node {i}: descend right (cost {cost_right:?} vs {cost_left:?})");
            Self::insert_node(arena, right, bbox, value);
        }
        arena[i].bbox = union_aabb(&arena[left.get()].bbox, &arena[right.get()].bbox);
    }

    fn descend_cost(child: &Node<T, V>, bbox: &Aabb<T>, pushdown: ScalarAcc<T>) -> ScalarAcc<T> {
        let cost = union_aabb(&child.bbox, bbox).perimeter().sat_add(pushdown);
        if child.is_leaf() {
            cost
        } else {
            cost.sat_sub(child.bbox.perimeter())
        }
    }

    /// Move slot `i` into a new left child and attach `(bbox, value)` as its right sibling.
    fn make_sibling(arena: &mut Vec<Node<T, V>>, i: usize, bbox: Aabb<T>, value: V) {
        let merged = union_aabb(&arena[i].bbox, &bbox);
        let old = core::mem::replace(
            &mut arena[i],
            Node {
                bbox: merged,
                kind: Kind::Vacant,
            },
        );
        let left = NodeIdx::new(arena.len());
        arena.push(old);
        let right = NodeIdx::new(arena.len());
        arena.push(Node {
            bbox,
            kind: Kind::Leaf(value),
        });
        arena[i].kind = Kind::Internal { left, right };
    }

    /// Whether any item's box overlaps `query` (touching counts).
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `query` does not match the tree's dimensionality.
    pub fn does_overlap(&self, query: &Aabb<T>) -> Result<bool, Error> {
        self.visit_overlapping(query, |_| ControlFlow::Break(()))
    }

    /// Values of every item whose box overlaps `query`, in left-to-right pre-order.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `query` does not match the tree's dimensionality.
    pub fn overlap_values(&self, query: &Aabb<T>) -> Result<Vec<&V>, Error> {
        let mut out = Vec::new();
        self.visit_overlapping(query, |v| {
            out.push(v);
            ControlFlow::Continue(())
        })?;
        Ok(out)
    }

    /// Walk overlapping leaves left to right, skipping children whose box misses `query`.
    ///
    /// Returns `true` if `f` broke out of the walk.
    fn visit_overlapping<'a, F>(&'a self, query: &Aabb<T>, mut f: F) -> Result<bool, Error>
    where
        F: FnMut(&'a V) -> ControlFlow<()>,
    {
        self.bounds().check_dim(query)?;
        let mut stack = vec![ROOT];
        while let Some(idx) = stack.pop() {
            let node = &self.arena[idx.get()];
            match &node.kind {
                Kind::Vacant => {}
                Kind::Leaf(v) => {
                    if overlaps_aabb(&node.bbox, query) && f(v).is_break() {
                        return Ok(true);
                    }
                }
                Kind::Internal { left, right } => {
                    for child in [*right, *left] {
                        if overlaps_aabb(&self.arena[child.get()].bbox, query) {
                            stack.push(child);
                        }
                    }
                }
            }
        }
        Ok(false)
    }
}

/// Structural equality: boxes and shape match node for node. Values are not compared.
impl<T: PartialEq, V> PartialEq for Tree<T, V> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(ROOT, ROOT)];
        while let Some((a, b)) = stack.pop() {
            let (na, nb) = (&self.arena[a.get()], &other.arena[b.get()]);
            if na.bbox != nb.bbox {
                return false;
            }
            match (na.children(), nb.children()) {
                (None, None) => {}
                (Some((al, ar)), Some((bl, br))) => {
                    stack.push((al, bl));
                    stack.push((ar, br));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq, V> Eq for Tree<T, V> {}

impl<T: Display, V: Debug> Tree<T, V> {
    fn fmt_node(
        &self,
        f: &mut core::fmt::Formatter<'_>,
        idx: NodeIdx,
        depth: usize,
    ) -> core::fmt::Result {
        let pad = depth * 2;
        let node = &self.arena[idx.get()];
        writeln!(f, "{:pad$}AABB: {}", "", node.bbox)?;
        match &node.kind {
            Kind::Leaf(v) => writeln!(f, "{:pad$}Value: {v:?}", "")?,
            _ => writeln!(f, "{:pad$}Value: None", "")?,
        }
        match node.children() {
            None => write!(f, "{:pad$}Left: None\n{:pad$}Right: None", "", ""),
            Some((left, right)) => {
                writeln!(f, "{:pad$}Left:", "")?;
                self.fmt_node(f, left, depth + 1)?;
                writeln!(f)?;
                writeln!(f, "{:pad$}Right:", "")?;
                self.fmt_node(f, right, depth + 1)
            }
        }
    }
}

/// Indented dump of every node's box, value, and children.
///
/// Values are rendered with `Debug`, so `V` needs no `Display` impl; string
/// payloads therefore appear quoted (`Value: "A"`).
impl<T: Display, V: Debug> Display for Tree<T, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.fmt_node(f, ROOT, 0)
    }
}

impl<T: Debug, V> Debug for Tree<T, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree")
            .field("items", &self.len)
            .field("arena_nodes", &self.arena.len())
            .field("depth", &self.depth())
            .field("bounds", self.bounds())
            .finish_non_exhaustive()
    }
}
