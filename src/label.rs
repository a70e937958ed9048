//! Labels, the append-only label arena, and the per-node bucket store.
//!
//! Labels are never mutated once allocated. Bucket slots and predecessor
//! links hold [`LabelId`]s into the arena, so replacing a bucket or cloning
//! the whole store for a round snapshot can never invalidate a chain.

use serde::Serialize;

use crate::cost::{EdgeId, NodeId};

/// Fixed-width set of node ids visited by a label's chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSet { words: Box<[u64]> }

impl NodeSet {
    pub fn singleton(node_count: usize, node: NodeId) -> Self {
        let words = vec![0u64; node_count.div_ceil(64)].into_boxed_slice();
        let mut s = Self { words };
        s.words[node / 64] |= 1u64 << (node % 64);
        s
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.words.get(node / 64).map_or(false, |w| w & (1u64 << (node % 64)) != 0)
    }

    /// Copy of `self` with `node` added.
    pub fn with(&self, node: NodeId) -> Self {
        let mut words = self.words.clone();
        words[node / 64] |= 1u64 << (node % 64);
        Self { words }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LabelId(usize);

impl LabelId {
    #[inline] pub fn index(self) -> usize { self.0 }
}

#[derive(Clone, Debug)]
pub struct Label {
    pub x_total: u64,
    pub y_total: u64,
    pub node: NodeId,
    pub predecessor: Option<LabelId>,
    pub last_edge: Option<EdgeId>,
    pub visited: NodeSet,
}

impl Label {
    /// The zero label seeded at the source.
    pub fn source(node_count: usize, source: NodeId) -> Self {
        Self { x_total: 0, y_total: 0, node: source, predecessor: None, last_edge: None, visited: NodeSet::singleton(node_count, source) }
    }

    /// Signed path value `y_total − x_total`.
    #[inline]
    pub fn value(&self) -> i64 { self.y_total as i64 - self.x_total as i64 }
}

#[derive(Clone, Default, Debug)]
pub struct LabelArena { labels: Vec<Label> }

impl LabelArena {
    pub fn new() -> Self { Self::default() }

    pub fn alloc(&mut self, label: Label) -> LabelId {
        self.labels.push(label);
        LabelId(self.labels.len() - 1)
    }

    #[inline] pub fn get(&self, id: LabelId) -> &Label { &self.labels[id.0] }
    #[inline] pub fn len(&self) -> usize { self.labels.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// Node sequence from the chain's source to `id`'s node.
    pub fn path(&self, id: LabelId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let mut cur = Some(id);
        while let Some(l) = cur.map(|i| self.get(i)) {
            nodes.push(l.node);
            cur = l.predecessor;
        }
        nodes.reverse();
        nodes
    }

    /// Edge ids along the chain, source first.
    pub fn edges(&self, id: LabelId) -> Vec<EdgeId> {
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(l) = cur.map(|i| self.get(i)) {
            if let Some(e) = l.last_edge { out.push(e); }
            cur = l.predecessor;
        }
        out.reverse();
        out
    }
}

/// One slot per bucket per node; `None` is the unused bucket.
pub type Slots = Vec<Option<LabelId>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelStore { nodes: Vec<Slots> }

impl LabelStore {
    pub fn new(node_count: usize, bucket_count: usize) -> Self {
        Self { nodes: vec![vec![None; bucket_count]; node_count] }
    }

    #[inline] pub fn slots(&self, node: NodeId) -> &[Option<LabelId>] { &self.nodes[node] }
    #[inline] pub fn slots_mut(&mut self, node: NodeId) -> &mut Slots { &mut self.nodes[node] }

    /// Occupied `(bucket, label)` pairs of `node`.
    pub fn occupied(&self, node: NodeId) -> impl Iterator<Item = (usize, LabelId)> + '_ {
        self.nodes[node].iter().enumerate().filter_map(|(b, s)| s.map(|id| (b, id)))
    }

    /// Overwrite every node's slots from `other` without reallocating.
    pub fn copy_from(&mut self, other: &LabelStore) {
        for (dst, src) in self.nodes.iter_mut().zip(&other.nodes) { dst.copy_from_slice(src); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_set_extends_without_touching_parent() {
        let a = NodeSet::singleton(130, 3);
        let b = a.with(129);
        assert!(a.contains(3) && !a.contains(129));
        assert!(b.contains(3) && b.contains(129));
        assert!(!b.contains(500));
    }

    #[test]
    fn chain_reconstructs_path() {
        let mut arena = LabelArena::new();
        let s = arena.alloc(Label::source(3, 0));
        let l1 = {
            let p = arena.get(s).clone();
            arena.alloc(Label { x_total: 0, y_total: 5, node: 1, predecessor: Some(s), last_edge: Some(0), visited: p.visited.with(1) })
        };
        let l2 = {
            let p = arena.get(l1).clone();
            arena.alloc(Label { x_total: 2, y_total: 5, node: 2, predecessor: Some(l1), last_edge: Some(1), visited: p.visited.with(2) })
        };
        assert_eq!(arena.path(l2), vec![0, 1, 2]);
        assert_eq!(arena.edges(l2), vec![0, 1]);
        assert_eq!(arena.get(l2).value(), 3);
        assert_eq!(arena.path(s), vec![0]);
    }

    #[test]
    fn store_snapshot_is_independent() {
        let mut live = LabelStore::new(2, 4);
        let snap = live.clone();
        live.slots_mut(1)[2] = Some(LabelId(0));
        assert_ne!(live, snap);
        assert_eq!(live.occupied(1).collect::<Vec<_>>(), vec![(2, LabelId(0))]);
        let mut snap = snap;
        snap.copy_from(&live);
        assert_eq!(live, snap);
    }
}
