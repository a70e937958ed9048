//! Immutable edge list with per-node incoming/outgoing indices.

use std::collections::VecDeque;

use crate::cost::{Edge, EdgeId, NodeId};
use crate::error::{LpError, Result};

#[derive(Clone, Debug)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
    incoming: Vec<Vec<EdgeId>>, // per destination, input order
    outgoing: Vec<Vec<EdgeId>>, // per source, input order
}

impl Graph {
    /// Build from an edge list, rejecting endpoints outside `0..node_count`.
    pub fn new(node_count: usize, edges: Vec<Edge>) -> Result<Self> {
        if node_count == 0 { return Err(LpError::EmptyGraph); }
        let mut incoming = vec![Vec::new(); node_count];
        let mut outgoing = vec![Vec::new(); node_count];
        for (index, e) in edges.iter().enumerate() {
            if e.source >= node_count || e.destination >= node_count {
                return Err(LpError::InvalidEdge { index, source_node: e.source, destination: e.destination, node_count });
            }
            incoming[e.destination].push(index);
            outgoing[e.source].push(index);
        }
        Ok(Self { node_count, edges, incoming, outgoing })
    }

    /// Convenience constructor from `(source, destination, weight)` triples.
    pub fn from_weighted(node_count: usize, triples: &[(NodeId, NodeId, i64)]) -> Result<Self> {
        let edges = triples.iter().map(|&(s, d, w)| Edge::new(s, d, w)).collect();
        Self::new(node_count, edges)
    }

    #[inline] pub fn node_count(&self) -> usize { self.node_count }
    #[inline] pub fn edges(&self) -> &[Edge] { &self.edges }
    #[inline] pub fn edge(&self, id: EdgeId) -> &Edge { &self.edges[id] }
    #[inline] pub fn incoming(&self, node: NodeId) -> &[EdgeId] { &self.incoming[node] }
    #[inline] pub fn outgoing(&self, node: NodeId) -> &[EdgeId] { &self.outgoing[node] }

    /// Largest single-edge penalty.
    pub fn max_x(&self) -> u64 { self.edges.iter().map(|e| e.x).max().unwrap_or(0) }

    /// Largest single-edge reward.
    pub fn max_y(&self) -> u64 { self.edges.iter().map(|e| e.y).max().unwrap_or(0) }

    /// Nodes reachable from `source` ignoring weights.
    pub fn reachable_from(&self, source: NodeId) -> Vec<bool> {
        let mut seen = vec![false; self.node_count];
        if source >= self.node_count { return seen; }
        let mut queue = VecDeque::from([source]);
        seen[source] = true;
        while let Some(u) = queue.pop_front() {
            for &e in &self.outgoing[u] {
                let v = self.edges[e].destination;
                if !seen[v] { seen[v] = true; queue.push_back(v); }
            }
        }
        seen
    }
}
