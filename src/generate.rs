//! Deterministic random graphs for demos and tests, with signed weights or
//! with independent reward/penalty pairs.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cost::Edge;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: usize,
    pub edges: usize,
    /// Weights are drawn uniformly from `-weight_range..=weight_range`.
    pub weight_range: i64,
    pub seed: u64,
    /// Only emit `u -> v` with `u < v`.
    pub acyclic: bool,
}

impl Default for GraphSpec {
    fn default() -> Self { Self { nodes: 20, edges: 100, weight_range: 10, seed: 42, acyclic: false } }
}

/// Random edge list with no self-loops and no repeated `(u, v)` pair.
/// Fewer than `spec.edges` edges come back when the graph saturates.
pub fn random_edges(spec: &GraphSpec) -> Vec<Edge> {
    let r = spec.weight_range;
    sample_edges(spec, |rng, u, v| Edge::new(u, v, rng.gen_range(-r..=r)))
}

/// Like [`random_edges`], but each edge carries a reward and a penalty, both
/// drawn from `0..=weight_range`.
pub fn random_cost_edges(spec: &GraphSpec) -> Vec<Edge> {
    let r = spec.weight_range.unsigned_abs();
    sample_edges(spec, |rng, u, v| Edge::with_costs(u, v, rng.gen_range(0..=r), rng.gen_range(0..=r)))
}

fn sample_edges<F: FnMut(&mut SmallRng, usize, usize) -> Edge>(spec: &GraphSpec, mut make: F) -> Vec<Edge> {
    let n = spec.nodes;
    if n < 2 { return Vec::new(); }
    let pairs = if spec.acyclic { n * (n - 1) / 2 } else { n * (n - 1) };
    let target = spec.edges.min(pairs);
    let mut rng = SmallRng::seed_from_u64(spec.seed);
    let mut seen = HashSet::with_capacity(target);
    let mut out = Vec::with_capacity(target);
    let mut attempts = 0usize;
    let attempt_limit = target * 20 + 1000;
    while out.len() < target && attempts < attempt_limit {
        attempts += 1;
        let (mut u, mut v) = (rng.gen_range(0..n), rng.gen_range(0..n));
        if u == v { continue; }
        if spec.acyclic && u > v { std::mem::swap(&mut u, &mut v); }
        if !seen.insert((u, v)) { continue; }
        out.push(make(&mut rng, u, v));
    }
    out
}
