//! Top-level entry: validate, size, propagate, decode.

use serde::Serialize;
use tracing::info;

use crate::config::SolverConfig;
use crate::cost::{EdgeId, NodeId};
use crate::decode::{decode, decode_within, Outcome};
use crate::error::{LpError, Result};
use crate::graph::Graph;
use crate::propagate::{NodeOrder, Propagation, Propagator, RunStats};
use crate::quantize::Quantizer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub source: NodeId,
    pub destination: NodeId,
    /// Penalty budget: maximise reward over paths with `Σx <= budget`
    /// instead of maximising `Σy − Σx`.
    pub budget: Option<u64>,
}

impl Query {
    pub fn new(source: NodeId, destination: NodeId) -> Self { Self { source, destination, budget: None } }

    pub fn within(self, budget: u64) -> Self { Self { budget: Some(budget), ..self } }

    pub fn validate(&self, node_count: usize) -> Result<()> {
        if self.source >= node_count {
            return Err(LpError::InvalidNode { role: "source", node: self.source, node_count });
        }
        if self.destination >= node_count {
            return Err(LpError::InvalidNode { role: "destination", node: self.destination, node_count });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Solution {
    pub outcome: Outcome,
    pub epsilon: f64,
    pub delta: f64,
    pub stats: RunStats,
    /// Edge ids of the reported path, source first; empty without a path.
    pub edges: Vec<EdgeId>,
}

/// Run propagation only, returning the final arena and store.
pub fn propagate(graph: &Graph, query: &Query, config: &SolverConfig) -> Result<(Propagation, Quantizer)> {
    config.validate()?;
    query.validate(graph.node_count())?;
    let quant = Quantizer::new(config.epsilon, graph, query.budget, config.max_slots)?;
    let order = NodeOrder::new(graph.node_count(), query.source, query.destination);
    let run = Propagator::new(graph, quant, order, config.schedule).run(query.source);
    Ok((run, quant))
}

pub fn solve(graph: &Graph, query: &Query, config: &SolverConfig) -> Result<Solution> {
    let (run, quant) = propagate(graph, query, config)?;
    let Query { source, destination, budget } = *query;
    let slots = run.store.slots(destination);
    let (outcome, label) = match budget {
        None => match decode(&run.arena, slots) {
            Some(best) => (Outcome::Longest { source, destination, value: best.value, path: run.arena.path(best.label) }, Some(best.label)),
            None => (Outcome::NoPath { source, destination }, None),
        },
        Some(budget) => match decode_within(&run.arena, slots, budget) {
            Some(id) => {
                let l = run.arena.get(id);
                let outcome = Outcome::Budgeted { source, destination, budget, reward: l.y_total, penalty: l.x_total, path: run.arena.path(id) };
                (outcome, Some(id))
            }
            None => (Outcome::NoPathWithin { source, destination, budget }, None),
        },
    };
    let edges = label.map(|id| run.arena.edges(id)).unwrap_or_default();
    info!(%outcome, "solved");
    Ok(Solution { outcome, epsilon: quant.epsilon(), delta: quant.delta(), stats: run.stats, edges })
}
