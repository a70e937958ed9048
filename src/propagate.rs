//! Propagation driver: repeats Extend-and-Merge until no bucket changes.
//!
//! Both schedules share one round structure. Every round reads predecessor
//! slots from the snapshot taken at the end of the previous round and writes
//! into the live store, visiting destinations in [`NodeOrder`] and their
//! incoming edges in input order.
//!
//! * [`Schedule::BoundedRounds`] relaxes every edge each round, for at most
//!   `V − 1` rounds (multi-criteria Bellman-Ford).
//! * [`Schedule::ActiveSet`] relaxes only edges whose source changed in the
//!   previous round. Any other edge would re-merge labels that were already
//!   merged the round after they were placed, which can never win a bucket
//!   again, so both schedules end with identical stores and arenas.
//!
//! A label placed in round `r` has exactly `r + 1` edges, and no simple path
//! has more than `V − 1`, so the `V − 1` round cap never drops work. A run
//! that reaches the cap still relaxes every edge once more against the final
//! store to confirm it ([`RunStats::settled`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cost::NodeId;
use crate::error::{LpError, Result};
use crate::graph::Graph;
use crate::label::{Label, LabelArena, LabelStore};
use crate::merge::{extend_and_merge, MergeOutcome};
use crate::quantize::Quantizer;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    #[default]
    BoundedRounds,
    ActiveSet,
}

impl Schedule {
    /// C ABI encoding: 0 bounded rounds, 1 active set.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Schedule::BoundedRounds),
            1 => Ok(Schedule::ActiveSet),
            other => Err(LpError::InvalidSchedule(other.to_string())),
        }
    }
}

impl FromStr for Schedule {
    type Err = LpError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bounded" | "bounded_rounds" | "rounds" => Ok(Schedule::BoundedRounds),
            "active" | "active_set" | "worklist" => Ok(Schedule::ActiveSet),
            other => Err(LpError::InvalidSchedule(other.to_string())),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Schedule::BoundedRounds => "bounded", Schedule::ActiveSet => "active" })
    }
}

/// Destination visiting order: source first, destination last, every other
/// id ascending in between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeOrder(Vec<NodeId>);

impl NodeOrder {
    pub fn new(node_count: usize, source: NodeId, destination: NodeId) -> Self {
        let mut order = Vec::with_capacity(node_count);
        order.push(source);
        order.extend((0..node_count).filter(|&v| v != source && v != destination));
        if destination != source { order.push(destination); }
        NodeOrder(order)
    }

    #[inline] pub fn as_slice(&self) -> &[NodeId] { &self.0 }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub schedule: Schedule,
    pub rounds: u32,
    pub merges_examined: u64,
    pub cycle_skips: u64,
    pub labels_replaced: u64,
    pub over_budget: u64,
    pub labels_allocated: u64,
    pub bucket_count: usize,
    pub peak_active: usize, // largest number of source nodes relaxed in one round
    /// No further relaxation of any edge changes a bucket.
    pub settled: bool,
}

/// Final state of a propagation run.
#[derive(Debug)]
pub struct Propagation {
    pub arena: LabelArena,
    pub store: LabelStore,
    pub stats: RunStats,
}

pub struct Propagator<'g> {
    graph: &'g Graph,
    quant: Quantizer,
    order: NodeOrder,
    schedule: Schedule,
}

impl<'g> Propagator<'g> {
    pub fn new(graph: &'g Graph, quant: Quantizer, order: NodeOrder, schedule: Schedule) -> Self {
        Self { graph, quant, order, schedule }
    }

    pub fn run(&self, source: NodeId) -> Propagation {
        let n = self.graph.node_count();
        let mut arena = LabelArena::new();
        let mut live = LabelStore::new(n, self.quant.bucket_count());
        let root = arena.alloc(Label::source(n, source));
        live.slots_mut(source)[0] = Some(root);
        let mut snapshot = live.clone();

        let mut active = vec![self.schedule == Schedule::BoundedRounds; n];
        active[source] = true;
        let mut stats = RunStats { schedule: self.schedule, bucket_count: self.quant.bucket_count(), ..RunStats::default() };
        info!(nodes = n, edges = self.graph.edges().len(), buckets = self.quant.bucket_count(), delta = self.quant.delta(), schedule = %self.schedule, "propagation start");

        let mut settled = false;
        for round in 0..n.saturating_sub(1) {
            stats.peak_active = stats.peak_active.max(active.iter().filter(|&&a| a).count());
            let mut changed = vec![false; n];
            let mut totals = MergeOutcome::default();
            for &node in self.order.as_slice() {
                for &e in self.graph.incoming(node) {
                    let edge = self.graph.edge(e);
                    if !active[edge.source] { continue; }
                    let o = extend_and_merge(&mut arena, live.slots_mut(node), snapshot.slots(edge.source), e, edge, &self.quant);
                    changed[node] |= o.changed();
                    totals.absorb(o);
                }
            }
            stats.rounds += 1;
            stats.merges_examined += totals.examined;
            stats.cycle_skips += totals.cycle_skips;
            stats.labels_replaced += totals.replaced;
            stats.over_budget += totals.over_budget;
            let n_changed = changed.iter().filter(|&&c| c).count();
            debug!(round, changed = n_changed, replaced = totals.replaced, examined = totals.examined, "round complete");
            if n_changed == 0 { settled = true; break; }
            snapshot.copy_from(&live);
            if self.schedule == Schedule::ActiveSet { active = changed; }
        }

        stats.labels_allocated = arena.len() as u64;
        let mut run = Propagation { arena, store: live, stats };
        run.stats.settled = settled || self.is_settled(&run);
        if !run.stats.settled {
            warn!(rounds = run.stats.rounds, "round cap reached with buckets still improving");
        }
        info!(rounds = run.stats.rounds, labels = run.stats.labels_allocated, settled = run.stats.settled, "propagation done");
        run
    }

    /// Relax every edge once more against `run`'s final store, reading and
    /// writing copies. `true` when no bucket would change.
    pub fn is_settled(&self, run: &Propagation) -> bool {
        let mut arena = run.arena.clone();
        let mut live = run.store.clone();
        for &node in self.order.as_slice() {
            for &e in self.graph.incoming(node) {
                let edge = self.graph.edge(e);
                let o = extend_and_merge(&mut arena, live.slots_mut(node), run.store.slots(edge.source), e, edge, &self.quant);
                if o.changed() { return false; }
            }
        }
        true
    }
}
