//! Answer decoding over a node's final buckets: the best `Σy − Σx`, or the
//! best reward among labels whose penalty fits a budget.

use std::fmt;

use serde::Serialize;

use crate::cost::NodeId;
use crate::label::{LabelArena, LabelId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Best {
    pub value: i64,
    pub label: LabelId,
}

/// Largest `y_total − x_total` over occupied slots; the lowest bucket wins
/// ties. `None` when every slot is empty.
pub fn decode(arena: &LabelArena, slots: &[Option<LabelId>]) -> Option<Best> {
    let mut best: Option<Best> = None;
    for &id in slots.iter().flatten() {
        let value = arena.get(id).value();
        if best.map_or(true, |b| value > b.value) { best = Some(Best { value, label: id }); }
    }
    best
}

/// Largest `y_total` among labels with `x_total <= budget`. Ties go to the
/// smaller penalty, then the lowest bucket.
pub fn decode_within(arena: &LabelArena, slots: &[Option<LabelId>], budget: u64) -> Option<LabelId> {
    let mut best: Option<(u64, u64, LabelId)> = None;
    for &id in slots.iter().flatten() {
        let l = arena.get(id);
        if l.x_total > budget { continue; }
        let wins = match best {
            None => true,
            Some((y, x, _)) => l.y_total > y || (l.y_total == y && l.x_total < x),
        };
        if wins { best = Some((l.y_total, l.x_total, id)); }
    }
    best.map(|(_, _, id)| id)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    NoPath { source: NodeId, destination: NodeId },
    Longest { source: NodeId, destination: NodeId, value: i64, path: Vec<NodeId> },
    NoPathWithin { source: NodeId, destination: NodeId, budget: u64 },
    Budgeted { source: NodeId, destination: NodeId, budget: u64, reward: u64, penalty: u64, path: Vec<NodeId> },
}

impl Outcome {
    /// Signed path value `reward − penalty` of the reported path.
    pub fn value(&self) -> Option<i64> {
        match self {
            Outcome::Longest { value, .. } => Some(*value),
            Outcome::Budgeted { reward, penalty, .. } => Some((*reward as i128 - *penalty as i128) as i64),
            Outcome::NoPath { .. } | Outcome::NoPathWithin { .. } => None,
        }
    }

    pub fn path(&self) -> Option<&[NodeId]> {
        match self {
            Outcome::Longest { path, .. } | Outcome::Budgeted { path, .. } => Some(path),
            Outcome::NoPath { .. } | Outcome::NoPathWithin { .. } => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NoPath { source, destination } => write!(f, "No path from {} to {}", source, destination),
            Outcome::Longest { source, destination, value, .. } => write!(f, "Longest path from {} to {} is {}", source, destination, value),
            Outcome::NoPathWithin { source, destination, budget } => {
                write!(f, "No path from {} to {} within penalty budget {}", source, destination, budget)
            }
            Outcome::Budgeted { source, destination, budget, reward, penalty, .. } => write!(
                f,
                "Best path from {} to {} within penalty budget {} has reward {} and penalty {}",
                source, destination, budget, reward, penalty
            ),
        }
    }
}
