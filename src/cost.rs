//! Signed weight -> non-negative bicriteria cost pair.
//!
//! A negative weight becomes penalty `x = |w|`, a non-negative weight becomes
//! reward `y = w`. The signed path value is recovered as `Σy − Σx`.

use serde::{Deserialize, Serialize};

pub type NodeId = usize;
pub type EdgeId = usize;

/// Split `w` into `(x, y) = (max(0,−w), max(0,w))`.
#[inline]
pub fn decompose(w: i64) -> (u64, u64) {
    if w < 0 { (w.unsigned_abs(), 0) } else { (0, w as u64) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub destination: NodeId,
    pub x: u64,
    pub y: u64,
}

impl Edge {
    pub fn new(source: NodeId, destination: NodeId, weight: i64) -> Self {
        let (x, y) = decompose(weight);
        Self { source, destination, x, y }
    }

    /// Edge with an explicit reward and penalty, both possibly non-zero.
    pub fn with_costs(source: NodeId, destination: NodeId, reward: u64, penalty: u64) -> Self {
        Self { source, destination, x: penalty, y: reward }
    }

    /// Signed weight `y − x`; exact for every decomposed weight, `i64::MIN` included.
    #[inline]
    pub fn weight(&self) -> i64 { (self.y as i128 - self.x as i128) as i64 }
}
