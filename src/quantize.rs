//! Epsilon discretisation of the accumulated penalty axis.
//!
//! The user-facing epsilon is rescaled once, `delta = epsilon / (V − 1)`, so
//! the rounding error summed over the at most `V − 1` edges of a simple path
//! stays within epsilon. The bucket array is sized from the largest penalty
//! any simple path can accumulate, `max_x · (V − 1)`, or from the penalty
//! budget when that is smaller. Each store holds `V × bucket_count` slots.

use crate::error::{LpError, Result};
use crate::graph::Graph;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quantizer {
    epsilon: f64,
    delta: f64,
    x_bound: u64,
    bucket_count: usize,
}

impl Quantizer {
    /// Size the buckets for `graph`. `penalty_cap` lowers the penalty bound
    /// to a budget; `max_slots` limits `node_count × bucket_count`.
    pub fn new(epsilon: f64, graph: &Graph, penalty_cap: Option<u64>, max_slots: usize) -> Result<Self> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(LpError::InvalidEpsilon(epsilon));
        }
        let hops = graph.node_count().saturating_sub(1).max(1) as u64;
        let delta = epsilon / hops as f64;
        let x_bound = graph.max_x().checked_mul(hops)
            .ok_or_else(|| LpError::SizingOverflow(format!("max penalty {} x {} hops overflows u64", graph.max_x(), hops)))?;
        let y_bound = graph.max_y().checked_mul(hops)
            .ok_or_else(|| LpError::SizingOverflow(format!("max reward {} x {} hops overflows u64", graph.max_y(), hops)))?;
        if x_bound > i64::MAX as u64 || y_bound > i64::MAX as u64 {
            return Err(LpError::SizingOverflow("accumulated path cost exceeds i64 range".into()));
        }
        let x_bound = penalty_cap.map_or(x_bound, |cap| x_bound.min(cap));
        let last = (x_bound as f64 / delta).floor();
        if !last.is_finite() || last >= max_slots as f64 {
            return Err(LpError::SizingOverflow(format!(
                "{} buckets needed per node (x bound {}, delta {}), slot limit is {}", last, x_bound, delta, max_slots
            )));
        }
        let bucket_count = last as usize + 1;
        match graph.node_count().checked_mul(bucket_count) {
            Some(slots) if slots <= max_slots => {}
            _ => {
                return Err(LpError::SizingOverflow(format!(
                    "{} nodes x {} buckets exceeds slot limit {}", graph.node_count(), bucket_count, max_slots
                )))
            }
        }
        Ok(Self { epsilon, delta, x_bound, bucket_count })
    }

    /// Whether a chain with this accumulated penalty fits the sized range.
    #[inline]
    pub fn admits(&self, x_total: u64) -> bool { x_total <= self.x_bound }

    /// `floor(x_total / delta)`.
    #[inline]
    pub fn bucket_of(&self, x_total: u64) -> usize {
        debug_assert!(x_total <= self.x_bound, "x_total {} beyond sized bound {}", x_total, self.x_bound);
        (x_total as f64 / self.delta).floor() as usize
    }

    #[inline] pub fn epsilon(&self) -> f64 { self.epsilon }
    #[inline] pub fn delta(&self) -> f64 { self.delta }
    #[inline] pub fn x_bound(&self) -> u64 { self.x_bound }
    #[inline] pub fn bucket_count(&self) -> usize { self.bucket_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph { Graph::from_weighted(3, &[(0, 1, 5), (1, 2, -2), (0, 2, 1)]).unwrap() }

    #[test]
    fn rescales_and_sizes() {
        let q = Quantizer::new(0.5, &triangle(), None, 1 << 20).unwrap();
        assert_eq!(q.delta(), 0.25);
        assert_eq!(q.x_bound(), 4);
        assert_eq!(q.bucket_count(), 17);
        assert_eq!(q.bucket_of(0), 0);
        assert_eq!(q.bucket_of(2), 8);
        assert_eq!(q.bucket_of(4), 16);
    }

    #[test]
    fn all_positive_weights_need_one_bucket() {
        let g = Graph::from_weighted(4, &[(0, 1, 3), (1, 2, 8)]).unwrap();
        let q = Quantizer::new(0.01, &g, None, 8).unwrap();
        assert_eq!(q.bucket_count(), 1);
    }

    #[test]
    fn coarse_epsilon_shares_buckets() {
        let q = Quantizer::new(4.0, &triangle(), None, 64).unwrap();
        assert_eq!(q.delta(), 2.0);
        assert_eq!(q.bucket_of(1), 0);
        assert_eq!(q.bucket_of(3), 1);
    }

    #[test]
    fn rejects_bad_epsilon_and_oversize() {
        let g = triangle();
        for eps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(Quantizer::new(eps, &g, None, 1024), Err(LpError::InvalidEpsilon(_))));
        }
        assert!(matches!(Quantizer::new(0.5, &g, None, 16), Err(LpError::SizingOverflow(_))));
        let huge = Graph::from_weighted(3, &[(0, 1, i64::MIN + 1), (1, 2, -1)]).unwrap();
        assert!(matches!(Quantizer::new(1.0, &huge, None, usize::MAX), Err(LpError::SizingOverflow(_))));
    }

    #[test]
    fn slot_limit_counts_every_node() {
        // 17 buckets per node fit a 17-slot limit alone, but not across 3 nodes
        assert!(matches!(Quantizer::new(0.5, &triangle(), None, 17), Err(LpError::SizingOverflow(_))));
        assert_eq!(Quantizer::new(0.5, &triangle(), None, 51).unwrap().bucket_count(), 17);

        let edges: Vec<(usize, usize, i64)> = (0..99).map(|u| (u, u + 1, -10)).collect();
        let long = Graph::from_weighted(100, &edges).unwrap();
        let err = Quantizer::new(0.01, &long, None, crate::SolverConfig::default().max_slots).unwrap_err();
        assert!(matches!(err, LpError::SizingOverflow(_)));
    }

    #[test]
    fn penalty_cap_shrinks_the_range() {
        let q = Quantizer::new(0.5, &triangle(), Some(1), 1 << 10).unwrap();
        assert_eq!(q.x_bound(), 1);
        assert_eq!(q.bucket_count(), 5);
        assert!(q.admits(1) && !q.admits(2));
        let q = Quantizer::new(0.5, &triangle(), Some(100), 1 << 10).unwrap();
        assert_eq!(q.x_bound(), 4);
    }
}
