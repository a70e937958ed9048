//! Extend-and-Merge: the single relaxation primitive.
//!
//! Every predecessor label is pushed across one edge and merged into the
//! destination's bucket for its new penalty. A bucket is replaced only by a
//! strictly larger reward, so equal candidates keep the first-seen label and
//! bucket rewards never decrease. Candidates whose penalty leaves the sized
//! range (only possible under a penalty budget) are dropped.

use crate::cost::{Edge, EdgeId};
use crate::label::{Label, LabelArena, LabelId};
use crate::quantize::Quantizer;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub examined: u64,    // non-empty predecessor labels looked at
    pub cycle_skips: u64, // skipped because the chain already visits the destination
    pub replaced: u64,    // destination buckets overwritten
    pub over_budget: u64, // penalty beyond the quantizer's bound
}

impl MergeOutcome {
    #[inline] pub fn changed(&self) -> bool { self.replaced > 0 }

    pub fn absorb(&mut self, o: MergeOutcome) {
        self.examined += o.examined;
        self.cycle_skips += o.cycle_skips;
        self.replaced += o.replaced;
        self.over_budget += o.over_budget;
    }
}

/// Merge `pred` (the edge source's slots, read-only) across `edge` into
/// `dest` (the edge destination's live slots).
pub fn extend_and_merge(
    arena: &mut LabelArena,
    dest: &mut [Option<LabelId>],
    pred: &[Option<LabelId>],
    edge_id: EdgeId,
    edge: &Edge,
    quant: &Quantizer,
) -> MergeOutcome {
    let mut out = MergeOutcome::default();
    for &pid in pred.iter().flatten() {
        out.examined += 1;
        let p = arena.get(pid);
        if p.visited.contains(edge.destination) { out.cycle_skips += 1; continue; }
        let x_total = p.x_total + edge.x;
        let y_total = p.y_total + edge.y;
        if !quant.admits(x_total) { out.over_budget += 1; continue; }
        let b = quant.bucket_of(x_total);
        let better = match dest[b] { None => true, Some(cur) => arena.get(cur).y_total < y_total };
        if !better { continue; }
        let label = Label { x_total, y_total, node: edge.destination, predecessor: Some(pid), last_edge: Some(edge_id), visited: p.visited.with(edge.destination) };
        let id = arena.alloc(label);
        tracing::trace!(edge = edge_id, bucket = b, x_total, y_total, "bucket replaced");
        dest[b] = Some(id);
        out.replaced += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn setup(g: &Graph, eps: f64) -> (LabelArena, Quantizer, LabelId) {
        let q = Quantizer::new(eps, g, None, 1 << 16).unwrap();
        let mut arena = LabelArena::new();
        let s = arena.alloc(Label::source(g.node_count(), 0));
        (arena, q, s)
    }

    #[test]
    fn extends_into_empty_bucket() {
        let g = Graph::from_weighted(3, &[(0, 1, 5), (1, 2, -2), (0, 2, 1)]).unwrap();
        let (mut arena, q, s) = setup(&g, 0.5);
        let mut pred = vec![None; q.bucket_count()];
        pred[0] = Some(s);
        let mut dest = vec![None; q.bucket_count()];
        let o = extend_and_merge(&mut arena, &mut dest, &pred, 0, g.edge(0), &q);
        assert_eq!(o, MergeOutcome { examined: 1, replaced: 1, ..MergeOutcome::default() });
        let id = dest[0].unwrap();
        assert_eq!(arena.get(id).y_total, 5);
        assert_eq!(arena.get(id).predecessor, Some(s));
        assert!(arena.get(id).visited.contains(0) && arena.get(id).visited.contains(1));
    }

    #[test]
    fn equal_or_lower_reward_keeps_incumbent() {
        // two parallel edges 0->1 with rewards 4 and 4, then 3
        let g = Graph::from_weighted(2, &[(0, 1, 4), (0, 1, 4), (0, 1, 3), (0, 1, 6)]).unwrap();
        let (mut arena, q, s) = setup(&g, 1.0);
        let pred = vec![Some(s); 1];
        let mut dest = vec![None; q.bucket_count()];
        extend_and_merge(&mut arena, &mut dest, &pred, 0, g.edge(0), &q);
        let first = dest[0];
        for e in [1, 2] {
            let o = extend_and_merge(&mut arena, &mut dest, &pred, e, g.edge(e), &q);
            assert!(!o.changed());
            assert_eq!(dest[0], first);
        }
        let o = extend_and_merge(&mut arena, &mut dest, &pred, 3, g.edge(3), &q);
        assert!(o.changed());
        assert_eq!(arena.get(dest[0].unwrap()).y_total, 6);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn skips_labels_already_through_destination() {
        let g = Graph::from_weighted(2, &[(0, 1, 2), (1, 0, 9)]).unwrap();
        let (mut arena, q, s) = setup(&g, 1.0);
        let mut at1 = vec![None; q.bucket_count()];
        extend_and_merge(&mut arena, &mut at1, &[Some(s)], 0, g.edge(0), &q);
        let mut at0 = vec![Some(s)];
        let o = extend_and_merge(&mut arena, &mut at0, &at1, 1, g.edge(1), &q);
        assert_eq!(o, MergeOutcome { examined: 1, cycle_skips: 1, ..MergeOutcome::default() });
        assert_eq!(at0, vec![Some(s)]);
    }

    #[test]
    fn drops_candidates_over_the_penalty_cap() {
        let g = Graph::from_weighted(3, &[(0, 1, -3), (0, 1, -1)]).unwrap();
        let q = Quantizer::new(1.0, &g, Some(2), 1 << 10).unwrap();
        let mut arena = LabelArena::new();
        let s = arena.alloc(Label::source(3, 0));
        let mut dest = vec![None; q.bucket_count()];
        let o = extend_and_merge(&mut arena, &mut dest, &[Some(s)], 0, g.edge(0), &q);
        assert_eq!(o, MergeOutcome { examined: 1, over_budget: 1, ..MergeOutcome::default() });
        let o = extend_and_merge(&mut arena, &mut dest, &[Some(s)], 1, g.edge(1), &q);
        assert!(o.changed());
        assert_eq!(arena.get(dest[q.bucket_of(1)].unwrap()).x_total, 1);
    }
}
