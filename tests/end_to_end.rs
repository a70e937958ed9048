use std::fs;

use lpath_core::generate::{random_edges, GraphSpec};
use lpath_core::io::{read_edges, write_edges, write_outcome, write_report_json};
use lpath_core::{solve, Graph, LpError, Query, Schedule, SolverConfig};

#[test]
fn csv_to_result_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("graph_data.csv");
    fs::write(&input, "src,dest,weight\n0,1,5\n1,2,-2\n0,2,1\n").unwrap();

    let edges = read_edges(&input).unwrap();
    let g = Graph::new(3, edges).unwrap();
    let sol = solve(&g, &Query::new(0, 2), &SolverConfig::default()).unwrap();

    let out = dir.path().join("result.txt");
    write_outcome(&out, &sol).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "Longest path from 0 to 2 is 3\n");

    let report = dir.path().join("nested/report.json");
    write_report_json(&report, &sol).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(v["outcome"]["kind"], "longest");
    assert_eq!(v["outcome"]["value"], 3);
    assert_eq!(v["outcome"]["path"], serde_json::json!([0, 1, 2]));
    assert_eq!(v["stats"]["schedule"], "bounded_rounds");
    assert_eq!(v["stats"]["bucket_count"], 17);
}

#[test]
fn generated_graph_survives_disk_and_solves_alike() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gen.csv");
    let spec = GraphSpec { nodes: 8, edges: 24, weight_range: 6, seed: 11, acyclic: false };
    let edges = random_edges(&spec);
    write_edges(&path, &edges).unwrap();
    let back = read_edges(&path).unwrap();
    assert_eq!(back, edges);

    let g = Graph::new(spec.nodes, back).unwrap();
    let q = Query::new(0, spec.nodes - 1);
    let a = solve(&g, &q, &SolverConfig { schedule: Schedule::ActiveSet, ..SolverConfig::default() }).unwrap();
    let b = solve(&g, &q, &SolverConfig::default()).unwrap();
    assert_eq!(a.outcome, b.outcome);
}

#[test]
fn edge_outside_declared_node_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "s,d,w\n0,1,1\n1,5,2\n").unwrap();
    let err = Graph::new(3, read_edges(&input).unwrap()).unwrap_err();
    assert!(matches!(err, LpError::InvalidEdge { index: 1, .. }));
}

#[test]
fn reward_penalty_csv_with_budget() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rewards.csv");
    fs::write(&input, "source,target,reward,penalty\n0,1,8,4\n1,3,4,2\n0,2,3,1\n2,3,2,0\n").unwrap();
    let g = Graph::new(4, read_edges(&input).unwrap()).unwrap();
    let sol = solve(&g, &Query::new(0, 3).within(5), &SolverConfig::default()).unwrap();
    assert_eq!(sol.outcome.to_string(), "Best path from 0 to 3 within penalty budget 5 has reward 5 and penalty 1");

    let report = dir.path().join("report.json");
    write_report_json(&report, &sol).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(v["outcome"]["kind"], "budgeted");
    assert_eq!(v["outcome"]["path"], serde_json::json!([0, 2, 3]));
    assert_eq!(v["edges"], serde_json::json!([2, 3]));
}
