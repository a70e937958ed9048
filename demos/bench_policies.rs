use std::time::Instant;
use lpath_core::generate::{random_edges, GraphSpec};
use lpath_core::solver::{propagate, solve};
use lpath_core::{Graph, Query, Schedule, SolverConfig};
use std::fs::File; use std::io::Write;

fn run_one(nodes: usize, avg_degree: f32, weight_range: i64, epsilon: f64, seed: u64) -> serde_json::Value {
    let spec = GraphSpec { nodes, edges: (nodes as f32 * avg_degree) as usize, weight_range, seed, acyclic: false };
    let g = Graph::new(nodes, random_edges(&spec)).expect("generated graph");
    let q = Query::new(0, nodes - 1);
    let mut per = serde_json::Map::new();
    let mut values = Vec::new();
    for schedule in [Schedule::BoundedRounds, Schedule::ActiveSet] {
        let cfg = SolverConfig { epsilon, schedule, ..SolverConfig::default() };
        let t0 = Instant::now(); let sol = solve(&g, &q, &cfg).expect("solve"); let ms = t0.elapsed().as_secs_f64()*1000.0;
        values.push(sol.outcome.value());
        per.insert(schedule.to_string(), serde_json::json!({
            "ms": ms, "value": sol.outcome.value(), "rounds": sol.stats.rounds,
            "merges_examined": sol.stats.merges_examined, "cycle_skips": sol.stats.cycle_skips,
            "labels_replaced": sol.stats.labels_replaced, "labels_allocated": sol.stats.labels_allocated,
            "peak_active": sol.stats.peak_active
        }));
    }
    assert_eq!(values[0], values[1], "schedule parity fail n={} seed={}", nodes, seed);
    // full store parity, not just the decoded answer
    let stores: Vec<_> = [Schedule::BoundedRounds, Schedule::ActiveSet].iter().map(|&schedule| {
        let cfg = SolverConfig { epsilon, schedule, ..SolverConfig::default() };
        propagate(&g, &q, &cfg).expect("propagate").0.store
    }).collect();
    assert!(stores[0] == stores[1], "label store parity fail n={} seed={}", nodes, seed);
    serde_json::json!({
        "n": nodes, "m": g.edges().len(), "avg_degree": avg_degree, "epsilon": epsilon, "seed": seed,
        "schedules": per
    })
}

fn main(){
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a=="--help") { eprintln!("Usage: bench_policies --sizes 10,20,40 --degrees 2,4 --epsilon 0.5 --range 10 --seed 42 --out benchmarks/policies.json"); return; }
    let sizes_arg = args.iter().position(|a| a=="--sizes").and_then(|i| args.get(i+1)).cloned().unwrap_or("10,20,40".into());
    let degrees_arg = args.iter().position(|a| a=="--degrees").and_then(|i| args.get(i+1)).cloned().unwrap_or("2,4".into());
    let epsilon: f64 = args.iter().position(|a| a=="--epsilon").and_then(|i| args.get(i+1)).and_then(|v| v.parse().ok()).unwrap_or(0.5);
    let range: i64 = args.iter().position(|a| a=="--range").and_then(|i| args.get(i+1)).and_then(|v| v.parse().ok()).unwrap_or(10);
    let seed: u64 = args.iter().position(|a| a=="--seed").and_then(|i| args.get(i+1)).and_then(|v| v.parse().ok()).unwrap_or(42);
    let out_path = args.iter().position(|a| a=="--out").and_then(|i| args.get(i+1)).cloned().unwrap_or("benchmarks/policies.json".to_string());
    let sizes: Vec<usize> = sizes_arg.split(',').filter_map(|s| s.parse().ok()).filter(|&n| n >= 2).collect();
    let degrees: Vec<f32> = degrees_arg.split(',').filter_map(|s| s.parse().ok()).collect();
    let mut results = Vec::new();
    for &n in &sizes { for &deg in &degrees { results.push(run_one(n, deg, range, epsilon, seed)); } }
    let json = serde_json::Value::Array(results);
    if let Some(dir) = std::path::Path::new(&out_path).parent() { std::fs::create_dir_all(dir).ok(); }
    let mut f=File::create(&out_path).expect("create out"); f.write_all(serde_json::to_string_pretty(&json).unwrap().as_bytes()).unwrap();
    eprintln!("wrote {}", out_path);
}
