use lpath_core::generate::{random_cost_edges, random_edges, GraphSpec};
use lpath_core::io::{write_cost_edges, write_edges};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 { eprintln!("usage: generate_graph <nodes> <edges> [range] [seed] [out.csv] [--acyclic] [--costs]"); std::process::exit(1); }
    let nodes: usize = args[1].parse().expect("nodes");
    let edges: usize = args[2].parse().expect("edges");
    let weight_range: i64 = args.get(3).and_then(|v| v.parse().ok()).unwrap_or(10);
    let seed: u64 = args.get(4).and_then(|v| v.parse().ok()).unwrap_or(42);
    let out = args.get(5).filter(|a| !a.starts_with("--")).cloned().unwrap_or_else(|| "graph_data.csv".to_string());
    let acyclic = args.iter().any(|a| a == "--acyclic");
    let spec = GraphSpec { nodes, edges, weight_range, seed, acyclic };
    let costs = args.iter().any(|a| a == "--costs");
    let list = if costs { random_cost_edges(&spec) } else { random_edges(&spec) };
    let path = std::path::Path::new(&out);
    let written = if costs { write_cost_edges(path, &list) } else { write_edges(path, &list) };
    if let Err(e) = written { eprintln!("error: {e}"); std::process::exit(1); }
    println!("Graph data saved to {} with {} edges, source: 0 and destination: {}", out, list.len(), nodes.saturating_sub(1));
}
