//! Flat CSV edge tables and result files.
//!
//! Input: one header line (ignored) then integer rows, either
//! `source,destination,weight` (signed) or `source,destination,reward,penalty`
//! (both non-negative). The first data row fixes the width for the file. Any
//! row with a different column count or a bad field aborts the whole read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::cost::{Edge, EdgeId};
use crate::error::{LpError, Result};
use crate::graph::Graph;
use crate::solver::Solution;

pub fn parse_edges<R: BufRead>(reader: R) -> Result<Vec<Edge>> {
    let mut edges = Vec::new();
    let mut width = None;
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|e| LpError::MalformedRow { line: line_no, reason: e.to_string() })?;
        if i == 0 || line.trim().is_empty() { continue; }
        let cols: Vec<&str> = line.split(',').map(str::trim).collect();
        let expected = *width.get_or_insert(if cols.len() == 4 { 4 } else { 3 });
        if cols.len() != expected {
            return Err(LpError::MalformedRow { line: line_no, reason: format!("expected {} columns, found {}", expected, cols.len()) });
        }
        let int = |idx: usize, name: &str| -> Result<i64> {
            cols[idx].parse::<i64>().map_err(|_| LpError::MalformedRow { line: line_no, reason: format!("{} `{}` is not an integer", name, cols[idx]) })
        };
        let node = |idx: usize, name: &str| -> Result<usize> {
            let v = int(idx, name)?;
            usize::try_from(v).map_err(|_| LpError::MalformedRow { line: line_no, reason: format!("{} {} is negative", name, v) })
        };
        let cost = |idx: usize, name: &str| -> Result<u64> {
            let v = int(idx, name)?;
            u64::try_from(v).map_err(|_| LpError::MalformedRow { line: line_no, reason: format!("{} {} is negative", name, v) })
        };
        let (s, d) = (node(0, "source")?, node(1, "destination")?);
        edges.push(if expected == 4 {
            Edge::with_costs(s, d, cost(2, "reward")?, cost(3, "penalty")?)
        } else {
            Edge::new(s, d, int(2, "weight")?)
        });
    }
    Ok(edges)
}

pub fn read_edges(path: &Path) -> Result<Vec<Edge>> {
    let file = File::open(path).map_err(|e| LpError::io(path, e))?;
    let edges = parse_edges(BufReader::new(file))?;
    tracing::info!(path = %path.display(), edges = edges.len(), "edge list loaded");
    Ok(edges)
}

/// Write edges back with their signed weights.
pub fn write_edges(path: &Path, edges: &[Edge]) -> Result<()> {
    let file = File::create(path).map_err(|e| LpError::io(path, e))?;
    let mut w = BufWriter::new(file);
    let io = |e: std::io::Error| LpError::io(path, e);
    writeln!(w, "source,destination,weight").map_err(io)?;
    for e in edges {
        writeln!(w, "{},{},{}", e.source, e.destination, e.weight()).map_err(io)?;
    }
    w.flush().map_err(io)
}

/// Write edges as `source,destination,reward,penalty`.
pub fn write_cost_edges(path: &Path, edges: &[Edge]) -> Result<()> {
    let file = File::create(path).map_err(|e| LpError::io(path, e))?;
    let mut w = BufWriter::new(file);
    let io = |e: std::io::Error| LpError::io(path, e);
    writeln!(w, "source,destination,reward,penalty").map_err(io)?;
    for e in edges {
        writeln!(w, "{},{},{},{}", e.source, e.destination, e.y, e.x).map_err(io)?;
    }
    w.flush().map_err(io)
}

/// Per-edge reward and penalty of a path, followed by the two sums.
pub fn path_details(graph: &Graph, edges: &[EdgeId]) -> String {
    let mut out = String::from("Detailed path information:\n");
    let (mut reward, mut penalty) = (0u64, 0u64);
    for &id in edges {
        let e = graph.edge(id);
        out.push_str(&format!("  {} -> {}: +{} (reward), {} (penalty)\n", e.source, e.destination, e.y, e.x));
        reward += e.y;
        penalty += e.x;
    }
    out.push_str(&format!("Sum of rewards: {}\nSum of penalties: {}\n", reward, penalty));
    out
}

/// Write the single result line.
pub fn write_outcome(path: &Path, solution: &Solution) -> Result<()> {
    std::fs::write(path, format!("{}\n", solution.outcome)).map_err(|e| LpError::io(path, e))
}

pub fn write_report_json(path: &Path, solution: &Solution) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| LpError::io(dir, e))?;
    }
    let json = serde_json::to_string_pretty(solution)?;
    std::fs::write(path, json).map_err(|e| LpError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_after_header() {
        let text = "src,dest,weight\n0,1,5\n 1 , 2 , -2\n\n0,2,1\n";
        let edges = parse_edges(text.as_bytes()).unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!((edges[1].source, edges[1].destination, edges[1].weight()), (1, 2, -2));
        assert_eq!((edges[1].x, edges[1].y), (2, 0));
    }

    #[test]
    fn reward_penalty_rows() {
        let edges = parse_edges("source,target,reward,penalty\n0,1,8,4\n1,2,0,3\n".as_bytes()).unwrap();
        assert_eq!((edges[0].y, edges[0].x), (8, 4));
        assert_eq!((edges[1].y, edges[1].x), (0, 3));
        let err = parse_edges("h\n0,1,8,4\n1,2,5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LpError::MalformedRow { line: 3, .. }));
        let err = parse_edges("h\n0,1,8,-4\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("penalty"));
    }

    #[test]
    fn extreme_weights_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        let edges = vec![Edge::new(0, 1, i64::MIN), Edge::new(1, 0, i64::MAX), Edge::new(1, 2, 0)];
        write_edges(&path, &edges).unwrap();
        assert_eq!(read_edges(&path).unwrap(), edges);

        let costs = vec![Edge::with_costs(0, 1, 8, 4), Edge::with_costs(1, 2, 0, 0)];
        write_cost_edges(&path, &costs).unwrap();
        assert_eq!(read_edges(&path).unwrap(), costs);
    }

    #[test]
    fn details_list_each_hop() {
        let g = Graph::new(3, vec![Edge::with_costs(0, 1, 8, 4), Edge::with_costs(1, 2, 2, 1)]).unwrap();
        let text = path_details(&g, &[0, 1]);
        assert!(text.contains("  0 -> 1: +8 (reward), 4 (penalty)\n"));
        assert!(text.ends_with("Sum of rewards: 10\nSum of penalties: 5\n"));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(parse_edges("a,b,c\n".as_bytes()).unwrap().is_empty());
        assert!(parse_edges("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn malformed_rows_fail_fast() {
        let err = parse_edges("h\n0,1,2\n0,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LpError::MalformedRow { line: 3, .. }));
        let err = parse_edges("h\n0,x,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LpError::MalformedRow { line: 2, .. }));
        let err = parse_edges("h\n-1,0,2\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("negative"));
        let err = parse_edges("h\n0,1,2.5\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_edges(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LpError::Io { .. }));
    }
}
