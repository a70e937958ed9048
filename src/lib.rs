//! Epsilon-approximate single-source longest paths on signed-weight digraphs,
//! exposed as a Rust library and a stable C ABI.
//!
//! Every weight `w` is split into a penalty/reward pair `(max(0,−w), max(0,w))`
//! and the problem becomes bicriteria: per node keep, for each penalty bucket
//! of width `epsilon / (V − 1)`, the label with the largest reward. Labels
//! carry the set of nodes their chain visits, so only simple paths are ever
//! extended. The answer is the best `reward − penalty` at the destination.
//!
//! Pipeline: [`cost`] → [`quantize`] → [`propagate`] (driving [`merge`]) →
//! [`decode`]; [`solver::solve`] wires them together.
//!
//! ```
//! use lpath_core::{solve, Graph, Query, SolverConfig};
//!
//! let g = Graph::from_weighted(3, &[(0, 1, 5), (1, 2, -2), (0, 2, 1)]).unwrap();
//! let sol = solve(&g, &Query::new(0, 2), &SolverConfig::default()).unwrap();
//! assert_eq!(sol.outcome.to_string(), "Longest path from 0 to 2 is 3");
//! ```

use core::slice;

pub mod config;
pub mod cost;
pub mod decode;
pub mod error;
pub mod generate;
pub mod graph;
pub mod io;
pub mod label;
pub mod merge;
pub mod propagate;
pub mod quantize;
pub mod solver;

pub use config::SolverConfig;
pub use cost::{decompose, Edge, EdgeId, NodeId};
pub use decode::Outcome;
pub use error::{LpError, Result};
pub use graph::Graph;
pub use propagate::{RunStats, Schedule};
pub use solver::{solve, Query, Solution};

/// Status when a path was found.
pub const LP_OK: i32 = 0;
/// Status when the destination is unreachable.
pub const LP_NO_PATH: i32 = 1;
/// Error code for null input pointers.
pub const LP_ERR_NULL: i32 = -3;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LpResultInfo {
    pub rounds: u32,                // propagation rounds executed
    pub merges_examined: u64,       // predecessor labels pushed across an edge
    pub cycle_skips: u64,           // extensions refused by the visited set
    pub labels_replaced: u64,       // bucket overwrites
    pub labels_allocated: u64,      // arena size at the end of the run
    pub bucket_count: u64,          // buckets per node
    pub error_code: i32,            // 0 path, 1 no path, <0 error
}

impl LpResultInfo {
    fn from_stats(stats: &RunStats, code: i32) -> Self {
        Self {
            rounds: stats.rounds,
            merges_examined: stats.merges_examined,
            cycle_skips: stats.cycle_skips,
            labels_replaced: stats.labels_replaced,
            labels_allocated: stats.labels_allocated,
            bucket_count: stats.bucket_count as u64,
            error_code: code,
        }
    }
}

#[no_mangle]
pub extern "C" fn lp_version() -> u32 { 1 }

/// Run the FPTAS over `m` edges given as parallel arrays.
///
/// Writes the approximate longest-path value to `out_value` (`i64::MIN` when
/// there is no path) and, if `info` is non-null, run statistics. `schedule`
/// is 0 for bounded rounds and 1 for the active set.
///
/// Returns [`LP_OK`], [`LP_NO_PATH`], or a negative [`LpError::code`].
///
/// # Safety
/// `sources`, `targets` and `weights` must each point to `m` readable
/// elements (they may be null when `m == 0`); `out_value` must be writable;
/// `info` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn lp_run_fptas(
    n: u32,
    m: u32,
    sources: *const u32,  // len m
    targets: *const u32,  // len m
    weights: *const i64,  // len m
    source: u32,
    destination: u32,
    epsilon: f64,
    schedule: i32,
    out_value: *mut i64,
    info: *mut LpResultInfo,
) -> i32 {
    if out_value.is_null() { return LP_ERR_NULL; }
    let m_usize = m as usize;
    let (src, tgt, wts): (&[u32], &[u32], &[i64]) = if m_usize == 0 {
        (&[], &[], &[])
    } else {
        if sources.is_null() || targets.is_null() || weights.is_null() { return LP_ERR_NULL; }
        (slice::from_raw_parts(sources, m_usize), slice::from_raw_parts(targets, m_usize), slice::from_raw_parts(weights, m_usize))
    };

    let run = || -> Result<Solution> {
        let sched = Schedule::from_code(schedule)?;
        let edges = (0..m_usize).map(|i| Edge::new(src[i] as usize, tgt[i] as usize, wts[i])).collect();
        let graph = Graph::new(n as usize, edges)?;
        let config = SolverConfig { epsilon, schedule: sched, ..SolverConfig::default() };
        solve(&graph, &Query::new(source as usize, destination as usize), &config)
    };

    match run() {
        Ok(sol) => {
            let (value, code) = match sol.outcome.value() { Some(v) => (v, LP_OK), None => (i64::MIN, LP_NO_PATH) };
            *out_value = value;
            if !info.is_null() { *info = LpResultInfo::from_stats(&sol.stats, code); }
            code
        }
        Err(e) => {
            tracing::warn!(error = %e, "lp_run_fptas failed");
            let code = e.code();
            if !info.is_null() { *info = LpResultInfo { error_code: code, ..LpResultInfo::default() }; }
            code
        }
    }
}
