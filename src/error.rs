//! Error types for the longest-path FPTAS.
//!
//! Only malformed external input and invalid configuration surface here.
//! Empty buckets, cycle skips and unreachable destinations are ordinary
//! outcomes of propagation and never become errors.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LpError>;

#[derive(Debug, Error)]
pub enum LpError {
    /// The graph has no nodes.
    #[error("node count must be at least 1")]
    EmptyGraph,

    /// A source or destination id is outside `[0, node_count)`.
    #[error("{role} node {node} is out of range for {node_count} nodes")]
    InvalidNode { role: &'static str, node: usize, node_count: usize },

    /// An edge references a node id outside `[0, node_count)`.
    #[error("edge {index} ({source_node} -> {destination}) references a node outside 0..{node_count}")]
    InvalidEdge { index: usize, source_node: usize, destination: usize, node_count: usize },

    /// Epsilon must be positive and finite.
    #[error("epsilon must be a positive finite number, got {0}")]
    InvalidEpsilon(f64),

    /// The label store cannot be sized for the requested precision.
    #[error("label store sizing overflow: {0}")]
    SizingOverflow(String),

    /// Unknown scheduling policy name or code.
    #[error("unknown schedule `{0}` (expected `bounded` or `active`)")]
    InvalidSchedule(String),

    /// A data row of the edge table could not be parsed.
    #[error("malformed edge row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// A configuration field holds an unusable value.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("i/o error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LpError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LpError::Io { path: path.into(), source }
    }

    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        LpError::InvalidConfig { field, reason: reason.into() }
    }

    /// Status code returned across the C ABI (negative == failure).
    pub fn code(&self) -> i32 {
        match self {
            LpError::EmptyGraph => -1,
            LpError::InvalidNode { .. } => -2,
            LpError::InvalidEdge { .. } => -4,
            LpError::InvalidEpsilon(_) => -5,
            LpError::SizingOverflow(_) => -6,
            LpError::InvalidSchedule(_) => -7,
            LpError::MalformedRow { .. } => -8,
            LpError::InvalidConfig { .. } => -9,
            LpError::Io { .. } | LpError::Json(_) => -10,
        }
    }
}
