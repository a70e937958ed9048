//! Solver configuration.
//!
//! [`SolverConfig`] starts from [`Default`], may be loaded from JSON, and is
//! then overridden by `LPATH_*` environment knobs:
//!
//! | variable            | field         |
//! |---------------------|---------------|
//! | `LPATH_EPSILON`     | `epsilon`     |
//! | `LPATH_SCHEDULE`    | `schedule`    |
//! | `LPATH_MAX_SLOTS`   | `max_slots`   |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LpError, Result};
use crate::propagate::Schedule;

pub const ENV_EPSILON: &str = "LPATH_EPSILON";
pub const ENV_SCHEDULE: &str = "LPATH_SCHEDULE";
pub const ENV_MAX_SLOTS: &str = "LPATH_MAX_SLOTS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Approximation parameter as entered by the user (before rescaling).
    pub epsilon: f64,
    pub schedule: Schedule,
    /// Upper limit on `V × buckets`, the slot count of one label store.
    /// Propagation keeps two stores (live and snapshot) of this size.
    pub max_slots: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { epsilon: 0.5, schedule: Schedule::BoundedRounds, max_slots: 1 << 25 }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(LpError::InvalidEpsilon(self.epsilon));
        }
        if self.max_slots == 0 {
            return Err(LpError::invalid_config("max_slots", "must be > 0"));
        }
        Ok(())
    }

    pub fn from_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LpError::io(path, e))?;
        let cfg: SolverConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `LPATH_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|k| std::env::var(k).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> Result<Self> {
        if let Some(v) = lookup(ENV_EPSILON) {
            self.epsilon = v.trim().parse().map_err(|_| LpError::invalid_config("epsilon", format!("`{}` is not a number", v)))?;
        }
        if let Some(v) = lookup(ENV_SCHEDULE) {
            self.schedule = v.parse()?;
        }
        if let Some(v) = lookup(ENV_MAX_SLOTS) {
            self.max_slots = v.trim().parse().map_err(|_| LpError::invalid_config("max_slots", format!("`{}` is not an integer", v)))?;
        }
        self.validate()?;
        Ok(self)
    }
}
