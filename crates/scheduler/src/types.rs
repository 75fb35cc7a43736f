use serde::{Deserialize, Serialize};
use shelf_core::config::{WorkerConfig, DEFAULT_WORKERS};

use crate::error::SchedulerError;

/// Worker pool shape for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of worker threads.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Load weight per worker. Empty = 1 for every worker.
    #[serde(default)]
    pub efficiencies: Vec<u32>,
    /// Assign documents from the rayon pool.
    #[serde(default = "default_parallel_dispatch")]
    pub parallel_dispatch: bool,
}

fn default_workers() -> usize { DEFAULT_WORKERS }
fn default_parallel_dispatch() -> bool { true }

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            efficiencies: Vec::new(),
            parallel_dispatch: default_parallel_dispatch(),
        }
    }
}

impl SchedulerConfig {
    /// `workers` equal-weight workers.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel_dispatch = false;
        self
    }

    pub fn with_efficiencies(mut self, efficiencies: Vec<u32>) -> Self {
        self.efficiencies = efficiencies;
        self
    }

    /// Per-worker weights, checked: one positive weight per worker.
    pub fn resolved_efficiencies(&self) -> Result<Vec<u32>, SchedulerError> {
        if self.workers == 0 {
            return Err(SchedulerError::InvalidArgument(
                "worker count must be positive".to_string(),
            ));
        }
        if self.efficiencies.is_empty() {
            return Ok(vec![1; self.workers]);
        }
        if self.efficiencies.len() != self.workers {
            return Err(SchedulerError::InvalidArgument(format!(
                "{} efficiency weights for {} workers",
                self.efficiencies.len(),
                self.workers
            )));
        }
        if let Some(i) = self.efficiencies.iter().position(|&e| e == 0) {
            return Err(SchedulerError::InvalidArgument(format!(
                "efficiency of worker {} must be positive",
                i
            )));
        }
        Ok(self.efficiencies.clone())
    }
}

impl From<&WorkerConfig> for SchedulerConfig {
    /// Invalid worker settings are replaced by defaults, with a warning.
    fn from(config: &WorkerConfig) -> Self {
        Self {
            workers: config.resolved_count(),
            efficiencies: config.resolved_efficiencies(),
            parallel_dispatch: config.parallel_dispatch,
        }
    }
}
