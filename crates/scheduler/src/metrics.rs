use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::acquire::ModelOrigin;
use crate::phase::RunPhase;
use crate::worker::WorkerReport;

/// Result of handling one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Classified { genre: String },
    ReadFailed,
    ClassifyFailed,
    ReportFailed,
}

/// Live dispatch counters, shared behind `Arc<RwLock<_>>`.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchMetrics {
    /// Current run phase.
    pub phase: RunPhase,
    /// Documents assigned, indexed by worker.
    pub assigned: Vec<u64>,
    pub classified: u64,
    pub read_failures: u64,
    pub classify_failures: u64,
    pub report_failures: u64,
    /// Predictions by genre.
    pub predictions: BTreeMap<String, u64>,
    pub started_at: DateTime<Utc>,
    pub last_assignment: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl DispatchMetrics {
    pub fn new(workers: usize) -> Self {
        Self {
            phase: RunPhase::Idle,
            assigned: vec![0; workers],
            classified: 0,
            read_failures: 0,
            classify_failures: 0,
            report_failures: 0,
            predictions: BTreeMap::new(),
            started_at: Utc::now(),
            last_assignment: None,
            finished_at: None,
        }
    }

    pub fn record_assignment(&mut self, worker: usize) {
        if let Some(slot) = self.assigned.get_mut(worker) {
            *slot += 1;
        }
        self.last_assignment = Some(Utc::now());
    }

    pub fn record_outcome(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Classified { genre } => {
                self.classified += 1;
                *self.predictions.entry(genre.clone()).or_default() += 1;
            }
            Outcome::ReadFailed => self.read_failures += 1,
            Outcome::ClassifyFailed => self.classify_failures += 1,
            Outcome::ReportFailed => self.report_failures += 1,
        }
    }

    pub fn record_phase(&mut self, phase: RunPhase) {
        self.phase = phase;
        if phase.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn total_assigned(&self) -> u64 {
        self.assigned.iter().sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.read_failures + self.classify_failures + self.report_failures
    }
}

/// Final account of a completed run, logged as JSON by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub model: ModelOrigin,
    pub documents: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub workers: Vec<WorkerReport>,
    pub predictions: BTreeMap<String, u64>,
}

impl RunSummary {
    pub fn classified(&self) -> u64 {
        self.workers.iter().map(|w| w.classified).sum()
    }

    pub fn failures(&self) -> u64 {
        self.workers.iter().map(|w| w.failures()).sum()
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }))
    }
}
