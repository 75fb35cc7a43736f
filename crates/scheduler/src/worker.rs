use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use shelf_model::Classifier;
use tracing::{debug, error, info, info_span, warn};

use crate::context::RunContext;
use crate::metrics::Outcome;
use crate::queue::Task;

/// What one worker did during the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub worker: usize,
    pub classified: u64,
    pub read_failures: u64,
    pub classify_failures: u64,
    pub report_failures: u64,
    /// The model was never published; the worker exited without work.
    pub model_unavailable: bool,
}

impl WorkerReport {
    pub fn failures(&self) -> u64 {
        self.read_failures + self.classify_failures + self.report_failures
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Classified { .. } => self.classified += 1,
            Outcome::ReadFailed => self.read_failures += 1,
            Outcome::ClassifyFailed => self.classify_failures += 1,
            Outcome::ReportFailed => self.report_failures += 1,
        }
    }
}

/// Consumer of one task queue.
pub struct Worker {
    id: usize,
    ctx: Arc<RunContext>,
}

impl Worker {
    pub fn new(id: usize, ctx: Arc<RunContext>) -> Self {
        Self { id, ctx }
    }

    /// Wait for the model, then drain the queue until the stop sentinel.
    /// Per-document failures are logged and counted; they never end the loop.
    pub fn run(self) -> WorkerReport {
        let span = info_span!("worker", run_id = %self.ctx.run_id(), worker = self.id);
        let _enter = span.enter();
        let mut report = WorkerReport {
            worker: self.id,
            ..WorkerReport::default()
        };

        let classifier = match self.ctx.gate().wait() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Exiting without a model");
                report.model_unavailable = true;
                return report;
            }
        };

        let Some(queue) = self.ctx.queue(self.id) else {
            error!("No queue for this worker");
            return report;
        };

        loop {
            match queue.pop_blocking() {
                Ok(Task::Document(path)) => {
                    let outcome = self.process(&classifier, &path);
                    report.record(&outcome);
                    self.ctx.record_outcome(&outcome);
                }
                Ok(Task::Stop) => break,
                Err(e) => {
                    error!(error = %e, "Queue unusable, stopping");
                    break;
                }
            }
        }
        if !queue.is_empty() {
            warn!(left = queue.len(), "Tasks queued after the stop sentinel");
        }

        info!(
            classified = report.classified,
            failures = report.failures(),
            "Worker finished"
        );
        report
    }

    fn process(&self, classifier: &Classifier, path: &Path) -> Outcome {
        let text = match self.ctx.source().read_whole_file(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                return Outcome::ReadFailed;
            }
        };

        let genre = match classifier.classify_text(&text) {
            Ok(c) => {
                debug!(path = %path.display(), genre = %c.genre, score = c.score, "Classified");
                c.genre
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Classification failed");
                return Outcome::ClassifyFailed;
            }
        };

        let line = format!("File: {}, Predicted Genre: {}", path.display(), genre);
        if let Err(e) = self.ctx.sink().append_line(&line) {
            warn!(path = %path.display(), error = %e, "Report record dropped");
            return Outcome::ReportFailed;
        }
        Outcome::Classified { genre }
    }
}
