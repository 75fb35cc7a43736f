use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::context::RunContext;
use crate::error::SchedulerError;
use crate::worker::{Worker, WorkerReport};

/// One named OS thread per worker queue.
pub struct WorkerPool {
    handles: Vec<(usize, JoinHandle<WorkerReport>)>,
}

impl WorkerPool {
    /// Start every worker. They block on the model gate until it is
    /// published or aborted. If a thread cannot be started, the gate is
    /// aborted and the already started workers are joined.
    pub fn spawn(ctx: &Arc<RunContext>) -> Result<Self, SchedulerError> {
        let mut handles = Vec::with_capacity(ctx.worker_count());
        for id in 0..ctx.worker_count() {
            let worker = Worker::new(id, Arc::clone(ctx));
            let spawned = thread::Builder::new()
                .name(format!("shelf-worker-{}", id))
                .spawn(move || worker.run());

            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(source) => {
                    ctx.gate().abort(format!("failed to start worker {}", id));
                    Self { handles }.shut_down();
                    return Err(SchedulerError::Spawn { worker: id, source });
                }
            }
        }
        debug!(workers = handles.len(), "Worker pool started");
        Ok(Self { handles })
    }

    /// Join without returning reports; a panicked worker is only logged.
    fn shut_down(self) {
        if let Err(e) = self.join() {
            error!(error = %e, "Started workers did not exit cleanly");
        }
    }

    /// Wait for every worker to exit. Reports are ordered by worker id.
    pub fn join(self) -> Result<Vec<WorkerReport>, SchedulerError> {
        let mut reports = Vec::with_capacity(self.handles.len());
        let mut panicked = None;
        for (id, handle) in self.handles {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    error!(worker = id, "Worker panicked");
                    panicked.get_or_insert(id);
                }
            }
        }
        match panicked {
            Some(id) => Err(SchedulerError::WorkerPanicked(id)),
            None => Ok(reports),
        }
    }
}
