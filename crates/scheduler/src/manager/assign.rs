use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::core::Manager;
use crate::error::SchedulerError;
use crate::phase::RunPhase;
use crate::queue::Task;

impl Manager {
    /// Worker with the strictly smallest `length × efficiency`; ties go to
    /// the lowest index.
    pub fn least_loaded(&self) -> Result<usize, SchedulerError> {
        let mut best: Option<(usize, u64)> = None;
        for worker in 0..self.ctx.worker_count() {
            let load = self.ctx.load(worker)?;
            match best {
                Some((_, best_load)) if load >= best_load => {}
                _ => best = Some((worker, load)),
            }
        }
        best.map(|(worker, _)| worker)
            .ok_or_else(|| SchedulerError::InvalidArgument("no workers".to_string()))
    }

    /// Queue one document on the least-loaded worker. The load scan and the
    /// push happen under the dispatch lock, so concurrent callers never decide
    /// on a stale length. Fails once the queues are closed.
    pub fn assign(&self, path: PathBuf) -> Result<usize, SchedulerError> {
        let state = self
            .dispatch
            .lock()
            .map_err(|_| SchedulerError::poisoned("dispatch"))?;
        if state.closed {
            return Err(SchedulerError::InvalidArgument(format!(
                "queues closed, cannot assign {}",
                path.display()
            )));
        }

        let worker = self.least_loaded()?;
        debug!(worker, path = %path.display(), "Assigned");
        self.ctx.queues()[worker].push(Task::Document(path))?;
        drop(state);

        if let Ok(mut m) = self.ctx.metrics().write() {
            m.record_assignment(worker);
        }
        Ok(worker)
    }

    /// Assign every document, then close every queue with one stop sentinel.
    /// Runs on the rayon pool when parallel dispatch is enabled.
    pub fn distribute(&self, documents: Vec<PathBuf>) -> Result<usize, SchedulerError> {
        self.transition(RunPhase::Dispatching)?;
        let count = documents.len();

        let assigned = if self.ctx.parallel_dispatch() {
            documents
                .into_par_iter()
                .try_for_each(|path| self.assign(path).map(|_| ()))
        } else {
            documents
                .into_iter()
                .try_for_each(|path| self.assign(path).map(|_| ()))
        };
        let closed = self.close_queues();
        assigned?;
        closed?;

        self.transition(RunPhase::Draining)?;
        info!(documents = count, workers = self.ctx.worker_count(), "All documents assigned");
        Ok(count)
    }

    /// Push the stop sentinel onto every queue. Later calls do nothing.
    pub(crate) fn close_queues(&self) -> Result<(), SchedulerError> {
        let mut state = self.dispatch.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed {
            return Ok(());
        }
        state.closed = true;

        let mut first_err = None;
        for (worker, queue) in self.ctx.queues().iter().enumerate() {
            if let Err(e) = queue.push(Task::Stop) {
                warn!(worker, error = %e, "Could not stop worker");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
