use std::path::PathBuf;

use chrono::Utc;
use tracing::{error, info, info_span};

use super::core::Manager;
use crate::acquire::{ModelOrigin, ModelPlan};
use crate::error::SchedulerError;
use crate::metrics::RunSummary;
use crate::phase::RunPhase;
use crate::pool::WorkerPool;

impl Manager {
    /// Acquire the model per `plan` and publish it. On failure nothing is
    /// published; the caller decides whether to abort the gate.
    pub fn acquire_model(&self, plan: &ModelPlan) -> Result<ModelOrigin, SchedulerError> {
        self.begin_acquisition()?;
        let (collection, origin) = plan.acquire()?;
        self.publish(collection)?;
        Ok(origin)
    }

    /// Run to completion: list documents, start the workers, acquire and
    /// publish the model, distribute, and wait for every worker to exit.
    ///
    /// Fails without dispatching anything when there are no documents or the
    /// model cannot be acquired. In the latter case the gate is aborted, so
    /// waiting workers exit without ever seeing a model.
    pub fn run(&self, plan: &ModelPlan) -> Result<RunSummary, SchedulerError> {
        let span = info_span!("run", run_id = %self.ctx.run_id());
        let _enter = span.enter();
        let started_at = Utc::now();

        let documents = match self.ctx.source().list_documents() {
            Ok(d) => d,
            Err(e) => {
                self.fail("document listing failed");
                return Err(e.into());
            }
        };
        if documents.is_empty() {
            self.fail("no documents");
            return Err(SchedulerError::NoDocuments);
        }
        info!(
            documents = documents.len(),
            workers = self.ctx.worker_count(),
            "Starting run"
        );

        let pool = WorkerPool::spawn(&self.ctx).map_err(|e| {
            self.fail(&e.to_string());
            e
        })?;

        let driven = self.drive(plan, documents);
        if let Err(e) = &driven {
            error!(error = %e, "Run aborted");
            self.ctx.gate().abort(e.to_string());
            if let Err(close) = self.close_queues() {
                error!(error = %close, "Failed to close queues");
            }
            self.fail(&e.to_string());
        }

        let joined = pool.join();
        let (model, documents) = driven?;
        let workers = joined.map_err(|e| {
            self.fail(&e.to_string());
            e
        })?;
        self.transition(RunPhase::Done)?;

        let predictions = self
            .ctx
            .metrics_snapshot()
            .map(|m| m.predictions)
            .unwrap_or_default();
        let summary = RunSummary {
            run_id: self.ctx.run_id(),
            model,
            documents,
            started_at,
            finished_at: Utc::now(),
            workers,
            predictions,
        };
        info!(
            classified = summary.classified(),
            failures = summary.failures(),
            elapsed_ms = summary.elapsed_ms(),
            "Run complete"
        );
        Ok(summary)
    }

    fn drive(
        &self,
        plan: &ModelPlan,
        documents: Vec<PathBuf>,
    ) -> Result<(ModelOrigin, usize), SchedulerError> {
        let origin = self.acquire_model(plan)?;
        let count = self.distribute(documents)?;
        Ok((origin, count))
    }
}
