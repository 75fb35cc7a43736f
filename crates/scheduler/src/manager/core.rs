use std::sync::{Arc, Mutex};

use shelf_model::{Classifier, ModelCollection};
use tracing::{info, warn};

use crate::context::RunContext;
use crate::error::SchedulerError;
use crate::phase::RunPhase;

pub(super) struct DispatchState {
    /// Every queue has received its stop sentinel.
    pub(super) closed: bool,
}

/// Drives one run: publishes the model, assigns documents to the
/// least-loaded worker, and closes every queue.
pub struct Manager {
    pub(super) ctx: Arc<RunContext>,
    pub(super) phase: Mutex<RunPhase>,
    /// Serializes each assignment decision with its push.
    pub(super) dispatch: Mutex<DispatchState>,
}

impl Manager {
    pub fn new(ctx: Arc<RunContext>) -> Self {
        Self {
            ctx,
            phase: Mutex::new(RunPhase::Idle),
            dispatch: Mutex::new(DispatchState { closed: false }),
        }
    }

    pub fn context(&self) -> &Arc<RunContext> {
        &self.ctx
    }

    pub fn phase(&self) -> Result<RunPhase, SchedulerError> {
        self.phase
            .lock()
            .map(|p| *p)
            .map_err(|_| SchedulerError::poisoned("run phase"))
    }

    pub(super) fn transition(&self, next: RunPhase) -> Result<(), SchedulerError> {
        let mut phase = self
            .phase
            .lock()
            .map_err(|_| SchedulerError::poisoned("run phase"))?;
        Self::advance(&self.ctx, &mut phase, next)
    }

    fn advance(ctx: &RunContext, phase: &mut RunPhase, next: RunPhase) -> Result<(), SchedulerError> {
        if !phase.can_transition_to(next) {
            return Err(SchedulerError::InvalidTransition { from: *phase, to: next });
        }
        info!("Phase {} -> {}", phase, next);
        *phase = next;
        if let Ok(mut m) = ctx.metrics().write() {
            m.record_phase(next);
        }
        Ok(())
    }

    /// Mark the run failed unless it already ended.
    pub(super) fn fail(&self, reason: &str) {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        if phase.is_terminal() {
            return;
        }
        warn!(reason, "Run failed during {}", phase);
        if let Err(e) = Self::advance(&self.ctx, &mut phase, RunPhase::Failed) {
            warn!(error = %e, "Could not record failure");
        }
    }

    /// Idle -> Acquiring.
    pub fn begin_acquisition(&self) -> Result<(), SchedulerError> {
        self.transition(RunPhase::Acquiring)
    }

    /// Publish the model through the gate and move to ModelReady. Only legal
    /// while acquiring, so a run publishes at most once.
    pub fn publish(&self, model: ModelCollection) -> Result<Classifier, SchedulerError> {
        let mut phase = self
            .phase
            .lock()
            .map_err(|_| SchedulerError::poisoned("run phase"))?;
        if !phase.can_transition_to(RunPhase::ModelReady) {
            return Err(SchedulerError::InvalidTransition {
                from: *phase,
                to: RunPhase::ModelReady,
            });
        }
        let classifier = self.ctx.gate().publish(model)?;
        Self::advance(&self.ctx, &mut phase, RunPhase::ModelReady)?;
        Ok(classifier)
    }
}
