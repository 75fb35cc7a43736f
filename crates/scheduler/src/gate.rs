use std::sync::{Arc, Condvar, Mutex};

use shelf_model::{Classifier, ModelCollection};
use tracing::{info, warn};

use crate::error::SchedulerError;

#[derive(Debug)]
enum GateState {
    Pending,
    Ready(Classifier),
    Aborted(String),
}

/// One-shot publication point for the model.
///
/// Moves from pending to either ready (exactly once, carrying the shared
/// model) or aborted. Waiters wake on either; a waiter arriving after the
/// transition returns immediately.
#[derive(Debug)]
pub struct ModelGate {
    state: Mutex<GateState>,
    changed: Condvar,
}

impl Default for ModelGate {
    fn default() -> Self {
        Self {
            state: Mutex::new(GateState::Pending),
            changed: Condvar::new(),
        }
    }
}

impl ModelGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the model and wake every waiter.
    pub fn publish(&self, model: ModelCollection) -> Result<Classifier, SchedulerError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| SchedulerError::poisoned("model gate"))?;
        match &*state {
            GateState::Pending => {}
            GateState::Ready(_) => return Err(SchedulerError::AlreadyPublished),
            GateState::Aborted(reason) => {
                return Err(SchedulerError::ModelUnavailable(reason.clone()))
            }
        }

        let genres = model.len();
        let classifier = Classifier::new(Arc::new(model));
        *state = GateState::Ready(classifier.clone());
        drop(state);
        self.changed.notify_all();

        info!(genres, "Model published");
        Ok(classifier)
    }

    /// Give up on the model. Waiters wake and see no model. No effect once
    /// the model is published.
    pub fn abort(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let mut state = match self.state.lock() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let GateState::Pending = *state {
            warn!(reason = %reason, "Model gate aborted");
            *state = GateState::Aborted(reason);
            drop(state);
            self.changed.notify_all();
        }
    }

    /// Block until the gate leaves pending.
    pub fn wait(&self) -> Result<Classifier, SchedulerError> {
        let state = self
            .state
            .lock()
            .map_err(|_| SchedulerError::poisoned("model gate"))?;
        let state = self
            .changed
            .wait_while(state, |s| matches!(s, GateState::Pending))
            .map_err(|_| SchedulerError::poisoned("model gate"))?;
        match &*state {
            GateState::Ready(classifier) => Ok(classifier.clone()),
            GateState::Aborted(reason) => Err(SchedulerError::ModelUnavailable(reason.clone())),
            GateState::Pending => Err(SchedulerError::ModelUnavailable(
                "gate still pending".to_string(),
            )),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state.lock().as_deref(), Ok(GateState::Ready(_)))
    }
}
