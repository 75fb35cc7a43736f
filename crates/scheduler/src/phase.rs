use std::fmt;

use serde::Serialize;

/// Lifecycle of one classification run.
///
/// ```text
/// Idle -> Acquiring -> ModelReady -> Dispatching -> Draining -> Done
///   \________\____________\______________\____________\-----> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RunPhase {
    Idle,
    /// Loading the persisted model or training a new one.
    Acquiring,
    /// Model published; workers unblocked.
    ModelReady,
    Dispatching,
    /// Every document assigned and every queue closed.
    Draining,
    Done,
    Failed,
}

impl RunPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed)
    }

    /// Whether `self -> next` is a legal step.
    pub fn can_transition_to(self, next: RunPhase) -> bool {
        use RunPhase::*;
        match (self, next) {
            (Idle, Acquiring)
            | (Acquiring, ModelReady)
            | (ModelReady, Dispatching)
            | (Dispatching, Draining)
            | (Draining, Done) => true,
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Acquiring => "acquiring",
            RunPhase::ModelReady => "model_ready",
            RunPhase::Dispatching => "dispatching",
            RunPhase::Draining => "draining",
            RunPhase::Done => "done",
            RunPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}
