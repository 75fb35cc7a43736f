use shelf_ingest::IngestError;
use shelf_model::ModelError;
use thiserror::Error;

use crate::phase::RunPhase;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Model acquisition failed: {0}")]
    Model(#[from] ModelError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Model already published")]
    AlreadyPublished,

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: RunPhase, to: RunPhase },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Worker queue disconnected")]
    QueueDisconnected,

    #[error("Failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),

    #[error("No documents found")]
    NoDocuments,
}

impl SchedulerError {
    pub(crate) fn poisoned(what: &str) -> Self {
        SchedulerError::LockPoisoned(what.to_string())
    }
}
