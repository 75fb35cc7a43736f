use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model at byte {offset}: {reason}")]
    Malformed { offset: u64, reason: String },

    #[error("Word count of genre {genre:?} exceeds {max}")]
    Overflow { genre: String, max: i32 },

    #[error("Model has no usable genre: {0}")]
    Unusable(String),
}

impl ModelError {
    pub(crate) fn malformed(offset: u64, reason: impl Into<String>) -> Self {
        ModelError::Malformed {
            offset,
            reason: reason.into(),
        }
    }
}

/// Failure of a single classification call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("No model: {0}")]
    NoModel(String),
}
