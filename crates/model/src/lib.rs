//! Naive Bayes genre model: training, binary persistence, and scoring.
//!
//! A [`ModelCollection`] is built once (by [`train`] or [`ModelStore::load`])
//! and then shared read-only, typically behind an `Arc`, by every
//! [`Classifier`].

pub mod classifier;
pub mod codec;
pub mod error;
pub mod genre;
pub mod store;
pub mod train;

pub use classifier::{classify, Classification, Classifier};
pub use error::{ClassifyError, ModelError};
pub use genre::{GenreModel, ModelCollection};
pub use store::{ModelStore, SaveOutcome};
pub use train::train;
