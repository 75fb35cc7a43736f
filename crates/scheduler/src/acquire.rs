use std::path::{Path, PathBuf};

use serde::Serialize;
use shelf_ingest::parse_labeled_corpus;
use shelf_model::{train, ModelCollection, ModelError, ModelStore, SaveOutcome};
use tracing::{info, warn};

use crate::error::SchedulerError;

/// Where the published model came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ModelOrigin {
    Loaded { path: PathBuf },
    Trained { documents: u64, persisted: bool },
}

/// How to obtain the model for a run: load the persisted file, or train
/// from the labeled corpus and persist the result.
#[derive(Debug, Clone)]
pub struct ModelPlan {
    store: ModelStore,
    corpus_path: PathBuf,
    genres: Vec<String>,
    retrain: bool,
}

impl ModelPlan {
    pub fn new(model_path: impl Into<PathBuf>, corpus_path: impl Into<PathBuf>, genres: Vec<String>) -> Self {
        Self {
            store: ModelStore::new(model_path),
            corpus_path: corpus_path.into(),
            genres,
            retrain: false,
        }
    }

    /// Train even when a persisted model exists.
    pub fn retrain(mut self, retrain: bool) -> Self {
        self.retrain = retrain;
        self
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    pub fn corpus_path(&self) -> &Path {
        &self.corpus_path
    }

    /// Produce a fully formed collection or fail. A collection in which no
    /// genre has a nonzero prior is rejected.
    pub fn acquire(&self) -> Result<(ModelCollection, ModelOrigin), SchedulerError> {
        let (collection, origin) = if self.store.exists() && !self.retrain {
            let collection = self.store.load()?;
            let origin = ModelOrigin::Loaded {
                path: self.store.path().to_path_buf(),
            };
            (collection, origin)
        } else {
            self.train_and_save()?
        };

        if collection.usable_genres() == 0 {
            return Err(ModelError::Unusable(format!(
                "none of {} genres has a training document",
                collection.len()
            ))
            .into());
        }
        Ok((collection, origin))
    }

    fn train_and_save(&self) -> Result<(ModelCollection, ModelOrigin), SchedulerError> {
        info!(corpus = %self.corpus_path.display(), "Training model");
        let corpus = parse_labeled_corpus(&self.corpus_path)?;
        let collection = train(&corpus, &self.genres)?;

        // A model that trained but cannot be written is still served.
        let persisted = match self.store.save(&collection) {
            Ok(SaveOutcome::Written { .. }) => true,
            Ok(SaveOutcome::Skipped { path }) => {
                info!(path = %path.display(), "Trained model kept in memory only");
                false
            }
            Err(e) => {
                warn!(
                    path = %self.store.path().display(),
                    error = %e,
                    "Could not save trained model, keeping it in memory only"
                );
                false
            }
        };

        let origin = ModelOrigin::Trained {
            documents: collection.total_documents().unwrap_or(corpus.len() as u64),
            persisted,
        };
        Ok((collection, origin))
    }
}
