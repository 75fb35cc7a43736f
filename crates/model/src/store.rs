use std::fs::{self, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codec;
use crate::error::ModelError;
use crate::genre::ModelCollection;

/// What [`ModelStore::save`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new model file was created.
    Written { path: PathBuf, bytes: u64 },
    /// The destination already existed and was left untouched.
    Skipped { path: PathBuf },
}

/// Write-once model persistence at a single path.
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Persist a collection. An existing file is never overwritten; that case
    /// returns [`SaveOutcome::Skipped`] and logs a warning.
    pub fn save(&self, collection: &ModelCollection) -> Result<SaveOutcome, ModelError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                warn!(path = %self.path.display(), "model file already exists, not overwriting");
                return Ok(SaveOutcome::Skipped { path: self.path.clone() });
            }
            Err(e) => return Err(ModelError::Io(e)),
        };

        let bytes = match codec::encode(collection, BufWriter::new(file)) {
            Ok(n) => n,
            Err(e) => {
                // Leave no half-written model behind for the next load.
                if let Err(rm) = fs::remove_file(&self.path) {
                    warn!(path = %self.path.display(), error = %rm, "failed to remove partial model");
                }
                return Err(e);
            }
        };

        info!(
            path = %self.path.display(),
            genres = collection.len(),
            bytes,
            "Model saved"
        );
        Ok(SaveOutcome::Written { path: self.path.clone(), bytes })
    }

    /// Load the persisted collection.
    pub fn load(&self) -> Result<ModelCollection, ModelError> {
        let file = fs::File::open(&self.path)?;
        let collection = codec::decode(BufReader::new(file))?;
        info!(
            path = %self.path.display(),
            genres = collection.len(),
            usable = collection.usable_genres(),
            "Model loaded"
        );
        Ok(collection)
    }
}
