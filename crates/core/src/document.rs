use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identifier of a document to classify: its path on disk.
pub type DocumentPath = PathBuf;

/// One labeled training record: a genre and the text that exemplifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    pub genre: String,
    pub text: String,
}

impl LabeledText {
    pub fn new(genre: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            text: text.into(),
        }
    }
}
