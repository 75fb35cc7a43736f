use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IngestError;

/// Where documents to classify come from.
pub trait DocumentSource: Send + Sync {
    /// Enumerate every document to classify.
    fn list_documents(&self) -> Result<Vec<PathBuf>, IngestError>;

    /// Read a document's full text.
    fn read_whole_file(&self, path: &Path) -> Result<String, IngestError>;
}

/// Regular files directly inside one directory.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    dir: PathBuf,
}

impl FsDocumentSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSource for FsDocumentSource {
    /// Files are returned sorted by name; subdirectories are not descended.
    fn list_documents(&self) -> Result<Vec<PathBuf>, IngestError> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.dir).to_path_buf();
                IngestError::io(path, e.into())
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        debug!(dir = %self.dir.display(), count = files.len(), "Listed documents");
        Ok(files)
    }

    /// Invalid UTF-8 is replaced rather than rejected.
    fn read_whole_file(&self, path: &Path) -> Result<String, IngestError> {
        let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }
}

/// In-memory documents keyed by path. Paths listed with
/// [`MemoryDocumentSource::with_unreadable`] are enumerated but fail to read.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentSource {
    documents: BTreeMap<PathBuf, Option<String>>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.documents.insert(path.into(), Some(text.into()));
        self
    }

    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.documents.insert(path.into(), None);
        self
    }
}

impl DocumentSource for MemoryDocumentSource {
    fn list_documents(&self) -> Result<Vec<PathBuf>, IngestError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read_whole_file(&self, path: &Path) -> Result<String, IngestError> {
        match self.documents.get(path) {
            Some(Some(text)) => Ok(text.clone()),
            Some(None) => Err(IngestError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable"),
            )),
            None => Err(IngestError::NotFound(path.to_path_buf())),
        }
    }
}
