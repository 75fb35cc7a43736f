use std::path::{Path, PathBuf};
use std::sync::Arc;

use shelf_ingest::{FileReportSink, FsDocumentSource};
use shelf_scheduler::{Manager, ModelPlan, RunContext, SchedulerConfig};

pub const CORPUS: &str = "\
title,genre,summary
The Long Night,crime,\"A detective hunts a killer; the murder weapon, a knife, is missing.\"
Cold Case,crime,Police reopen a murder case and question every suspect.
Across the Andes,travel,\"A journey by train and bus through mountains,
villages, and markets.\"
Island Hopping,travel,Beaches and ferries and a long journey by boat.
";

pub fn genres() -> Vec<String> {
    ["crime", "travel", "horror"].iter().map(|s| s.to_string()).collect()
}

pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("documents")).unwrap();
        std::fs::write(dir.path().join("book.csv"), CORPUS).unwrap();
        Self { dir }
    }

    pub fn documents(&self) -> PathBuf {
        self.dir.path().join("documents")
    }

    pub fn model(&self) -> PathBuf {
        self.dir.path().join("model.dat")
    }

    pub fn report(&self) -> PathBuf {
        self.dir.path().join("report.txt")
    }

    pub fn add_document(&self, name: &str, text: &str) -> PathBuf {
        let path = self.documents().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    pub fn plan(&self) -> ModelPlan {
        ModelPlan::new(self.model(), self.dir.path().join("book.csv"), genres())
    }

    pub fn manager(&self, config: SchedulerConfig) -> Manager {
        let ctx = RunContext::new(
            &config,
            Arc::new(FsDocumentSource::new(self.documents())),
            Arc::new(FileReportSink::new(self.report())),
        )
        .unwrap();
        Manager::new(Arc::new(ctx))
    }

    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = std::fs::read_to_string(self.report())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }
}

pub fn report_line(path: &Path, genre: &str) -> String {
    format!("File: {}, Predicted Genre: {}", path.display(), genre)
}
