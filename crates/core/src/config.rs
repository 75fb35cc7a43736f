use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShelfError;

/// Worker count used when none is given or the given one is invalid.
pub const DEFAULT_WORKERS: usize = 10;

/// Genres that always appear in a trained model, even when the corpus has
/// no document for them.
pub const DEFAULT_GENRES: &[&str] = &[
    "crime",
    "fantasy",
    "history",
    "horror",
    "psychology",
    "romance",
    "science",
    "sports",
    "thriller",
    "travel",
];

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_path(profile: &str, key: &str, default: &str) -> PathBuf {
    PathBuf::from(profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string()))
}

/// Parse a profiled env var, logging and falling back to `default` when the
/// value does not parse.
fn profiled_env_parsed<T: FromStr>(profile: &str, key: &str, default: T) -> T {
    match profiled_env_opt(profile, key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "invalid value, using default");
            default
        }),
        None => default,
    }
}

/// Parse a worker count. Must be a positive integer.
pub fn parse_worker_count(raw: &str) -> Result<usize, ShelfError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ShelfError::InvalidArgument(
            "worker count must be at least 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(ShelfError::InvalidArgument(format!(
            "worker count {:?}: {}",
            raw, e
        ))),
    }
}

/// Parse a comma-separated list of positive efficiency weights.
pub fn parse_efficiencies(raw: &str) -> Result<Vec<u32>, ShelfError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u32>() {
            Ok(0) => Err(ShelfError::InvalidArgument(
                "efficiency weights must be positive".to_string(),
            )),
            Ok(w) => Ok(w),
            Err(e) => Err(ShelfError::InvalidArgument(format!(
                "efficiency {:?}: {}",
                s, e
            ))),
        })
        .collect()
}

/// Parse a comma-separated genre list, dropping blanks.
pub fn parse_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub paths: PathsConfig,
    pub model: ModelConfig,
    pub workers: WorkerConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `SHELF_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("SHELF_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            paths: PathsConfig::from_env_profiled(p),
            model: ModelConfig::from_env_profiled(p),
            workers: WorkerConfig::from_env_profiled(p),
        }
    }

    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ShelfError> {
        toml::from_str(raw).map_err(|e| ShelfError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ShelfError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
            .map_err(|e| ShelfError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  documents:   dir={}", self.paths.documents_dir.display());
        tracing::info!("  corpus:      path={}", self.paths.corpus_path.display());
        tracing::info!("  model:       path={}, genres={}", self.paths.model_path.display(), self.model.genres.len());
        tracing::info!("  report:      path={}", self.paths.report_path.display());
        tracing::info!(
            "  workers:     count={}, parallel_dispatch={}",
            self.workers.count, self.workers.parallel_dispatch
        );
    }

    /// Return the effective configuration as JSON.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "paths": {
                "documents_dir": self.paths.documents_dir,
                "corpus_path": self.paths.corpus_path,
                "model_path": self.paths.model_path,
                "report_path": self.paths.report_path,
            },
            "model": { "genres": self.model.genres },
            "workers": {
                "count": self.workers.count,
                "efficiencies": self.workers.efficiencies,
                "parallel_dispatch": self.workers.parallel_dispatch,
            },
        })
    }
}

// ── Paths ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory whose regular files are classified.
    pub documents_dir: PathBuf,
    /// Labeled training corpus (CSV: title, genre, summary).
    pub corpus_path: PathBuf,
    /// Persisted model file.
    pub model_path: PathBuf,
    /// Append-only classification report.
    pub report_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("data/documents"),
            corpus_path: PathBuf::from("data/book.csv"),
            model_path: PathBuf::from("model.dat"),
            report_path: PathBuf::from("classification_report.txt"),
        }
    }
}

impl PathsConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            documents_dir: profiled_env_path(p, "SHELF_DOCUMENTS_DIR", "data/documents"),
            corpus_path: profiled_env_path(p, "SHELF_CORPUS_PATH", "data/book.csv"),
            model_path: profiled_env_path(p, "SHELF_MODEL_PATH", "model.dat"),
            report_path: profiled_env_path(p, "SHELF_REPORT_PATH", "classification_report.txt"),
        }
    }
}

// ── Model ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Predefined genre names.
    pub genres: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            genres: DEFAULT_GENRES.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl ModelConfig {
    fn from_env_profiled(p: &str) -> Self {
        match profiled_env_opt(p, "SHELF_GENRES") {
            Some(raw) => Self { genres: parse_genres(&raw) },
            None => Self::default(),
        }
    }
}

// ── Workers ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of worker threads.
    pub count: usize,
    /// Per-worker load weight. Empty = 1 for every worker.
    pub efficiencies: Vec<u32>,
    /// Assign documents from the rayon pool instead of the calling thread.
    pub parallel_dispatch: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_WORKERS,
            efficiencies: Vec::new(),
            parallel_dispatch: true,
        }
    }
}

impl WorkerConfig {
    fn from_env_profiled(p: &str) -> Self {
        let count = match profiled_env_opt(p, "SHELF_WORKERS") {
            Some(raw) => parse_worker_count(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "using default worker count {}", DEFAULT_WORKERS);
                DEFAULT_WORKERS
            }),
            None => DEFAULT_WORKERS,
        };

        let efficiencies = match profiled_env_opt(p, "SHELF_WORKER_EFFICIENCIES") {
            Some(raw) => parse_efficiencies(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring worker efficiencies");
                Vec::new()
            }),
            None => Vec::new(),
        };

        Self {
            count,
            efficiencies,
            parallel_dispatch: profiled_env_parsed(p, "SHELF_PARALLEL_DISPATCH", true),
        }
    }

    /// Worker count, with zero replaced by the default.
    pub fn resolved_count(&self) -> usize {
        if self.count == 0 {
            tracing::warn!("worker count 0 is invalid, using default {}", DEFAULT_WORKERS);
            DEFAULT_WORKERS
        } else {
            self.count
        }
    }

    /// One positive weight per worker. An empty, mis-sized, or non-positive
    /// list falls back to weight 1 for everyone.
    pub fn resolved_efficiencies(&self) -> Vec<u32> {
        let count = self.resolved_count();
        if self.efficiencies.is_empty() {
            return vec![1; count];
        }
        if self.efficiencies.len() != count {
            tracing::warn!(
                expected = count,
                got = self.efficiencies.len(),
                "efficiency list does not match worker count, using 1 for all"
            );
            return vec![1; count];
        }
        if self.efficiencies.contains(&0) {
            tracing::warn!("efficiency weights must be positive, using 1 for all");
            return vec![1; count];
        }
        self.efficiencies.clone()
    }
}
