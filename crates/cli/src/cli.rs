use std::path::PathBuf;

use clap::Parser;

/// Classify every document in a directory by genre.
///
/// Loads the persisted model (or trains one from the labeled corpus), then
/// spreads the documents over a pool of workers and appends one report line
/// per document.
#[derive(Parser, Debug)]
#[command(name = "shelf", about = "Concurrent Naive Bayes genre classifier")]
pub struct CliArgs {
    /// Number of workers. Invalid values fall back to the default.
    #[arg(value_name = "WORKERS")]
    pub workers: Option<String>,

    /// Directory of documents to classify (overrides SHELF_DOCUMENTS_DIR)
    #[arg(long)]
    pub documents: Option<PathBuf>,

    /// Labeled CSV corpus: title,genre,summary (overrides SHELF_CORPUS_PATH)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Persisted model file (overrides SHELF_MODEL_PATH)
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Report file, appended to (overrides SHELF_REPORT_PATH)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// TOML config file used instead of the environment
    #[arg(long, env = "SHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Train from the corpus even if a model file exists
    #[arg(long)]
    pub retrain: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
