mod cli;
mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use shelf_ingest::{FileReportSink, FsDocumentSource};
use shelf_scheduler::{Manager, ModelPlan, RunContext, RunSummary, SchedulerConfig};
use tracing::{debug, error, info};

use crate::cli::CliArgs;

fn main() -> ExitCode {
    shelf_core::config::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(summary) => {
            info!("Run summary: {}", summary.to_json());
            if args.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => error!(error = %e, "Failed to render summary"),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<RunSummary> {
    let config = config::resolve(args)?;
    config.log_summary();
    debug!("Effective config: {}", config.summary());

    let scheduler = SchedulerConfig::from(&config.workers);
    let ctx = RunContext::new(
        &scheduler,
        Arc::new(FsDocumentSource::new(&config.paths.documents_dir)),
        Arc::new(FileReportSink::new(&config.paths.report_path)),
    )
    .context("invalid worker configuration")?;

    let plan = ModelPlan::new(
        &config.paths.model_path,
        &config.paths.corpus_path,
        config.model.genres.clone(),
    )
    .retrain(args.retrain);

    let manager = Manager::new(Arc::new(ctx));
    manager
        .run(&plan)
        .with_context(|| format!("run over {} failed", config.paths.documents_dir.display()))
}
