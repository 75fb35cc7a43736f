use anyhow::{Context, Result};
use shelf_core::config::{parse_worker_count, DEFAULT_WORKERS};
use shelf_core::Config;
use tracing::{debug, warn};

use crate::cli::CliArgs;

/// Effective configuration: the TOML file when given, the environment
/// otherwise, then command-line overrides.
pub fn resolve(args: &CliArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "Reading config file");
            Config::from_toml_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Config::from_env(),
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

pub fn apply_overrides(config: &mut Config, args: &CliArgs) {
    if let Some(dir) = &args.documents {
        config.paths.documents_dir = dir.clone();
    }
    if let Some(path) = &args.corpus {
        config.paths.corpus_path = path.clone();
    }
    if let Some(path) = &args.model {
        config.paths.model_path = path.clone();
    }
    if let Some(path) = &args.report {
        config.paths.report_path = path.clone();
    }
    if let Some(raw) = &args.workers {
        config.workers.count = parse_worker_count(raw).unwrap_or_else(|e| {
            warn!(error = %e, "using default worker count {}", DEFAULT_WORKERS);
            DEFAULT_WORKERS
        });
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("shelf").chain(argv.iter().copied()))
    }

    #[test]
    fn positional_worker_count() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args(&["4"]));
        assert_eq!(config.workers.count, 4);
    }

    #[test]
    fn invalid_worker_count_falls_back() {
        for raw in ["zero", "0", "-3", "2.5"] {
            let mut config = Config::default();
            config.workers.count = 7;
            apply_overrides(&mut config, &args(&["--", raw]));
            assert_eq!(config.workers.count, DEFAULT_WORKERS, "input {:?}", raw);
        }
    }

    #[test]
    fn absent_worker_count_keeps_config() {
        let mut config = Config::default();
        config.workers.count = 3;
        apply_overrides(&mut config, &args(&[]));
        assert_eq!(config.workers.count, 3);
    }

    #[test]
    fn path_overrides() {
        let mut config = Config::default();
        let a = args(&[
            "--documents", "in",
            "--corpus", "c.csv",
            "--model", "m.dat",
            "--report", "r.txt",
            "--retrain",
        ]);
        apply_overrides(&mut config, &a);

        assert_eq!(config.paths.documents_dir, PathBuf::from("in"));
        assert_eq!(config.paths.corpus_path, PathBuf::from("c.csv"));
        assert_eq!(config.paths.model_path, PathBuf::from("m.dat"));
        assert_eq!(config.paths.report_path, PathBuf::from("r.txt"));
        assert!(a.retrain);
    }

    #[test]
    fn toml_file_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("shelf.toml");
        std::fs::write(&path, "[workers]\ncount = 2\nparallel_dispatch = false\n").unwrap();

        let config = resolve(&args(&["--config", path.to_str().unwrap(), "5"])).unwrap();

        assert_eq!(config.workers.count, 5);
        assert!(!config.workers.parallel_dispatch);
        assert_eq!(config.model.genres.len(), 10);
    }

    #[test]
    fn missing_toml_file_is_error() {
        let err = resolve(&args(&["--config", "/definitely/not/here.toml"])).unwrap_err();
        assert!(format!("{:#}", err).contains("not/here.toml"));
    }
}
