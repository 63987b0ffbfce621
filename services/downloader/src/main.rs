//! Climate-data retrieval job front end.
//!
//! Loads a YAML job configuration, applies command-line overrides, checks
//! the requested pressure levels and prints a summary of what the job will do.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use climdata_common::{JobConfig, Overrides, Summary};

#[derive(Parser, Debug)]
#[command(name = "climdata-downloader")]
#[command(about = "Script for data retrieval and processing")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "CLIMDATA_CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    /// Number of parallel processes (overrides `nprocs` in the config)
    #[arg(short, long)]
    nprocs: Option<usize>,

    /// Update existing dataset
    #[arg(short, long)]
    update: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            nprocs: self.nprocs,
            update: self.update,
        }
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// `RUST_LOG` takes precedence over `--log-level`.
fn log_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(parse_level(log_level).into()))
}

fn init_tracing(args: &Args) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(log_filter(&args.log_level))
        .with_target(true)
        .with_writer(std::io::stderr);

    // stdout is reserved for the summary
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Load the job configuration and bring it to a runnable state.
fn load_job(args: &Args) -> Result<JobConfig> {
    info!(path = %args.config.display(), "Loading job configuration");

    let mut config = JobConfig::load(&args.config)
        .with_context(|| format!("Error loading config file {}", args.config.display()))?;

    let overrides = args.overrides();
    debug!(nprocs = ?overrides.nprocs, update = overrides.update, "Applying command-line overrides");
    config.apply_overrides(&overrides);
    config.validate().context("Invalid job configuration")?;

    info!(
        dataset = %config.dataset,
        unit = %config.unit(),
        levels = ?config.levelout.rendered_levels(),
        "Job configuration validated"
    );
    Ok(config)
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    let config = load_job(&args)?;
    print!("{}", Summary(&config));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{config_with_levelout, write_temp_config, FULL_CONFIG};

    fn args_for(path: &std::path::Path, extra: &[&str]) -> Args {
        let mut argv = vec!["climdata-downloader", "--config", path.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_short_flags() {
        let args =
            Args::try_parse_from(["climdata-downloader", "-c", "job.yaml", "-n", "4", "-u"]).unwrap();
        assert_eq!(args.config, PathBuf::from("job.yaml"));
        assert_eq!(args.nprocs, Some(4));
        assert!(args.update);
        assert_eq!(
            args.overrides(),
            Overrides {
                nprocs: Some(4),
                update: true
            }
        );
    }

    #[test]
    fn test_flags_default_to_no_overrides() {
        let args = Args::try_parse_from(["climdata-downloader", "-c", "job.yaml"]).unwrap();
        assert_eq!(args.overrides(), Overrides::default());
        assert!(!args.json_logs);
    }

    #[test]
    fn test_nprocs_must_be_a_number() {
        let result = Args::try_parse_from(["climdata-downloader", "-n", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_log_filter_uses_level_flag() {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!("SKIPPED: RUST_LOG is set");
            return;
        }
        assert_eq!(log_filter("debug").to_string().to_lowercase(), "debug");
        assert_eq!(log_filter("nonsense").to_string().to_lowercase(), "info");
    }

    #[test]
    fn test_load_job_applies_overrides() {
        let file = write_temp_config(FULL_CONFIG);
        let config = load_job(&args_for(file.path(), &["-n", "12", "-u"])).unwrap();
        assert_eq!(config.nprocs, 12);
        assert!(config.year.update);
    }

    #[test]
    fn test_load_job_rejects_zero_processes() {
        let file = write_temp_config(FULL_CONFIG);
        let err = load_job(&args_for(file.path(), &["-n", "0"])).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid number of parallel processes"));
    }

    #[test]
    fn test_load_job_reports_invalid_levels() {
        let file = write_temp_config(&config_with_levelout("['500', 'abc']"));
        let err = load_job(&args_for(file.path(), &[])).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.starts_with("Error loading config file"), "{}", msg);
        assert!(msg.contains("Invalid levelout list"), "{}", msg);
    }
}
