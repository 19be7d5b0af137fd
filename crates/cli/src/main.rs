use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};

use scsdefs_core::{AppConfig, ConfigOverrides};

/// Extract trailer, cargo, company and city facts from unpacked definition files.
#[derive(Debug, Parser)]
#[command(name = "scsdefs", version)]
struct Cli {
    /// Directory with the unpacked def files
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Name added to every output file (e.g. a DLC name)
    #[arg(long = "dlc", visible_alias = "tag", value_name = "TAG")]
    dlc: Option<String>,

    /// Directory the JSON files are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Also write report_<TAG>.json listing skipped inputs
    #[arg(long)]
    report: bool,

    /// Explicit config file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(ConfigOverrides {
        base_dir: cli.base_dir,
        tag: cli.dlc,
        output_dir: cli.output_dir,
        write_report: cli.report.then_some(true),
    })?;

    let summary = scsdefs_core::run(&config);
    tracing::info!(
        "{} files read, {} documents written, {} issues",
        summary.files_scanned,
        summary.written.len(),
        summary.issues.len()
    );
    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
