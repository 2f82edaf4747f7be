#![deny(missing_docs)]

//! # Guardpatch CLI
//!
//! Injects the rate-limiting guard into the configured route handlers.
//!
//! With no arguments the built-in preset is applied to the current directory.
//! Every file gets one status line on stdout; per-file failures are reported
//! there and never change the exit status.

use clap::Parser;
use guardpatch_core::{run_with, AppResult, PatchConfig, Reporter, RunOptions, Summary};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Inject a rate-limiting guard into route handlers")]
struct Cli {
    /// Project root the target paths are relative to.
    #[clap(long, default_value = ".")]
    root: PathBuf,

    /// YAML file overriding the built-in targets and guard.
    #[clap(long, env = "GUARDPATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Number of files patched concurrently.
    #[clap(long, short = 'j', default_value_t = 1)]
    jobs: usize,

    /// Report what would change without writing any file.
    #[clap(long)]
    dry_run: bool,

    /// Print debug diagnostics to stderr.
    #[clap(long, short = 'v')]
    verbose: bool,
}

fn execute(cli: &Cli, out: impl io::Write) -> AppResult<Summary> {
    let config = match &cli.config {
        Some(path) => PatchConfig::load(path)?,
        None => PatchConfig::default(),
    };

    let options = RunOptions {
        root: cli.root.clone(),
        jobs: cli.jobs,
        dry_run: cli.dry_run,
    };

    let mut reporter = Reporter::new(out);
    run_with(&config, &options, |report| reporter.record(report))?;
    Ok(reporter.finish()?)
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let summary = execute(&cli, io::stdout().lock())?;
    tracing::debug!(files = summary.total(), "batch finished");

    Ok(())
}
