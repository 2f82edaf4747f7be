//! # Batch Runner
//!
//! Drives the load → patch → write pipeline over every configured target.
//! A failure on one file becomes that file's `Failed` outcome and never stops
//! the batch.

use crate::config::PatchConfig;
use crate::error::{AppError, AppResult};
use crate::fs::{load_source, write_atomic};
use crate::outcome::{FileReport, PatchOutcome};
use crate::patcher::Patcher;
use rayon::prelude::*;
use std::collections::HashSet;
use std::io;
use std::path::{Component, Path, PathBuf};

/// How a batch is executed.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory the target paths are relative to.
    pub root: PathBuf,
    /// Worker count. `0` and `1` both mean sequential.
    pub jobs: usize,
    /// Compute outcomes without writing anything.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            jobs: 1,
            dry_run: false,
        }
    }
}

/// Loads, patches and stores one file.
pub fn patch_file(patcher: &Patcher, path: &Path, dry_run: bool) -> PatchOutcome {
    match try_patch_file(patcher, path, dry_run) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "patch failed");
            PatchOutcome::Failed(e.to_string())
        }
    }
}

fn try_patch_file(patcher: &Patcher, path: &Path, dry_run: bool) -> AppResult<PatchOutcome> {
    let source = load_source(path)?;
    let patch = patcher.apply(&source);

    if patch.outcome.is_partial() {
        tracing::warn!(path = %path.display(), outcome = %patch.outcome, "guard incomplete");
    }

    if patch.outcome.is_change() && !dry_run {
        write_atomic(path, &patch.content)?;
    }

    Ok(patch.outcome)
}

/// Patches every target in `config` and returns one report per distinct
/// target, in configuration order.
///
/// Errors only if the run cannot start (invalid configuration or worker pool).
pub fn run(config: &PatchConfig, options: &RunOptions) -> AppResult<Vec<FileReport>> {
    run_with(config, options, |_| Ok(()))
}

/// Like [`run`], handing each report to `on_report` in configuration order.
///
/// Sequential runs call `on_report` as soon as a file is done, before the
/// next one is loaded; pooled runs call it once the pool has drained.
pub fn run_with<F>(
    config: &PatchConfig,
    options: &RunOptions,
    mut on_report: F,
) -> AppResult<Vec<FileReport>>
where
    F: FnMut(&FileReport) -> io::Result<()>,
{
    config.validate()?;
    let patcher = Patcher::new(config.spec.clone())?;
    let targets = unique_targets(&config.targets);

    let process = |target: &PathBuf| FileReport {
        path: target.clone(),
        outcome: patch_file(&patcher, &options.root.join(target), options.dry_run),
    };

    if options.jobs <= 1 {
        let mut reports = Vec::with_capacity(targets.len());
        for target in &targets {
            let report = process(target);
            on_report(&report)?;
            reports.push(report);
        }
        return Ok(reports);
    }

    tracing::debug!(jobs = options.jobs, files = targets.len(), "starting worker pool");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| AppError::General(format!("Failed to start worker pool: {}", e)))?;

    let reports: Vec<FileReport> = pool.install(|| targets.par_iter().map(process).collect());
    for report in &reports {
        on_report(report)?;
    }
    Ok(reports)
}

/// Drops repeated paths, keeping the first occurrence.
///
/// `./a.ts` and `a.ts` name the same file, so `.` components are ignored when
/// comparing.
fn unique_targets(targets: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    targets
        .iter()
        .filter(|t| {
            let key: PathBuf = t
                .components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect();
            let fresh = seen.insert(key);
            if !fresh {
                tracing::warn!(path = %t.display(), "duplicate target ignored");
            }
            fresh
        })
        .cloned()
        .collect()
}
