#![deny(missing_docs)]

//! # Guardpatch Core
//!
//! Core library for injecting a rate-limiting guard into route handler
//! sources: idempotency check, import injection, anchor-based snippet
//! insertion, crash-safe writes and per-file reporting.

/// Shared error types.
pub mod error;

/// Patch configuration (targets and guard).
pub mod config;

/// Whole-file load and atomic store.
pub mod fs;

/// Per-file outcome types.
pub mod outcome;

/// Code patching utilities.
pub mod patcher;

/// Status output.
pub mod report;

/// Batch execution.
pub mod runner;

pub use config::{PatchConfig, PatchSpec};
pub use error::{AppError, AppResult};
pub use outcome::{FileReport, PatchOutcome};
pub use patcher::{Patcher, SourcePatch};
pub use report::{Reporter, Summary};
pub use runner::{patch_file, run, run_with, RunOptions};
