#![deny(missing_docs)]

//! # Code Patching
//!
//! Text-level utilities for injecting the guard into route handler sources.
//! Matching is lexical (substring and regex), never a full parse.
//!
//! - **marker**: Idempotency check.
//! - **imports**: Import line injection.
//! - **anchors**: Snippet placement (entry block, handler signature fallback).
//! - **workflows**: The full recipe combining the three.

/// Idempotency marker detection.
pub mod marker;

/// Import statement injection.
pub mod imports;

/// Anchor-based snippet insertion.
pub mod anchors;

/// High-level patching workflows.
pub mod workflows;

pub use anchors::{insert_snippet, Anchor, Anchors, SnippetStatus};
pub use imports::{ensure_import, ImportStatus};
pub use marker::is_patched;
pub use workflows::{Patcher, SourcePatch};
