//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// `Read` and `Write` carry the offending path so a per-file failure can be
/// reported without extra context. String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A target file could not be read (missing, unreadable, not UTF-8).
    #[from(ignore)]
    #[display("Read Error ({}): {source}", path.display())]
    Read {
        /// The file that failed to load.
        path: PathBuf,
        /// Underlying cause.
        source: std::io::Error,
    },

    /// A target file could not be written back.
    #[from(ignore)]
    #[display("Write Error ({}): {source}", path.display())]
    Write {
        /// The file that failed to persist.
        path: PathBuf,
        /// Underlying cause.
        source: std::io::Error,
    },

    /// Invalid or unreadable patch configuration.
    /// Excluded from `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Read { source, .. } | AppError::Write { source, .. } => Some(source),
            AppError::Config(_) | AppError::General(_) => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
