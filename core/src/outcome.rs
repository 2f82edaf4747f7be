//! # Patch Outcomes
//!
//! One result per target file. Every partial result has its own variant so a
//! report never passes off a half-applied guard as a full patch.

use std::fmt;
use std::path::PathBuf;

/// The result of patching one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The marker was already present; the file was not touched.
    Skipped,
    /// Import and snippet are both in place.
    FullyPatched,
    /// Import added, but no anchor for the snippet was found.
    ImportOnlyPatched,
    /// Snippet added, but the file has no import section to extend.
    SnippetOnlyPatched,
    /// Neither the import nor the snippet could be placed.
    NoChangeNoAnchor,
    /// Loading or writing the file failed.
    Failed(String),
}

impl PatchOutcome {
    /// True if the outcome implies new content for the file.
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            PatchOutcome::FullyPatched
                | PatchOutcome::ImportOnlyPatched
                | PatchOutcome::SnippetOnlyPatched
        )
    }

    /// True for the variants that leave the guard incomplete.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            PatchOutcome::ImportOnlyPatched
                | PatchOutcome::SnippetOnlyPatched
                | PatchOutcome::NoChangeNoAnchor
        )
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Skipped => write!(f, "skipped"),
            PatchOutcome::FullyPatched => write!(f, "patched"),
            PatchOutcome::ImportOnlyPatched => write!(f, "patched (import only, no anchor found)"),
            PatchOutcome::SnippetOnlyPatched => {
                write!(f, "patched (snippet only, no import section)")
            }
            PatchOutcome::NoChangeNoAnchor => write!(f, "unchanged (no anchor found)"),
            PatchOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A target path paired with what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Target path as configured (relative to the project root).
    pub path: PathBuf,
    /// What happened.
    pub outcome: PatchOutcome,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.outcome)
    }
}
