//! # Reporting
//!
//! Line-oriented status output: one line per file, a summary, and a
//! completion marker.

use crate::outcome::{FileReport, PatchOutcome};
use std::fmt;
use std::io::{self, Write};

/// Per-category outcome counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Already carried the guard.
    pub skipped: usize,
    /// Import and snippet both in place.
    pub patched: usize,
    /// Import-only, snippet-only and untouched files.
    pub partial: usize,
    /// Read or write failures.
    pub failed: usize,
}

impl Summary {
    /// Counts `outcome` into its category.
    pub fn record(&mut self, outcome: &PatchOutcome) {
        match outcome {
            PatchOutcome::Skipped => self.skipped += 1,
            PatchOutcome::FullyPatched => self.patched += 1,
            PatchOutcome::ImportOnlyPatched
            | PatchOutcome::SnippetOnlyPatched
            | PatchOutcome::NoChangeNoAnchor => self.partial += 1,
            PatchOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Number of files accounted for.
    pub fn total(&self) -> usize {
        self.skipped + self.patched + self.partial + self.failed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} patched, {} skipped, {} incomplete, {} failed",
            self.patched, self.skipped, self.partial, self.failed
        )
    }
}

/// Writes status lines to any sink (stdout in the CLI, a buffer in tests).
pub struct Reporter<W: Write> {
    out: W,
    summary: Summary,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: Summary::default(),
        }
    }

    /// Prints the status line for one file.
    pub fn record(&mut self, report: &FileReport) -> io::Result<()> {
        self.summary.record(&report.outcome);
        writeln!(self.out, "{}", report)
    }

    /// Prints the summary and the completion line, returning the counts.
    pub fn finish(mut self) -> io::Result<Summary> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.summary)?;
        writeln!(self.out, "Done.")?;
        self.out.flush()?;
        Ok(self.summary)
    }
}
