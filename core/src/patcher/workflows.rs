use crate::config::PatchSpec;
use crate::error::AppResult;
use crate::outcome::PatchOutcome;
use crate::patcher::anchors::{insert_snippet, Anchors, SnippetStatus};
use crate::patcher::imports::{ensure_import, ImportStatus};
use crate::patcher::marker::is_patched;

/// New file content together with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePatch {
    /// The (possibly unchanged) source text.
    pub content: String,
    /// Classification of the change. Never `Failed`.
    pub outcome: PatchOutcome,
}

/// Applies one `PatchSpec` to in-memory sources.
#[derive(Debug, Clone)]
pub struct Patcher {
    spec: PatchSpec,
    anchors: Anchors,
}

impl Patcher {
    /// Compiles the anchors for `spec`.
    pub fn new(spec: PatchSpec) -> AppResult<Self> {
        let anchors = Anchors::new(&spec.entry_anchor, &spec.handler_verbs)?;
        Ok(Self { spec, anchors })
    }

    /// The guard this patcher injects.
    pub fn spec(&self) -> &PatchSpec {
        &self.spec
    }

    /// Runs the marker check, import injection and snippet insertion.
    pub fn apply(&self, source: &str) -> SourcePatch {
        if is_patched(source, &self.spec.marker) {
            return SourcePatch {
                content: source.into(),
                outcome: PatchOutcome::Skipped,
            };
        }

        // 1. Import
        let (with_import, import_status) = ensure_import(source, &self.spec.import_line);
        tracing::debug!(?import_status, "import step");

        // 2. Snippet
        let (content, snippet_status) =
            insert_snippet(&with_import, &self.spec.snippet, &self.anchors);
        tracing::debug!(?snippet_status, "snippet step");

        let outcome = match (import_status, snippet_status) {
            (ImportStatus::AlreadyPresent | ImportStatus::Inserted, SnippetStatus::Inserted(_)) => {
                PatchOutcome::FullyPatched
            }
            (ImportStatus::NoImportSection, SnippetStatus::Inserted(_)) => {
                PatchOutcome::SnippetOnlyPatched
            }
            (ImportStatus::Inserted, SnippetStatus::AnchorNotFound) => {
                PatchOutcome::ImportOnlyPatched
            }
            (
                ImportStatus::AlreadyPresent | ImportStatus::NoImportSection,
                SnippetStatus::AnchorNotFound,
            ) => PatchOutcome::NoChangeNoAnchor,
        };

        SourcePatch { content, outcome }
    }
}
