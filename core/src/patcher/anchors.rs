use crate::error::{AppError, AppResult};
use regex::Regex;
use std::fmt;

/// The insertion point a snippet was placed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Right after the entry-block opener (`try {` + newline).
    EntryBlock,
    /// Right after the opening brace of an exported verb handler.
    HandlerSignature,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::EntryBlock => write!(f, "entry block"),
            Anchor::HandlerSignature => write!(f, "handler signature"),
        }
    }
}

/// What `insert_snippet` did to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetStatus {
    /// Snippet inserted at the given anchor.
    Inserted(Anchor),
    /// Neither anchor exists; the source is unchanged.
    AnchorNotFound,
}

/// Compiled insertion points, tried in priority order.
#[derive(Debug, Clone)]
pub struct Anchors {
    entry_block: String,
    handler: Regex,
}

impl Anchors {
    /// Builds the anchors from the entry-block literal and the handler verbs
    /// recognized by the fallback (e.g. `GET`, `POST`).
    pub fn new(entry_block: &str, verbs: &[String]) -> AppResult<Self> {
        if verbs.is_empty() {
            return Err(AppError::Config(
                "At least one handler verb is required".into(),
            ));
        }

        let alternation = verbs
            .iter()
            .map(|v| regex::escape(v))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"export async function (?:{})\b[^{{]+\{{\n", alternation);
        let handler = Regex::new(&pattern)
            .map_err(|e| AppError::Config(format!("Invalid handler pattern: {}", e)))?;

        Ok(Self {
            entry_block: entry_block.to_string(),
            handler,
        })
    }

    /// Byte offset just past the preferred anchor, if any.
    fn locate(&self, source: &str) -> Option<(usize, Anchor)> {
        if let Some(pos) = source.find(&self.entry_block) {
            return Some((pos + self.entry_block.len(), Anchor::EntryBlock));
        }
        self.handler
            .find(source)
            .map(|m| (m.end(), Anchor::HandlerSignature))
    }
}

/// Inserts `snippet` after the first entry-block opener, falling back to the
/// first exported verb handler's opening brace.
///
/// Only the first anchor occurrence is used. A source with neither anchor is
/// returned unchanged with `SnippetStatus::AnchorNotFound`.
pub fn insert_snippet(source: &str, snippet: &str, anchors: &Anchors) -> (String, SnippetStatus) {
    let Some((insert_pos, anchor)) = anchors.locate(source) else {
        return (source.into(), SnippetStatus::AnchorNotFound);
    };

    let mut new_source = source.to_string();
    new_source.insert_str(insert_pos, snippet);
    (new_source, SnippetStatus::Inserted(anchor))
}
