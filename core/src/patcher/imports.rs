use regex::Regex;
use std::sync::OnceLock;

/// What `ensure_import` did to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// The exact import line was already in the file.
    AlreadyPresent,
    /// The line was added after the last import statement.
    Inserted,
    /// The file has no import statement to anchor on; nothing was added.
    NoImportSection,
}

/// Matches an import statement from the `import` keyword at the start of a
/// line up to the first `;` on that line. Only a `{ ... }` list may span
/// several lines; a statement without a semicolon never matches.
fn import_statement_re() -> &'static Regex {
    static IMPORT_RE: OnceLock<Regex> = OnceLock::new();
    IMPORT_RE.get_or_init(|| {
        Regex::new(r"(?m)^import\b[^;\n{]*(?:\{[^{};]*\}[^;\n]*)?;").expect("Invalid regex")
    })
}

/// Adds `import_line` right after the last import statement, unless the file
/// already contains it verbatim.
///
/// Membership is a plain substring test, so an equivalent import written with
/// different spacing is not recognized and would be added again.
pub fn ensure_import(source: &str, import_line: &str) -> (String, ImportStatus) {
    let clean_stmt = import_line.trim();

    if source.contains(clean_stmt) {
        return (source.into(), ImportStatus::AlreadyPresent);
    }

    let Some(last) = import_statement_re().find_iter(source).last() else {
        return (source.into(), ImportStatus::NoImportSection);
    };

    let mut new_source = source.to_string();
    new_source.insert_str(last.end(), &format!("\n{}", clean_stmt));
    (new_source, ImportStatus::Inserted)
}
