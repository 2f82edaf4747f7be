/// Returns true if the guard marker occurs anywhere in `source`.
///
/// Presence only: a marker inside a comment or a string still counts, which
/// errs on the side of never inserting the guard twice.
pub fn is_patched(source: &str, marker: &str) -> bool {
    source.contains(marker)
}
