//! Text canonicalization helpers shared by the normalizer and the store.

/// Maximum analyzable text length in characters.
///
/// Longer payloads are truncated at a whitespace boundary so downstream
/// scoring stays stable for the same input.
pub const MAX_ANALYZABLE_CHARS: usize = 10_000;

/// Maximum stored report text length in characters.
pub const STORED_TEXT_CHARS: usize = 2_000;

/// Maximum preview length in characters for API responses.
pub const PREVIEW_CHARS: usize = 300;

/// Collapse all runs of whitespace (including newlines) to single spaces
/// and trim the ends.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, cutting at the last
/// whitespace boundary before the cap rather than mid-token.
///
/// Falls back to a hard cut when the prefix contains no whitespace at all.
pub fn truncate_at_boundary(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let prefix: String = input.chars().take(max_chars).collect();
    match prefix.rfind(char::is_whitespace) {
        Some(cut) if cut > 0 => prefix[..cut].trim_end().to_string(),
        _ => prefix,
    }
}

/// Build a short single-line preview with a trailing ellipsis when the
/// text was cut.
pub fn preview(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        trimmed.replace('\n', " ")
    } else {
        let cut: String = trimmed.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut.replace('\n', " "))
    }
}
