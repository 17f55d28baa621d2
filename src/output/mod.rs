// Output formatting — terminal display for digests, verdicts, and reports.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Preview of an article body: the first `word_limit` words if there are
/// more, otherwise the first `char_limit` characters.
pub fn short_summary(text: &str, word_limit: usize, char_limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > word_limit {
        return format!("{}...", words[..word_limit].join(" "));
    }
    truncate_chars(text, char_limit)
}
