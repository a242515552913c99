//! String utilities for the domain layer.

/// Single-line preview of `s`, at most `max_chars` characters.
///
/// Runs of whitespace (including newlines) collapse to one space so the
/// preview fits on one log line. An ellipsis is appended when truncated.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let kept: String = collapsed.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn test_preview_truncates_with_ellipsis() {
        assert_eq!(preview("hello world", 8), "hello...");
    }

    #[test]
    fn test_preview_collapses_newlines() {
        assert_eq!(preview("line one\n\n  line two", 40), "line one line two");
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        assert_eq!(preview("日本語テスト", 6), "日本語テスト");
        assert_eq!(preview("日本語テスト文字列", 6), "日本語...");
    }
}
