//! Shared utility functions and constants

/// Width of the value column in span listings
pub const VALUE_PREVIEW_LEN: usize = 48;

/// Truncate a string to `max` characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate or pad to exact length, using ellipsis for truncation
pub fn truncate_or_pad(s: &str, len: usize) -> String {
    if s.chars().count() > len {
        let kept: String = s.chars().take(len.saturating_sub(1)).collect();
        format!("{}…", kept)
    } else {
        format!("{:<width$}", s, width = len)
    }
}

/// Make control characters visible so a multi-line value stays on one row
pub fn single_line(s: &str) -> String {
    s.replace('\r', "\\r").replace('\n', "\\n").replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_truncate_or_pad() {
        assert_eq!(truncate_or_pad("hi", 5), "hi   ");
        assert_eq!(truncate_or_pad("hello world", 5), "hell…");
        assert_eq!(truncate_or_pad("ünïcode", 4), "ünï…");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\nb\tc"), "a\\nb\\tc");
    }
}
