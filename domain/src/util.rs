//! Shared text helpers.

/// Longest prefix of `s` that fits in `max_bytes` without splitting a
/// UTF-8 character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= max_bytes)
        .last()
        .unwrap_or(0);
    &s[..end]
}

/// Single-line preview for terminal and log output: newlines collapsed,
/// cut at `max_bytes` with a trailing `...` when shortened.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= max_bytes {
        return flat;
    }
    format!("{}...", truncate_str(&flat, max_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("describe-instances", 8), "describe");
        assert_eq!(truncate_str("ls", 10), "ls");
        assert_eq!(truncate_str("", 4), "");
    }

    #[test]
    fn truncate_respects_char_boundary() {
        // Each Hangul syllable is 3 bytes.
        let s = "인스턴스";
        assert_eq!(truncate_str(s, 4), "인");
        assert_eq!(truncate_str(s, 6), "인스");
        assert_eq!(truncate_str(s, 2), "");
    }

    #[test]
    fn preview_collapses_and_cuts() {
        assert_eq!(preview("{\n  \"count\": 2\n}", 100), "{ \"count\": 2 }");
        assert_eq!(preview("abcdefghij", 4), "abcd...");
    }
}
