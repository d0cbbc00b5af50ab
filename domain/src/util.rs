//! Shared utility functions.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Short single-line preview of a prompt for log output.
pub fn log_preview(s: &str, max_bytes: usize) -> String {
    let flat = s.replace('\n', "\\n");
    let cut = truncate_str(&flat, max_bytes);
    if cut.len() < flat.len() {
        format!("{}...", cut)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_multibyte_boundary() {
        let s = "°C°F";
        // '°' is 2 bytes; cutting at 1 must back up to 0
        assert_eq!(truncate_str(s, 1), "");
        assert_eq!(truncate_str(s, 3), "°C");
    }

    #[test]
    fn preview_flattens_and_marks_truncation() {
        assert_eq!(log_preview("a\nb", 10), "a\\nb");
        assert_eq!(log_preview("abcdefgh", 4), "abcd...");
    }
}
