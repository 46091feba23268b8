//! Small string helpers shared across the pipeline.
//!
//! - Character-aware clipping for highlight texts (the 170-character cap)
//! - Log-safe truncation for LLM response previews

/// Clip a string to at most `max` characters.
///
/// Operates on `char` boundaries, never bytes, so multi-byte text is safe
/// to clip. Returns the input unchanged when it already fits.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clip_chars("hello", 10), "hello");
/// assert_eq!(clip_chars("hello", 3), "hel");
/// ```
pub fn clip_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended. Used when logging non-conforming LLM
/// responses without flooding the log.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_chars_short_string() {
        assert_eq!(clip_chars("hello", 170), "hello");
    }

    #[test]
    fn test_clip_chars_exact_boundary() {
        let s = "a".repeat(170);
        assert_eq!(clip_chars(&s, 170), s);
    }

    #[test]
    fn test_clip_chars_long_string() {
        let s = "a".repeat(200);
        let clipped = clip_chars(&s, 170);
        assert_eq!(clipped.chars().count(), 170);
    }

    #[test]
    fn test_clip_chars_multibyte() {
        let s = "é".repeat(200);
        let clipped = clip_chars(&s, 170);
        assert_eq!(clipped.chars().count(), 170);
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let s = "é".repeat(100); // 2 bytes per char
        let result = truncate_for_log(&s, 99);
        assert!(result.contains("…(+"));
    }
}
