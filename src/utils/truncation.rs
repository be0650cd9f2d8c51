const MAX_ERROR_LENGTH: usize = 500;

/// Shorten text quoted inside an error message, respecting char boundaries.
pub fn truncate_error(error: &str) -> String {
    if error.len() <= MAX_ERROR_LENGTH {
        return error.to_string();
    }
    let mut end = MAX_ERROR_LENGTH;
    while !error.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &error[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_error("bad gateway"), "bad gateway");
    }

    #[test]
    fn test_long_text_truncated() {
        let long = "x".repeat(MAX_ERROR_LENGTH + 50);
        let out = truncate_error(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.len(), MAX_ERROR_LENGTH + 3);
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        let long = "é".repeat(MAX_ERROR_LENGTH);
        let out = truncate_error(&long);
        assert!(out.ends_with("..."));
    }
}
