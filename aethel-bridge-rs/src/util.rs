//! Utility module for common functionality

/// Truncate a string for log output, adding ellipsis if truncated
///
/// Counts characters rather than bytes so arbitrary response bodies never
/// split a multi-byte sequence.
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("hello", 10), "hello");
        assert_eq!(truncate_for_log("hello world", 8), "hello wo...");
        assert_eq!(truncate_for_log("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        assert_eq!(truncate_for_log("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_generate_request_id_unique() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
