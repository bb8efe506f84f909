//! Error taxonomy for postedit domain operations.

/// Errors raised while decoding input or reading settings.
///
/// None of these ever reach the caller as a failure: the pipeline logs them
/// and falls back to "nothing to do".
#[derive(Debug, thiserror::Error)]
pub enum PostEditError {
    #[error("malformed edit notification: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: String, reason: String },
}

/// Result type for postedit domain operations.
pub type Result<T> = std::result::Result<T, PostEditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_event_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PostEditError::from(json_err);
        assert!(err.to_string().starts_with("malformed edit notification:"));
    }

    #[test]
    fn invalid_setting_display() {
        let err = PostEditError::InvalidSetting {
            name: "ambiguous_policy".to_string(),
            reason: "expected javascript or python".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid setting ambiguous_policy: expected javascript or python"
        );
    }
}
