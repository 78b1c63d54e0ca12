//! Validation error types and shared text rules

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match the required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value outside a closed set
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },
}

/// Trim `value` and check it is non-empty and at most `max` characters.
pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Check that a numeric identifier is at least 1.
pub(crate) fn positive_id(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if value < 1 {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 100 characters"
        );
    }

    #[test]
    fn bounded_text_counts_chars_not_bytes() {
        // 3 hangul syllables are 9 bytes
        assert_eq!(bounded_text("title", " 게시판 ", 3).unwrap(), "게시판");
        assert!(matches!(
            bounded_text("title", "게시판", 2).unwrap_err(),
            ValidationError::TooLong { max: 2, .. }
        ));
    }

    #[test]
    fn positive_id_rejects_zero() {
        assert!(positive_id("bno", 0).is_err());
        assert_eq!(positive_id("bno", 7).unwrap(), 7);
    }
}
