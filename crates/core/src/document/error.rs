use thiserror::Error;

/// Errors raised while translating between native and wire documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Undefined value for `{field}`: enable remove_undefined_values to drop undefined fields")]
    UndefinedValue { field: String },
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_value_display_names_field() {
        let error = TranslateError::UndefinedValue {
            field: "title".to_string(),
        };
        assert!(error.to_string().starts_with("Undefined value for `title`"));
    }

    #[test]
    fn test_invalid_number_display() {
        let error = TranslateError::InvalidNumber("NaN".to_string());
        assert_eq!(error.to_string(), "Invalid number: NaN");
    }
}
