//! Error types for the Nutrition Tracker core

use thiserror::Error;

/// Errors raised by the body composition engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositionError {
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: &'static str, message: String },
}

impl CompositionError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CompositionError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            CompositionError::InvalidInput { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = CompositionError::invalid("body_weight_kg", "must be greater than 0");
        assert_eq!(err.field(), "body_weight_kg");
        assert_eq!(
            err.to_string(),
            "Invalid input for body_weight_kg: must be greater than 0"
        );
    }
}
