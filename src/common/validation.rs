// Request body checks run by handlers before touching the store

use super::ApiError;

/// One rejected field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field,
            message: message.into(),
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `Err(ApiError::ValidationError)` listing every rejected field.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_valid() {
            return Ok(());
        }
        let message = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join(", ");
        Err(ApiError::ValidationError(message))
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_joined_per_field() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(ValidationResult::new().into_result().is_ok());

        result.add_error("email", "Email is required");
        result.add_error("password", "Password is required");
        assert_eq!(result.errors().len(), 2);

        match result.into_result() {
            Err(ApiError::ValidationError(msg)) => {
                assert_eq!(msg, "email: Email is required, password: Password is required")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
