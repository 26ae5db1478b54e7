//! Validation utilities.

use crate::TesseraError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `TesseraError` on failure.
    fn validate_request(&self) -> Result<(), TesseraError> {
        self.validate().map_err(validation_errors_to_tessera_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `TesseraError`.
///
/// Field errors are flattened into `field: message` pairs, sorted by field
/// name so the message is stable.
#[must_use]
pub fn validation_errors_to_tessera_error(errors: ValidationErrors) -> TesseraError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string());
                ((*field).to_string(), message)
            })
        })
        .collect();
    field_errors.sort();

    let message = field_errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ");

    TesseraError::Validation(message)
}

impl From<ValidationErrors> for TesseraError {
    fn from(errors: ValidationErrors) -> Self {
        validation_errors_to_tessera_error(errors)
    }
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that an id is positive, as AUTO_INCREMENT keys are.
    pub fn positive_id(id: &crate::UserId) -> Result<(), ValidationError> {
        if id.into_inner() <= 0 {
            return Err(ValidationError::new("positive_id"));
        }
        Ok(())
    }
}
