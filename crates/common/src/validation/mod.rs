// Validation Module - field-level validation with aggregated errors
use std::fmt;

use serde::Serialize;

use crate::error::{ErrorClassification, ErrorSeverity};

mod validators;

pub use validators::{EmailValidator, FieldValidator, RangeValidator, StringValidator};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Merge another validation error into this one
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "Validation error with no specific field errors"),
            [only] => write!(f, "Validation failed: {} {}", only.field, only.message),
            many => {
                write!(f, "Validation failed with {} errors: ", many.len())?;
                for (i, error) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{} {}", error.field, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ErrorClassification for ValidationError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Info
    }
}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Collects field errors across a whole payload before failing.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.add_field_error(field, message);
    }

    /// Validate a field with a specific validator
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V) -> &mut Self
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if let Err(msg) = validator.validate(value) {
            self.add_error(field, msg);
        }
        self
    }

    /// Validate an optional field; `None` is accepted.
    pub fn validate_optional<T, V>(
        &mut self,
        field: &str,
        value: Option<&T>,
        validator: &V,
    ) -> &mut Self
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if let Some(value) = value {
            self.validate_field(field, value, validator);
        }
        self
    }

    /// Require a present, non-blank string.
    pub fn require(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            None => self.add_error(field, "is required"),
            Some(v) if v.trim().is_empty() => self.add_error(field, "cannot be empty"),
            Some(_) => {}
        }
        self
    }

    /// Check if validation has errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.error_count()
    }

    /// Get errors without consuming validator
    pub fn errors(&self) -> &ValidationError {
        &self.errors
    }

    /// Finalize and return result
    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
