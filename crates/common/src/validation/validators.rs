// Field Validators - Reusable validation components
use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Range validator for numeric types
#[derive(Debug, Clone)]
pub struct RangeValidator<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T> Default for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    /// Create a new range validator with no constraints
    pub const fn empty() -> Self {
        Self { min: None, max: None }
    }

    /// Create a new range validator with min and max values
    pub const fn new(min: T, max: T) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Set minimum value
    #[must_use]
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value
    #[must_use]
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        if let Some(ref min) = self.min {
            if value < min {
                return Err(format!("must be at least {min}"));
            }
        }

        if let Some(ref max) = self.max {
            if value > max {
                return Err(format!("must not exceed {max}"));
            }
        }

        Ok(())
    }
}

/// String validator with length constraints
#[derive(Debug, Clone)]
pub struct StringValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    not_empty: bool,
    trim: bool,
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringValidator {
    /// Create a new string validator
    pub const fn new() -> Self {
        Self { min_length: None, max_length: None, not_empty: false, trim: true }
    }

    /// Require non-empty string
    #[must_use]
    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Set minimum length
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set maximum length
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set whether to trim before validation
    #[must_use]
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let val = if self.trim { value.trim() } else { value };
        let len = val.chars().count();

        if self.not_empty && val.is_empty() {
            return Err("cannot be empty".to_string());
        }

        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("must be at least {min} characters long"));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("must not exceed {max} characters"));
            }
        }

        Ok(())
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

static EMAIL_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

/// Email validator
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Create a new email validator
    pub const fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        match EMAIL_REGEX.as_ref() {
            Some(re) if re.is_match(value.trim()) => Ok(()),
            Some(_) => Err("is not a valid email address".to_string()),
            None => Err("email pattern unavailable".to_string()),
        }
    }
}

impl FieldValidator<String> for EmailValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_validator_bounds_are_inclusive() {
        let validator = RangeValidator::new(0_i64, 100);
        assert!(validator.validate(&0).is_ok());
        assert!(validator.validate(&100).is_ok());
        assert_eq!(validator.validate(&101).unwrap_err(), "must not exceed 100");
        assert_eq!(validator.validate(&-1).unwrap_err(), "must be at least 0");
    }

    #[test]
    fn range_validator_min_only() {
        let validator = RangeValidator::empty().min(0.0_f64);
        assert!(validator.validate(&1_000_000.0).is_ok());
        assert!(validator.validate(&-0.5).is_err());
    }

    #[test]
    fn string_validator_trims_before_checking() {
        let validator = StringValidator::new().not_empty().max_length(5);
        assert!(FieldValidator::<str>::validate(&validator, "  abc  ").is_ok());
        assert!(FieldValidator::<str>::validate(&validator, "   ").is_err());
        assert!(FieldValidator::<str>::validate(&validator, "abcdef").is_err());
    }

    #[test]
    fn email_validator_accepts_common_addresses() {
        let validator = EmailValidator::new();
        assert!(FieldValidator::<str>::validate(&validator, "a@x.com").is_ok());
        assert!(FieldValidator::<str>::validate(&validator, "first.last+tag@mail.example.org")
            .is_ok());
        assert!(FieldValidator::<str>::validate(&validator, "not-an-email").is_err());
        assert!(FieldValidator::<str>::validate(&validator, "a@b").is_err());
    }
}
