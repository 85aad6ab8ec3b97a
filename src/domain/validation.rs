//! Common validation utilities for domain objects
//!
//! Field checks shared by items, quotes and the upload policy tables so
//! every layer reports the same `DomainError::ValidationError` shape.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::errors::DomainError;

/// Stored-file extensions: a dot and 1..=10 lowercase ASCII alphanumerics
static EXTENSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.[a-z0-9]{1,10}$").expect("Invalid extension regex"));

/// Validation result type
pub type ValidationResult<T> = Result<T, DomainError>;

/// Common validation utilities
pub struct Validation;

impl Validation {
    /// Validate that a string is not empty or whitespace-only
    pub fn validate_not_empty(value: &str, field_name: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(DomainError::validation(field_name, "field_cannot_be_empty"));
        }
        Ok(())
    }

    /// Validate length constraints, counted in characters rather than bytes
    pub fn validate_length(
        value: &str,
        field_name: &str,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> ValidationResult<()> {
        let len = value.chars().count();

        if let Some(min) = min_length {
            if len < min {
                return Err(DomainError::validation(
                    field_name,
                    format!("Field must be at least {} characters long", min),
                ));
            }
        }

        if let Some(max) = max_length {
            if len > max {
                return Err(DomainError::validation(
                    field_name,
                    format!("Field must be at most {} characters long", max),
                ));
            }
        }

        Ok(())
    }

    /// Validate a stored-file extension. Anything outside the pattern
    /// could smuggle separators into a generated filename.
    pub fn validate_extension(extension: &str) -> bool {
        EXTENSION_REGEX.is_match(extension)
    }
}

/// Builder pattern for chained field validations
pub struct ValidationBuilder<T> {
    value: T,
    field_name: String,
    errors: Vec<String>,
}

impl<T> ValidationBuilder<T> {
    pub fn new(value: T, field_name: &str) -> Self {
        Self {
            value,
            field_name: field_name.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn not_empty(mut self) -> Self
    where
        T: AsRef<str>,
    {
        if self.value.as_ref().trim().is_empty() {
            self.errors.push("field_cannot_be_empty".to_string());
        }
        self
    }

    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self
    where
        T: AsRef<str>,
    {
        let len = self.value.as_ref().chars().count();

        if let Some(min_val) = min {
            if len < min_val {
                self.errors
                    .push(format!("Must be at least {} characters", min_val));
            }
        }

        if let Some(max_val) = max {
            if len > max_val {
                self.errors
                    .push(format!("Must be at most {} characters", max_val));
            }
        }

        self
    }

    pub fn build(self) -> ValidationResult<T> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(DomainError::ValidationError {
                field: self.field_name,
                message: self.errors.join("; "),
            })
        }
    }
}
