// Domain and persistence error types
// Converted into HTTP responses at the API boundary

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Exclusive upper bound of a `NUMERIC(12,2)` money column
pub fn money_limit() -> Decimal {
    Decimal::new(10_000_000_000, 0)
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Errors raised while enforcing business rules
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// One or more input fields failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// A business rule rejected the operation (e.g. joining a full group order)
    #[error("{0}")]
    Rule(String),

    /// The entity does not exist or is not visible to the caller
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The caller's role may not perform the operation
    #[error("{0}")]
    Forbidden(String),
}

impl DomainError {
    pub fn rule(message: impl Into<String>) -> Self {
        Self::Rule(message.into())
    }

    /// Returns the field errors carried by a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// Errors raised by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness or capacity constraint rejected the write
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Maps a unique-constraint violation to a conflict carrying `message`,
    /// passing every other database error through unchanged
    pub fn unique_violation(error: sqlx::Error, message: &str) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(message.to_string())
            }
            _ => Self::Database(error),
        }
    }

    /// Maps a foreign-key violation to `NotFound(entity)`, passing every
    /// other database error through unchanged
    pub fn missing_reference(error: sqlx::Error, entity: &'static str) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => Self::NotFound(entity),
            _ => Self::Database(error),
        }
    }
}

/// Accumulates field errors so a request reports every problem at once
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors.push(FieldError {
                field: field.to_string(),
                message: message.into(),
            });
        }
        self
    }

    /// Checks that a required text field is non-blank and within `max` characters
    pub fn text(&mut self, value: &str, field: &str, max: usize) -> &mut Self {
        let trimmed = value.trim();
        self.check(!trimmed.is_empty(), field, format!("{field} is required"));
        self.check(
            trimmed.chars().count() <= max,
            field,
            format!("{field} must be at most {max} characters"),
        )
    }

    /// Like [`Validator::text`] but skips absent values
    pub fn optional_text(&mut self, value: Option<&str>, field: &str, max: usize) -> &mut Self {
        if let Some(value) = value {
            self.check(
                value.chars().count() <= max,
                field,
                format!("{field} must be at most {max} characters"),
            );
        }
        self
    }

    /// Checks a positive amount that fits a `NUMERIC(12,2)` column exactly
    pub fn money(&mut self, value: Decimal, field: &str) -> &mut Self {
        self.check(
            value > Decimal::ZERO,
            field,
            format!("{field} must be greater than zero"),
        );
        self.check(
            value.normalize().scale() <= 2,
            field,
            format!("{field} must have at most 2 decimal places"),
        );
        self.check(
            value < money_limit(),
            field,
            format!("{field} must be less than {}", money_limit()),
        )
    }

    pub fn finish(&mut self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}
