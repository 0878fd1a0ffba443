//! Field-level validation of request bodies.

use serde::{Deserialize, Serialize};

pub const MUST_NOT_BE_BLANK: &str = "must not be blank";
pub const MUST_NOT_BE_NULL: &str = "must not be null";

/// One rejected field of a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Turns an unchecked request body into its validated form.
pub trait Validate {
    type Valid;

    fn validate(self) -> Result<Self::Valid, Vec<FieldError>>;
}

/// Collects every violation of a body instead of stopping at the first.
#[derive(Debug, Default)]
pub struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn not_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, MUST_NOT_BE_BLANK);
        }
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("size must be at most {max}"));
        }
    }

    /// Records a violation when `value` is missing and hands it back.
    pub fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.add(field, MUST_NOT_BE_NULL);
        }
        value
    }

    pub fn check(&mut self, condition: bool, field: &str, message: &str) {
        if !condition {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
