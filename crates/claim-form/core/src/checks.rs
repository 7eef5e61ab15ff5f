//! Completeness and email format checks

use crate::config::ValidationConfig;
use crate::fields::FormValues;

/// Result of evaluating one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// At least one field is missing or blank
    EmptyFields,
    /// All fields filled but the email does not match the pattern
    InvalidEmail,
    Success,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::EmptyFields => "emptyFields",
            Outcome::InvalidEmail => "invalidEmail",
            Outcome::Success => "success",
        }
    }
}

/// True when every field exists and has non-whitespace content
///
/// A byte order mark counts as whitespace.
pub fn is_complete(values: &FormValues) -> bool {
    values.all().into_iter().all(|value| {
        value.is_some_and(|v| {
            !v.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
                .is_empty()
        })
    })
}

/// Validate email format against the configured pattern
///
/// The pattern is anchored, so the whole value must match. The value is
/// not trimmed.
pub fn is_valid_email(email: &str, config: &ValidationConfig) -> bool {
    config.email_pattern.is_match(email)
}

/// Decide the outcome of a submission
///
/// Completeness is checked first; a blank email reports
/// [`Outcome::EmptyFields`], not [`Outcome::InvalidEmail`].
pub fn evaluate(values: &FormValues, config: &ValidationConfig) -> Outcome {
    if !is_complete(values) {
        return Outcome::EmptyFields;
    }

    match values.email.as_deref() {
        Some(email) if is_valid_email(email, config) => Outcome::Success,
        _ => Outcome::InvalidEmail,
    }
}
