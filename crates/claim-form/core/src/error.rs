// File: src/error.rs
// Purpose: Configuration errors

/// Errors raised while turning a [`FormConfig`](crate::FormConfig) into a
/// usable [`ValidationConfig`](crate::ValidationConfig).
///
/// A failed validation is never an error; it is an [`Outcome`](crate::Outcome).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid email pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid feedback class `{class}`: must be non-empty and contain no whitespace")]
    InvalidClass { class: String },

    #[error("success display duration must be greater than zero")]
    ZeroDisplayDuration,
}

pub type Result<T> = std::result::Result<T, Error>;
