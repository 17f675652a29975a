//! Error types for TokMeter
//!
//! All core errors are managed centrally.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// TokMeter error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Validation
    // ========================================================================
    #[error("Unsupported model: {model}. Supported models: {supported}")]
    UnsupportedModel { model: String, supported: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // Backend
    // ========================================================================
    /// A required local capability (e.g. the tiktoken encoder data) could
    /// not be initialized. Fatal for the exact family.
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// The remote counting call failed. Single attempt, no retry; the
    /// caller decides whether to surface or swallow this.
    #[error("Tokenizer backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl Error {
    /// Whether the error text is safe to show to an end user.
    ///
    /// Everything else is an internal category; delivery surfaces log the
    /// message and replace it with a generic one before responding.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedModel { .. } | Error::InvalidInput(_)
        )
    }

    /// UnsupportedModel helper carrying the supported-model listing.
    pub fn unsupported_model(model: impl Into<String>, supported: &[&str]) -> Self {
        Error::UnsupportedModel {
            model: model.into(),
            supported: supported.join(", "),
        }
    }
}
