//! Error types for the step-generation engines.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur before an engine produces any step.
///
/// Empty-container operations, search misses and unreachable goals are not
/// errors; engines report those as ordinary steps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The input shape or content is not acceptable for this engine.
    #[error("Invalid input for {algorithm}: {reason}")]
    InvalidInput { algorithm: String, reason: String },

    /// `generate_steps` or `metrics` was called before `initialize`.
    #[error("Engine not initialized: call initialize() before {0}")]
    Uninitialized(&'static str),

    /// No engine is registered under this identifier.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

impl EngineError {
    /// Shorthand for an input-validation failure.
    pub fn invalid(algorithm: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            algorithm: algorithm.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for caller-input problems (as opposed to usage errors).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. } | EngineError::UnknownAlgorithm(_)
        )
    }
}
