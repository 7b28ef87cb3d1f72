//! Core error types for task-prioritizer-core.
//!
//! [`EngineError`] covers everything the scoring pipeline can reject. All of
//! its variants are user or configuration input problems: the caller decides
//! whether to re-prompt (interactive modes) or abort with a message (inline
//! mode). [`CoreError`] wraps those together with the I/O side of the crate
//! (profiles, the task log).

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the pure scoring engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A `{p...}` tag that does not follow `{pH:MM}`
    #[error("Malformed time tag '{tag}': {reason} (expected {{pH:MM}}, e.g. {{p1:30}})")]
    MalformedTimeTag { tag: String, reason: String },

    /// A rating outside 0-3, or `_` in a slot that cannot be auto
    #[error("Invalid rating '{value}': use 0, 1, 2, or 3")]
    InvalidRating { value: String },

    /// The duration formula was asked to run without usable inputs
    #[error("Cannot estimate time: {field} must be a rating from 0 to 3")]
    IncompleteEstimationInput { field: &'static str },

    /// Category weights that cannot be normalized
    #[error("Invalid weights for '{category}': {message}")]
    ConfigError { category: String, message: String },

    /// Inline ratings with the wrong number of values
    #[error("Expected 11 ratings (L,Conf,G,P,D,C,T,R,F,S,Pl), got {found}")]
    RatingCount { found: usize },
}

impl EngineError {
    /// Every engine error is an input problem the caller can recover from.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    pub(crate) fn config(category: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ConfigError {
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Profile loading errors.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The profile file exists but could not be read or parsed
    #[error("Failed to load profile from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// The data directory could not be determined or created
    #[error("Cannot prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },
}

/// Core error type for task-prioritizer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Scoring pipeline errors
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Profile-related errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_are_recoverable() {
        let errors = [
            EngineError::MalformedTimeTag {
                tag: "{p1:5}".into(),
                reason: "minutes must be two digits".into(),
            },
            EngineError::InvalidRating { value: "7".into() },
            EngineError::IncompleteEstimationInput { field: "risk" },
            EngineError::config("impact", "weights sum to 0"),
            EngineError::RatingCount { found: 3 },
        ];
        assert!(errors.iter().all(EngineError::is_recoverable));
    }

    #[test]
    fn malformed_tag_message_shows_expected_form() {
        let err = EngineError::MalformedTimeTag {
            tag: "{p1:5}".into(),
            reason: "minutes must be two digits".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("{p1:5}"));
        assert!(msg.contains("{pH:MM}"));
    }

    #[test]
    fn core_error_wraps_engine_error_transparently() {
        let err: CoreError = EngineError::InvalidRating { value: "9".into() }.into();
        assert_eq!(err.to_string(), "Invalid rating '9': use 0, 1, 2, or 3");
    }
}
