//! Linter error types.

use thiserror::Error;

use crate::DirectiveOrigin;

/// Errors that can occur while configuring or running the linter.
#[derive(Debug, Error)]
pub enum LinterError {
    /// A directive names a rule code the registry does not know.
    #[error("Unknown rule '{code}' in {origin}")]
    UnknownRule { code: String, origin: DirectiveOrigin },

    /// A parameter value has the wrong type or is not an accepted choice.
    ///
    /// `given` is the offending value as written.
    #[error("Invalid parameter '{param}' for rule {rule} in {origin}: expected {expected}, got {given}")]
    InvalidParameter {
        rule: String,
        param: String,
        expected: String,
        given: String,
        origin: DirectiveOrigin,
    },

    /// A parameter name the rule does not declare.
    #[error("Unknown parameter '{param}' for rule {rule} in {origin}")]
    UnknownParameter {
        rule: String,
        param: String,
        origin: DirectiveOrigin,
    },

    /// Syntax error in a style script.
    #[error("Style script error at line {line}: {message}")]
    Style { line: usize, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File error.
    #[error("File error: {0}")]
    File(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a style script error.
    pub fn style(line: usize, message: impl Into<String>) -> Self {
        Self::Style {
            line,
            message: message.into(),
        }
    }

    /// Returns true for errors raised while resolving configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownRule { .. }
                | Self::InvalidParameter { .. }
                | Self::UnknownParameter { .. }
                | Self::Style { .. }
                | Self::Config(_)
        )
    }
}
