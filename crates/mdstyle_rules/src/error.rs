//! Rule and registry error types.

use thiserror::Error;

use crate::{ParamType, ParamValue};

/// Errors raised by a rule while checking a document.
///
/// The engine never propagates these: a failing rule is reported as a
/// fault violation and the remaining rules still run.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    /// A parameter the rule relies on was not resolved.
    #[error("missing parameter '{0}'")]
    MissingParam(String),

    /// A parameter holds a value of the wrong type.
    #[error("parameter '{name}' must be {expected}, got {given}")]
    ParamType {
        name: String,
        expected: ParamType,
        given: ParamValue,
    },

    /// A parameter holds a value the rule does not understand.
    #[error("invalid value for parameter '{name}': {message}")]
    InvalidValue { name: String, message: String },

    /// Any other failure inside the rule.
    #[error("{0}")]
    Internal(String),
}

impl RuleError {
    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Errors from building or querying a rule registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two rules share a code or name.
    #[error("Duplicate rule identifier: {0}")]
    Duplicate(String),

    /// No rule has the requested code.
    #[error("Rule not found: {0}")]
    NotFound(String),
}
