//! Violation types for lint results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// What produced a violation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The document broke a style rule.
    #[default]
    Style,
    /// The rule itself failed while checking the document.
    RuleFault,
}

/// A single reported problem in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Code of the rule that produced this violation.
    pub rule: String,

    /// Line number (1-indexed).
    pub line: u32,

    /// Last line for violations covering a range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,

    /// Column in characters (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    pub message: String,

    #[serde(default)]
    pub kind: ViolationKind,
}

impl Violation {
    /// Creates a style violation.
    pub fn new(rule: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            line,
            end_line: None,
            column: None,
            message: message.into(),
            kind: ViolationKind::Style,
        }
    }

    /// Creates the synthetic violation recorded when a rule fails.
    pub fn fault(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::RuleFault,
            ..Self::new(rule, 1, message)
        }
    }

    /// Sets the column.
    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    /// Sets the last line of the range.
    pub fn with_end_line(mut self, end_line: u32) -> Self {
        if end_line != self.line {
            self.end_line = Some(end_line);
        }
        self
    }

    pub fn is_fault(&self) -> bool {
        self.kind == ViolationKind::RuleFault
    }
}

impl Ord for Violation {
    /// Orders by line, then rule code; the remaining fields only break ties.
    fn cmp(&self, other: &Self) -> Ordering {
        (
            self.line,
            &self.rule,
            self.column,
            self.end_line,
            &self.message,
            self.kind,
        )
            .cmp(&(
                other.line,
                &other.rule,
                other.column,
                other.end_line,
                &other.message,
                other.kind,
            ))
    }
}

impl PartialOrd for Violation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
