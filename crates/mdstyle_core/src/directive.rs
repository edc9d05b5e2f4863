//! Configuration directives.

use std::fmt;
use std::path::PathBuf;

use mdstyle_rules::Params;

/// One configuration instruction.
///
/// Directives are replayed in order by the [`ConfigResolver`](crate::ConfigResolver).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigDirective {
    /// Enables every rule and resets its parameters to defaults.
    EnableAll,
    /// Disables every rule and resets its parameters to defaults.
    DisableAll,
    /// Updates one rule. `enabled: None` enables the rule.
    SetRule {
        code: String,
        enabled: Option<bool>,
        params: Params,
    },
    /// Disables one rule, keeping its parameters.
    ExcludeRule { code: String },
}

impl ConfigDirective {
    /// `set_rule(code)` with parameter overrides.
    pub fn set_rule(code: impl Into<String>, params: Params) -> Self {
        Self::SetRule {
            code: code.into(),
            enabled: None,
            params,
        }
    }

    /// `set_rule(code, enabled)` without parameter overrides.
    pub fn toggle(code: impl Into<String>, enabled: bool) -> Self {
        Self::SetRule {
            code: code.into(),
            enabled: Some(enabled),
            params: Params::new(),
        }
    }

    pub fn exclude(code: impl Into<String>) -> Self {
        Self::ExcludeRule { code: code.into() }
    }

    /// The rule code this directive targets, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::SetRule { code, .. } | Self::ExcludeRule { code } => Some(code),
            Self::EnableAll | Self::DisableAll => None,
        }
    }
}

/// Where a directive came from, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveOrigin {
    /// Position in a directive list handed straight to the resolver.
    Index(usize),
    /// The config file's `default` key.
    Default,
    /// A style script line.
    Script { path: PathBuf, line: usize },
    /// A key of the config file's `rules` map.
    RulesEntry(String),
}

impl fmt::Display for DirectiveOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "directive #{}", index),
            Self::Default => write!(f, "config key \"default\""),
            Self::Script { path, line } => write!(f, "{}:{}", path.display(), line),
            Self::RulesEntry(key) => write!(f, "config rules entry \"{}\"", key),
        }
    }
}

/// A directive tagged with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedDirective {
    pub directive: ConfigDirective,
    pub origin: DirectiveOrigin,
}

impl SourcedDirective {
    pub fn new(directive: ConfigDirective, origin: DirectiveOrigin) -> Self {
        Self { directive, origin }
    }
}
