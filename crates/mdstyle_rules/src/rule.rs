//! Rule trait and metadata.

use mdstyle_ast::Document;

use crate::{ParamSpec, Params, RuleError, Violation};

/// Static description of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    /// Stable code, e.g. `MD013`.
    pub code: &'static str,
    /// Human-readable alias, e.g. `line-length`.
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub default_enabled: bool,
    /// Parameter schema.
    pub params: Vec<ParamSpec>,
}

impl RuleMeta {
    /// Creates metadata for an enabled-by-default rule without parameters.
    pub fn new(code: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            code,
            name,
            description,
            tags: &[],
            default_enabled: true,
            params: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: &'static [&'static str]) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }

    pub fn with_default_enabled(mut self, enabled: bool) -> Self {
        self.default_enabled = enabled;
        self
    }

    /// Looks up a parameter declaration by name.
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Returns the default parameter values.
    pub fn default_params(&self) -> Params {
        Params::from_defaults(&self.params)
    }
}

/// A style check.
///
/// Rules are stateless: `check` may be called concurrently for different
/// documents.
pub trait Rule: Send + Sync {
    /// Returns the rule's metadata. Called once, when the rule is registered.
    fn meta(&self) -> RuleMeta;

    /// Checks a document with resolved parameters.
    fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError>;
}
