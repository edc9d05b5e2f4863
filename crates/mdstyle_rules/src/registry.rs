//! Rule registry.
//!
//! The registry maps rule codes to their metadata and check logic. The
//! built-in catalog is created once per process and never modified.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use mdstyle_ast::Document;

use crate::rules::builtin_rules;
use crate::{Params, RegistryError, Rule, RuleError, RuleMeta, Violation};

/// Version of the built-in catalog. Bumped whenever rules are added,
/// removed or change defaults.
pub const CATALOG_VERSION: u32 = 1;

static BUILTIN: OnceLock<Registry> = OnceLock::new();

/// A rule together with the metadata captured at registration.
pub struct RegisteredRule {
    meta: RuleMeta,
    rule: Box<dyn Rule>,
}

impl RegisteredRule {
    pub fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    pub fn code(&self) -> &'static str {
        self.meta.code
    }

    /// Runs the rule's check.
    pub fn check(&self, doc: &Document, params: &Params) -> Result<Vec<Violation>, RuleError> {
        self.rule.check(doc, params)
    }
}

impl fmt::Debug for RegisteredRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredRule")
            .field("code", &self.meta.code)
            .field("name", &self.meta.name)
            .finish()
    }
}

/// Catalog of available rules, keyed by code.
#[derive(Debug)]
pub struct Registry {
    rules: BTreeMap<&'static str, RegisteredRule>,
    /// Rule name to code.
    aliases: BTreeMap<&'static str, &'static str>,
}

impl Registry {
    /// Builds a registry from a set of rules.
    ///
    /// Fails if two rules share a code or a name.
    pub fn new(rules: impl IntoIterator<Item = Box<dyn Rule>>) -> Result<Self, RegistryError> {
        let mut registry = Self {
            rules: BTreeMap::new(),
            aliases: BTreeMap::new(),
        };

        for rule in rules {
            let meta = rule.meta();
            if registry.rules.contains_key(meta.code) || registry.aliases.contains_key(meta.code) {
                return Err(RegistryError::Duplicate(meta.code.to_string()));
            }
            if registry.aliases.contains_key(meta.name) || registry.rules.contains_key(meta.name) {
                return Err(RegistryError::Duplicate(meta.name.to_string()));
            }
            registry.aliases.insert(meta.name, meta.code);
            registry
                .rules
                .insert(meta.code, RegisteredRule { meta, rule });
        }

        Ok(registry)
    }

    /// Returns the process-wide built-in registry.
    pub fn builtin() -> &'static Registry {
        BUILTIN.get_or_init(|| {
            Registry::new(builtin_rules()).expect("built-in rule codes and names are unique")
        })
    }

    /// Iterates over all rules in code order.
    pub fn all_rules(&self) -> impl Iterator<Item = &RegisteredRule> {
        self.rules.values()
    }

    /// Looks up a rule by code, or by its name.
    pub fn lookup(&self, code: &str) -> Result<&RegisteredRule, RegistryError> {
        self.rules
            .get(code)
            .or_else(|| {
                self.aliases
                    .get(code)
                    .and_then(|code| self.rules.get(code))
            })
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_ok()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
