//! Rule engine.
//!
//! Runs every enabled rule against one document. A rule that returns an
//! error or panics is reported as a single fault violation; the other rules
//! still run.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use mdstyle_ast::Document;
use mdstyle_rules::{Params, RegisteredRule, Registry, Violation};
use tracing::{debug, warn};

use crate::EffectiveConfig;

/// Evaluates rules from a registry.
pub struct Engine<'r> {
    registry: &'r Registry,
}

impl Engine<'static> {
    /// Creates an engine over the built-in catalog.
    pub fn builtin() -> Self {
        Self::new(Registry::builtin())
    }
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Lints a document, returning violations sorted by line and rule code.
    pub fn lint(&self, doc: &Document, config: &EffectiveConfig) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (code, rule_config) in config.enabled_rules() {
            match self.registry.lookup(code) {
                Ok(rule) => violations.extend(run_rule(rule, doc, &rule_config.params)),
                Err(e) => {
                    warn!("Rule '{}' is enabled but not registered", code);
                    violations.push(Violation::fault(code, e.to_string()));
                }
            }
        }

        violations.sort();
        violations
    }
}

/// Lints a document with the built-in catalog.
pub fn lint(doc: &Document, config: &EffectiveConfig) -> Vec<Violation> {
    Engine::builtin().lint(doc, config)
}

fn run_rule(rule: &RegisteredRule, doc: &Document, params: &Params) -> Vec<Violation> {
    let code = rule.code();
    match catch_unwind(AssertUnwindSafe(|| rule.check(doc, params))) {
        Ok(Ok(violations)) => {
            debug!("Rule {} reported {} violation(s)", code, violations.len());
            violations
        }
        Ok(Err(e)) => {
            warn!("Rule {} failed: {}", code, e);
            vec![Violation::fault(code, format!("Rule {} failed: {}", code, e))]
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!("Rule {} panicked: {}", code, message);
            vec![Violation::fault(
                code,
                format!("Rule {} panicked: {}", code, message),
            )]
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
