//! Helpers for rule tests.

use mdstyle_ast::Document;

use crate::{ParamValue, Params, Rule, Violation};

pub fn parse(source: &str) -> Document {
    mdstyle_parser::parse(source)
}

/// Runs a rule with its default parameters.
pub fn run(rule: &dyn Rule, source: &str) -> Vec<Violation> {
    run_with(rule, source, &[])
}

/// Runs a rule with its defaults overridden by `overrides`.
pub fn run_with(rule: &dyn Rule, source: &str, overrides: &[(&str, ParamValue)]) -> Vec<Violation> {
    let mut params: Params = rule.meta().default_params();
    for (name, value) in overrides {
        params.insert(*name, value.clone());
    }
    rule.check(&parse(source), &params)
        .expect("rule check should succeed")
}

/// Returns the violation lines.
pub fn lines(violations: &[Violation]) -> Vec<u32> {
    violations.iter().map(|v| v.line).collect()
}
