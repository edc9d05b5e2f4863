//! # mdstyle_rules
//!
//! The rule model and the built-in rule catalog.
//!
//! A [`Rule`] is a stateless check over a parsed document. Rules declare
//! their parameters through [`RuleMeta`] and are collected in a
//! [`Registry`], keyed by code.
//!
//! ## Example
//!
//! ```rust
//! use mdstyle_rules::Registry;
//!
//! let registry = Registry::builtin();
//! let rule = registry.lookup("MD013").unwrap();
//! let doc = mdstyle_parser::parse(&format!("{}\n", "a".repeat(81)));
//! let violations = rule.check(&doc, &rule.meta().default_params()).unwrap();
//! assert_eq!(violations.len(), 1);
//! ```

mod error;
mod params;
mod registry;
mod rule;
pub mod rules;
mod violation;

#[cfg(test)]
mod test_utils;

pub use error::{RegistryError, RuleError};
pub use params::{ParamSpec, ParamType, ParamValue, Params};
pub use registry::{CATALOG_VERSION, RegisteredRule, Registry};
pub use rule::{Rule, RuleMeta};
pub use violation::{Violation, ViolationKind};
