//! # mdstyle_core
//!
//! Configuration resolution and the lint engine for mdstyle.
//!
//! This crate provides:
//! - Configuration directives and the resolver that replays them
//! - The style script and JSONC config loaders
//! - The rule engine with per-rule fault isolation
//! - Parallel corpus linting with cooperative cancellation
//!
//! ## Example
//!
//! ```rust
//! use mdstyle_core::{ConfigDirective, ConfigResolver, lint, parse_style};
//!
//! let script = parse_style("all\nrule 'MD013', :line_length => 100\nexclude_rule 'MD012'\n")?;
//! let config = ConfigResolver::builtin().resolve(&script.into_directives())?;
//!
//! let doc = mdstyle_parser::parse("# Title\n\nShort line.\n");
//! assert!(lint(&doc, &config).is_empty());
//! # Ok::<(), mdstyle_core::LinterError>(())
//! ```

mod config;
mod directive;
mod engine;
mod error;
pub mod file_finder;
mod linter;
mod resolver;
pub mod style;

pub use config::{CONFIG_FILES, LinterConfig, RuleSetting};
pub use directive::{ConfigDirective, DirectiveOrigin, SourcedDirective};
pub use engine::{Engine, lint};
pub use error::LinterError;
pub use file_finder::FileFinder;
pub use linter::{CancelToken, LintReport, LintResult, Linter, MAX_FILE_SIZE};
pub use resolver::{ConfigResolver, EffectiveConfig, RuleConfig};
pub use style::{StyleDirective, StyleScript, parse_style};

pub use mdstyle_rules::{Registry, Violation, ViolationKind};
