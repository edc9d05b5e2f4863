//! Rules command implementation

use mdstyle_rules::{CATALOG_VERSION, RegisteredRule, Registry};
use miette::Result;

pub fn run_rules() -> Result<()> {
    let registry = Registry::builtin();

    println!("Rule catalog v{} ({} rules)\n", CATALOG_VERSION, registry.len());
    for rule in registry.all_rules() {
        println!("{}", describe(rule));
    }

    Ok(())
}

fn describe(rule: &RegisteredRule) -> String {
    let meta = rule.meta();
    let mut line = format!("{} {:<26} {}", meta.code, meta.name, meta.description);

    if !meta.tags.is_empty() {
        line.push_str(&format!(" [{}]", meta.tags.join(", ")));
    }
    if !meta.default_enabled {
        line.push_str(" (disabled by default)");
    }
    for spec in &meta.params {
        line.push_str(&format!(
            "\n      {} ({}, default {}): {}",
            spec.name, spec.ty, spec.default, spec.description
        ));
    }

    line
}
