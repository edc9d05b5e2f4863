//! Configuration resolution.
//!
//! Replays an ordered list of [`ConfigDirective`]s over the registry's
//! defaults to produce one [`EffectiveConfig`].

use std::collections::BTreeMap;

use mdstyle_rules::{Params, RegisteredRule, Registry};
use serde::Serialize;
use tracing::debug;

use crate::{ConfigDirective, DirectiveOrigin, LinterError, SourcedDirective};

/// Effective settings for a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleConfig {
    pub enabled: bool,
    pub params: Params,
}

impl RuleConfig {
    fn defaults(rule: &RegisteredRule) -> Self {
        Self {
            enabled: rule.meta().default_enabled,
            params: rule.meta().default_params(),
        }
    }
}

/// Per-rule settings for one lint run, keyed by rule code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EffectiveConfig {
    rules: BTreeMap<String, RuleConfig>,
}

impl EffectiveConfig {
    pub fn get(&self, code: &str) -> Option<&RuleConfig> {
        self.rules.get(code)
    }

    pub fn is_enabled(&self, code: &str) -> bool {
        self.rules.get(code).is_some_and(|rc| rc.enabled)
    }

    /// Iterates over all rules in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleConfig)> {
        self.rules.iter().map(|(code, rc)| (code.as_str(), rc))
    }

    /// Iterates over enabled rules in code order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleConfig)> {
        self.iter().filter(|(_, rc)| rc.enabled)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builds an [`EffectiveConfig`] from directives.
pub struct ConfigResolver<'r> {
    registry: &'r Registry,
}

impl ConfigResolver<'static> {
    /// Creates a resolver over the built-in catalog.
    pub fn builtin() -> Self {
        Self::new(Registry::builtin())
    }
}

impl<'r> ConfigResolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Returns every rule at its registry defaults.
    pub fn defaults(&self) -> EffectiveConfig {
        EffectiveConfig {
            rules: self
                .registry
                .all_rules()
                .map(|rule| (rule.code().to_string(), RuleConfig::defaults(rule)))
                .collect(),
        }
    }

    /// Applies `directives` in order on top of the defaults.
    ///
    /// Fails on the first unknown rule, unknown parameter or mistyped
    /// parameter; no partial configuration is returned. Errors name the
    /// directive by its index.
    pub fn resolve(&self, directives: &[ConfigDirective]) -> Result<EffectiveConfig, LinterError> {
        self.replay(
            directives
                .iter()
                .enumerate()
                .map(|(index, directive)| (directive, DirectiveOrigin::Index(index))),
        )
    }

    /// Like [`resolve`](Self::resolve), but errors name each directive's origin.
    pub fn resolve_sourced(
        &self,
        directives: &[SourcedDirective],
    ) -> Result<EffectiveConfig, LinterError> {
        self.replay(directives.iter().map(|d| (&d.directive, d.origin.clone())))
    }

    fn replay<'d>(
        &self,
        directives: impl Iterator<Item = (&'d ConfigDirective, DirectiveOrigin)>,
    ) -> Result<EffectiveConfig, LinterError> {
        let mut config = self.defaults();

        for (directive, origin) in directives {
            debug!("Applying {}: {:?}", origin, directive);
            match directive {
                ConfigDirective::EnableAll => self.reset_all(&mut config, true),
                ConfigDirective::DisableAll => self.reset_all(&mut config, false),
                ConfigDirective::SetRule {
                    code,
                    enabled,
                    params,
                } => {
                    let rule = self.lookup(code, &origin)?;
                    validate(rule, params, &origin)?;
                    let entry = Self::entry(&mut config, rule);
                    entry.enabled = enabled.unwrap_or(true);
                    for (name, value) in params.iter() {
                        entry.params.insert(name, value.clone());
                    }
                }
                ConfigDirective::ExcludeRule { code } => {
                    let rule = self.lookup(code, &origin)?;
                    Self::entry(&mut config, rule).enabled = false;
                }
            }
        }

        Ok(config)
    }

    fn reset_all(&self, config: &mut EffectiveConfig, enabled: bool) {
        for rule in self.registry.all_rules() {
            config.rules.insert(
                rule.code().to_string(),
                RuleConfig {
                    enabled,
                    params: rule.meta().default_params(),
                },
            );
        }
    }

    fn lookup(
        &self,
        code: &str,
        origin: &DirectiveOrigin,
    ) -> Result<&'r RegisteredRule, LinterError> {
        self.registry
            .lookup(code)
            .map_err(|_| LinterError::UnknownRule {
                code: code.to_string(),
                origin: origin.clone(),
            })
    }

    fn entry<'c>(config: &'c mut EffectiveConfig, rule: &RegisteredRule) -> &'c mut RuleConfig {
        config
            .rules
            .entry(rule.code().to_string())
            .or_insert_with(|| RuleConfig::defaults(rule))
    }
}

fn validate(
    rule: &RegisteredRule,
    params: &Params,
    origin: &DirectiveOrigin,
) -> Result<(), LinterError> {
    for (name, value) in params.iter() {
        let spec = rule
            .meta()
            .param(name)
            .ok_or_else(|| LinterError::UnknownParameter {
                rule: rule.code().to_string(),
                param: name.to_string(),
                origin: origin.clone(),
            })?;
        if spec.accepts(value) {
            continue;
        }
        let expected = if value.param_type() != spec.ty {
            spec.ty.to_string()
        } else {
            format!("one of {}", spec.choices.join(", "))
        };
        return Err(LinterError::InvalidParameter {
            rule: rule.code().to_string(),
            param: name.to_string(),
            expected,
            given: value.to_string(),
            origin: origin.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdstyle_rules::ParamValue;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, ParamValue)]) -> Params {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn resolve(directives: &[ConfigDirective]) -> Result<EffectiveConfig, LinterError> {
        ConfigResolver::builtin().resolve(directives)
    }

    fn sample_directives() -> Vec<ConfigDirective> {
        vec![
            ConfigDirective::EnableAll,
            ConfigDirective::set_rule(
                "MD013",
                params(&[
                    ("line_length", ParamValue::Integer(100)),
                    ("code_blocks", ParamValue::Boolean(false)),
                ]),
            ),
            ConfigDirective::set_rule("MD009", params(&[("br_spaces", ParamValue::Integer(2))])),
            ConfigDirective::exclude("MD012"),
        ]
    }

    #[test]
    fn test_defaults_cover_registry() {
        let config = ConfigResolver::builtin().defaults();
        assert_eq!(config.len(), Registry::builtin().len());
        assert!(config.enabled_rules().count() > 0);
    }

    #[test]
    fn test_sample_configuration() {
        let config = resolve(&sample_directives()).unwrap();

        let md013 = config.get("MD013").unwrap();
        assert!(md013.enabled);
        assert_eq!(md013.params.integer("line_length"), Ok(100));
        assert_eq!(md013.params.boolean("code_blocks"), Ok(false));
        assert_eq!(md013.params.boolean("tables"), Ok(true));

        assert_eq!(config.get("MD009").unwrap().params.integer("br_spaces"), Ok(2));
        assert!(!config.is_enabled("MD012"));
    }

    #[test]
    fn test_enable_all_then_exclude_one() {
        for rule in Registry::builtin().all_rules() {
            let excluded = rule.code();
            let config = resolve(&[ConfigDirective::EnableAll, ConfigDirective::exclude(excluded)])
                .unwrap();
            for (code, rc) in config.iter() {
                assert_eq!(rc.enabled, code != excluded, "rule {}", code);
            }
        }
    }

    #[test]
    fn test_disable_all() {
        let config = resolve(&[ConfigDirective::DisableAll]).unwrap();
        assert_eq!(config.enabled_rules().count(), 0);
    }

    #[test]
    fn test_set_rule_implicitly_enables() {
        let config = resolve(&[
            ConfigDirective::DisableAll,
            ConfigDirective::set_rule("MD013", Params::new()),
        ])
        .unwrap();
        assert!(config.is_enabled("MD013"));
        assert_eq!(config.enabled_rules().count(), 1);
    }

    #[test]
    fn test_set_rule_explicit_disable_keeps_params() {
        let config = resolve(&[ConfigDirective::SetRule {
            code: "MD013".to_string(),
            enabled: Some(false),
            params: params(&[("line_length", ParamValue::Integer(120))]),
        }])
        .unwrap();
        let md013 = config.get("MD013").unwrap();
        assert!(!md013.enabled);
        assert_eq!(md013.params.integer("line_length"), Ok(120));
    }

    #[test]
    fn test_exclude_then_set_rule_reenables() {
        let config = resolve(&[
            ConfigDirective::exclude("MD013"),
            ConfigDirective::set_rule("MD013", Params::new()),
        ])
        .unwrap();
        assert!(config.is_enabled("MD013"));
    }

    #[test]
    fn test_last_value_wins() {
        let config = resolve(&[
            ConfigDirective::set_rule("MD013", params(&[("line_length", ParamValue::Integer(90))])),
            ConfigDirective::set_rule("MD013", params(&[("line_length", ParamValue::Integer(110))])),
        ])
        .unwrap();
        assert_eq!(
            config.get("MD013").unwrap().params.integer("line_length"),
            Ok(110)
        );
    }

    #[test]
    fn test_distinct_keys_are_order_independent() {
        let length = ConfigDirective::set_rule(
            "MD013",
            params(&[("line_length", ParamValue::Integer(100))]),
        );
        let code = ConfigDirective::set_rule(
            "MD013",
            params(&[("code_blocks", ParamValue::Boolean(false))]),
        );
        let forward = resolve(&[length.clone(), code.clone()]).unwrap();
        let backward = resolve(&[code, length]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_enable_all_resets_params() {
        let config = resolve(&[
            ConfigDirective::set_rule("MD013", params(&[("line_length", ParamValue::Integer(100))])),
            ConfigDirective::EnableAll,
        ])
        .unwrap();
        assert_eq!(
            config.get("MD013").unwrap().params.integer("line_length"),
            Ok(80)
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = resolve(&sample_directives()).unwrap();
        let second = resolve(&sample_directives()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_rule_names_code_and_directive() {
        let err = resolve(&[
            ConfigDirective::EnableAll,
            ConfigDirective::toggle("MD999", true),
        ])
        .unwrap_err();
        match err {
            LinterError::UnknownRule { code, origin } => {
                assert_eq!(code, "MD999");
                assert_eq!(origin, DirectiveOrigin::Index(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_rule_in_exclude() {
        let err = resolve(&[ConfigDirective::exclude("MD000")]).unwrap_err();
        assert!(matches!(
            err,
            LinterError::UnknownRule { code, origin: DirectiveOrigin::Index(0) } if code == "MD000"
        ));
    }

    #[test]
    fn test_invalid_parameter_type() {
        let err = resolve(&[ConfigDirective::set_rule(
            "MD013",
            params(&[("line_length", ParamValue::from("long"))]),
        )])
        .unwrap_err();
        match err {
            LinterError::InvalidParameter {
                rule,
                param,
                expected,
                given,
                ..
            } => {
                assert_eq!(rule, "MD013");
                assert_eq!(param, "line_length");
                assert_eq!(expected, "integer");
                assert_eq!(given, "\"long\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_parameter_choice() {
        let err = resolve(&[ConfigDirective::set_rule(
            "MD003",
            params(&[("style", ParamValue::from("fancy"))]),
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            LinterError::InvalidParameter { expected, .. } if expected.starts_with("one of ")
        ));
    }

    #[test]
    fn test_unknown_parameter() {
        let err = resolve(&[ConfigDirective::set_rule(
            "MD013",
            params(&[("width", ParamValue::Integer(100))]),
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            LinterError::UnknownParameter { rule, param, .. } if rule == "MD013" && param == "width"
        ));
    }

    #[test]
    fn test_alias_resolves_to_code() {
        let config = resolve(&[
            ConfigDirective::DisableAll,
            ConfigDirective::toggle("line-length", true),
        ])
        .unwrap();
        assert!(config.is_enabled("MD013"));
        assert!(config.get("line-length").is_none());
    }

    #[test]
    fn test_sourced_errors_carry_origin() {
        let origin = DirectiveOrigin::Script {
            path: "style.rb".into(),
            line: 5,
        };
        let err = ConfigResolver::builtin()
            .resolve_sourced(&[
                SourcedDirective::new(ConfigDirective::EnableAll, DirectiveOrigin::Default),
                SourcedDirective::new(ConfigDirective::toggle("MD999", true), origin.clone()),
            ])
            .unwrap_err();
        assert!(matches!(&err, LinterError::UnknownRule { origin: o, .. } if *o == origin));
        assert_eq!(err.to_string(), "Unknown rule 'MD999' in style.rb:5");
    }
}
