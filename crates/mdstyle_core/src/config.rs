//! Linter configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use mdstyle_rules::{ParamValue, Params, RegisteredRule, Registry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::style::StyleScript;
use crate::{ConfigDirective, DirectiveOrigin, LinterError, SourcedDirective};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Config file names looked up by [`LinterConfig::discover`], in order.
pub const CONFIG_FILES: &[&str] = &[".mdstyle.jsonc", ".mdstyle.json"];

/// Configuration for the linter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Style script applied after `default`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Enables or disables every rule first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,

    /// Per-rule settings keyed by code or name, applied after `style`.
    /// Two keys naming the same rule are rejected.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleSetting>,

    /// File patterns to include.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// File patterns to exclude.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Worker threads; 0 uses the global rayon pool.
    #[serde(default)]
    pub jobs: usize,

    /// Extra style scripts applied after everything else.
    #[serde(skip)]
    pub extra_styles: Vec<PathBuf>,

    /// Directory relative paths are resolved against.
    /// This is usually the directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Setting for a single rule in the `rules` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    /// `true` enables the rule, `false` disables it.
    Enabled(bool),
    /// Parameter overrides; the rule is enabled.
    Params(BTreeMap<String, Value>),
}

impl RuleSetting {
    fn to_directive(
        &self,
        rule: &RegisteredRule,
        origin: &DirectiveOrigin,
    ) -> Result<ConfigDirective, LinterError> {
        match self {
            RuleSetting::Enabled(enabled) => Ok(ConfigDirective::toggle(rule.code(), *enabled)),
            RuleSetting::Params(values) => {
                let params = values
                    .iter()
                    .map(|(name, value)| {
                        param_value(rule, name, value, origin).map(|value| (name.clone(), value))
                    })
                    .collect::<Result<Params, LinterError>>()?;
                Ok(ConfigDirective::set_rule(rule.code(), params))
            }
        }
    }
}

/// Converts a JSON parameter value. Values with no parameter
/// representation (floats, arrays, objects, null) are rejected against the
/// parameter's declared type.
fn param_value(
    rule: &RegisteredRule,
    name: &str,
    value: &Value,
    origin: &DirectiveOrigin,
) -> Result<ParamValue, LinterError> {
    let converted = match value {
        Value::Bool(b) => Some(ParamValue::Boolean(*b)),
        Value::Number(n) => n.as_i64().map(ParamValue::Integer),
        Value::String(s) => Some(ParamValue::String(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    if let Some(converted) = converted {
        return Ok(converted);
    }

    let spec = rule
        .meta()
        .param(name)
        .ok_or_else(|| LinterError::UnknownParameter {
            rule: rule.code().to_string(),
            param: name.to_string(),
            origin: origin.clone(),
        })?;
    Err(LinterError::InvalidParameter {
        rule: rule.code().to_string(),
        param: name.to_string(),
        expected: spec.ty.to_string(),
        given: value.to_string(),
        origin: origin.clone(),
    })
}

impl LinterConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.mdstyle.jsonc` and `.mdstyle.json`; comments and trailing
    /// commas are accepted in both.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_jsonc(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from JSONC with schema validation.
    pub fn from_jsonc(content: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(LinterError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the first config file found in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Adds a style script applied on top of this configuration.
    pub fn with_style_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra_styles.push(path.into());
        self
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Compiles the configuration into an ordered directive list.
    ///
    /// Order: `default`, the `style` script, the `rules` map, then any
    /// extra style scripts. Each directive records where it came from.
    pub fn to_sourced_directives(&self) -> Result<Vec<SourcedDirective>, LinterError> {
        let mut directives = Vec::new();

        if let Some(default) = self.default {
            let directive = if default {
                ConfigDirective::EnableAll
            } else {
                ConfigDirective::DisableAll
            };
            directives.push(SourcedDirective::new(directive, DirectiveOrigin::Default));
        }

        if let Some(style) = &self.style {
            let path = self.resolve_path(Path::new(style));
            directives.extend(StyleScript::from_file(&path)?.into_sourced(path));
        }

        directives.extend(self.rule_directives(Registry::builtin())?);

        for path in &self.extra_styles {
            directives.extend(StyleScript::from_file(path)?.into_sourced(path.clone()));
        }

        Ok(directives)
    }

    /// Like [`to_sourced_directives`](Self::to_sourced_directives), without origins.
    pub fn to_directives(&self) -> Result<Vec<ConfigDirective>, LinterError> {
        Ok(self
            .to_sourced_directives()?
            .into_iter()
            .map(|d| d.directive)
            .collect())
    }

    /// Canonicalizes `rules` keys to rule codes.
    ///
    /// Map order carries no meaning, so a rule reached through two keys
    /// (code and name) is a configuration error.
    fn rule_directives(&self, registry: &Registry) -> Result<Vec<SourcedDirective>, LinterError> {
        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        let mut directives = Vec::with_capacity(self.rules.len());

        for (key, setting) in &self.rules {
            let origin = DirectiveOrigin::RulesEntry(key.clone());
            let rule = registry
                .lookup(key)
                .map_err(|_| LinterError::UnknownRule {
                    code: key.clone(),
                    origin: origin.clone(),
                })?;
            if let Some(previous) = seen.insert(rule.code(), key) {
                return Err(LinterError::config(format!(
                    "Rule {} is configured twice in \"rules\" (\"{}\" and \"{}\")",
                    rule.code(),
                    previous,
                    key
                )));
            }
            directives.push(SourcedDirective::new(
                setting.to_directive(rule, &origin)?,
                origin,
            ));
        }

        Ok(directives)
    }
}
