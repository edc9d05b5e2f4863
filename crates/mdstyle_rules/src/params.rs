//! Rule parameter schema and values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RuleError;

/// Declared type of a rule parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Integer,
    Boolean,
    String,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::String => "string",
        };
        f.write_str(name)
    }
}

/// A parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl ParamValue {
    /// Returns the type of this value.
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Boolean(_) => ParamType::Boolean,
            ParamValue::Integer(_) => ParamType::Integer,
            ParamValue::String(_) => ParamType::String,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Boolean(b) => write!(f, "{}", b),
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

/// Declaration of a single rule parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub default: ParamValue,
    pub description: &'static str,
    /// Accepted values for string parameters. Empty means any value.
    pub choices: &'static [&'static str],
}

impl ParamSpec {
    /// Declares an integer parameter.
    pub fn integer(name: &'static str, default: i64, description: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::Integer,
            default: ParamValue::Integer(default),
            description,
            choices: &[],
        }
    }

    /// Declares a boolean parameter.
    pub fn boolean(name: &'static str, default: bool, description: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::Boolean,
            default: ParamValue::Boolean(default),
            description,
            choices: &[],
        }
    }

    /// Declares a string parameter.
    pub fn string(name: &'static str, default: &str, description: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::String,
            default: ParamValue::String(default.to_string()),
            description,
            choices: &[],
        }
    }

    /// Restricts a string parameter to a fixed set of values.
    pub fn with_choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    /// Returns true if `value` is acceptable for this parameter.
    pub fn accepts(&self, value: &ParamValue) -> bool {
        if value.param_type() != self.ty {
            return false;
        }
        match value {
            ParamValue::String(s) if !self.choices.is_empty() => {
                self.choices.contains(&s.as_str())
            }
            _ => true,
        }
    }
}

/// Resolved parameter values for one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter set holding each spec's default.
    pub fn from_defaults(specs: &[ParamSpec]) -> Self {
        Self(
            specs
                .iter()
                .map(|spec| (spec.name.to_string(), spec.default.clone()))
                .collect(),
        )
    }

    /// Sets a parameter, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn require(&self, name: &str) -> Result<&ParamValue, RuleError> {
        self.0
            .get(name)
            .ok_or_else(|| RuleError::MissingParam(name.to_string()))
    }

    /// Reads an integer parameter.
    pub fn integer(&self, name: &str) -> Result<i64, RuleError> {
        match self.require(name)? {
            ParamValue::Integer(n) => Ok(*n),
            other => Err(type_error(name, ParamType::Integer, other)),
        }
    }

    /// Reads an integer parameter as a count; negative values read as zero.
    pub fn count(&self, name: &str) -> Result<usize, RuleError> {
        self.integer(name)
            .map(|n| usize::try_from(n).unwrap_or(0))
    }

    /// Reads a boolean parameter.
    pub fn boolean(&self, name: &str) -> Result<bool, RuleError> {
        match self.require(name)? {
            ParamValue::Boolean(b) => Ok(*b),
            other => Err(type_error(name, ParamType::Boolean, other)),
        }
    }

    /// Reads a string parameter.
    pub fn string(&self, name: &str) -> Result<&str, RuleError> {
        match self.require(name)? {
            ParamValue::String(s) => Ok(s),
            other => Err(type_error(name, ParamType::String, other)),
        }
    }
}

fn type_error(name: &str, expected: ParamType, given: &ParamValue) -> RuleError {
    RuleError::ParamType {
        name: name.to_string(),
        expected,
        given: given.clone(),
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_from_defaults() {
        let specs = [
            ParamSpec::integer("line_length", 80, "max"),
            ParamSpec::boolean("code_blocks", true, "check code"),
        ];
        let params = Params::from_defaults(&specs);
        assert_eq!(params.len(), 2);
        assert_eq!(params.integer("line_length"), Ok(80));
        assert_eq!(params.boolean("code_blocks"), Ok(true));
    }

    #[test]
    fn test_typed_getters_report_mismatch() {
        let params: Params = [("line_length", ParamValue::from("long"))]
            .into_iter()
            .collect();
        assert_eq!(
            params.integer("line_length"),
            Err(RuleError::ParamType {
                name: "line_length".to_string(),
                expected: ParamType::Integer,
                given: ParamValue::String("long".to_string()),
            })
        );
        assert_eq!(
            params.boolean("missing"),
            Err(RuleError::MissingParam("missing".to_string()))
        );
    }

    #[test]
    fn test_count_clamps_negative() {
        let params: Params = [("maximum", ParamValue::Integer(-3))].into_iter().collect();
        assert_eq!(params.count("maximum"), Ok(0));
    }

    #[rstest]
    #[case(ParamValue::Integer(3), true)]
    #[case(ParamValue::Boolean(true), false)]
    #[case(ParamValue::String("3".to_string()), false)]
    fn test_integer_spec_accepts(#[case] value: ParamValue, #[case] expected: bool) {
        let spec = ParamSpec::integer("n", 1, "");
        assert_eq!(spec.accepts(&value), expected);
    }

    #[test]
    fn test_choices() {
        let spec = ParamSpec::string("style", "consistent", "").with_choices(&["consistent", "atx"]);
        assert!(spec.accepts(&ParamValue::from("atx")));
        assert!(!spec.accepts(&ParamValue::from("setext")));
    }

    #[test]
    fn test_param_value_deserialize() {
        let values: Vec<ParamValue> = serde_json::from_str(r#"[true, 100, "atx"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ParamValue::Boolean(true),
                ParamValue::Integer(100),
                ParamValue::String("atx".to_string()),
            ]
        );
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::Integer(4).to_string(), "4");
        assert_eq!(ParamValue::from("x").to_string(), "\"x\"");
        assert_eq!(ParamType::Boolean.to_string(), "boolean");
    }
}
