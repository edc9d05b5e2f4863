//! Style script parsing.
//!
//! A style script lists directives one per line:
//!
//! ```text
//! all
//! rule 'MD013', :line_length => 100, :code_blocks => false
//! rule 'MD009', br_spaces: 2
//! exclude_rule 'MD012'
//! ```
//!
//! `none` disables every rule. `#` starts a comment outside quotes.

use std::fs;
use std::path::{Path, PathBuf};

use mdstyle_rules::{ParamValue, Params};

use crate::{ConfigDirective, DirectiveOrigin, LinterError, SourcedDirective};

/// A directive and the script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDirective {
    /// 1-indexed line number.
    pub line: usize,
    pub directive: ConfigDirective,
}

/// A parsed style script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleScript {
    directives: Vec<StyleDirective>,
}

impl StyleScript {
    /// Reads and parses a style script.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!(
                "Failed to read style script {}: {}",
                path.display(),
                e
            ))
        })?;
        parse_style(&content)
    }

    pub fn directives(&self) -> &[StyleDirective] {
        &self.directives
    }

    pub fn into_directives(self) -> Vec<ConfigDirective> {
        self.directives.into_iter().map(|d| d.directive).collect()
    }

    /// Tags each directive with `path` and its script line.
    pub fn into_sourced(self, path: impl Into<PathBuf>) -> Vec<SourcedDirective> {
        let path = path.into();
        self.directives
            .into_iter()
            .map(|d| {
                let origin = DirectiveOrigin::Script {
                    path: path.clone(),
                    line: d.line,
                };
                SourcedDirective::new(d.directive, origin)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Parses a style script.
pub fn parse_style(source: &str) -> Result<StyleScript, LinterError> {
    let mut directives = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let mut cursor = Cursor::new(strip_comment(text), line);
        cursor.skip_whitespace();
        if cursor.at_end() {
            continue;
        }
        let directive = cursor.directive()?;
        directives.push(StyleDirective { line, directive });
    }

    Ok(StyleScript { directives })
}

/// Cuts a line at the first `#` that is not inside quotes.
fn strip_comment(text: &str) -> &str {
    let mut quote: Option<char> = None;
    for (idx, c) in text.char_indices() {
        match (quote, c) {
            (None, '#') => return &text[..idx],
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            _ => {}
        }
    }
    text
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Cursor {
    fn new(text: &str, line: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line,
        }
    }

    fn error(&self, message: impl Into<String>) -> LinterError {
        LinterError::style(self.line, message)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), LinterError> {
        self.skip_whitespace();
        for c in token.chars() {
            if !self.eat(c) {
                return Err(self.error(format!("expected '{}'", token)));
            }
        }
        Ok(())
    }

    fn ident(&mut self) -> Option<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
    }

    fn string(&mut self) -> Result<String, LinterError> {
        self.skip_whitespace();
        let Some(quote) = self.peek().filter(|c| *c == '\'' || *c == '"') else {
            return Err(self.error("expected a quoted string"));
        };
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(self.error("unterminated string"))
    }

    fn directive(&mut self) -> Result<ConfigDirective, LinterError> {
        let keyword = self
            .ident()
            .ok_or_else(|| self.error("expected a directive"))?;

        let directive = match keyword.as_str() {
            "all" => ConfigDirective::EnableAll,
            "none" => ConfigDirective::DisableAll,
            "exclude_rule" => ConfigDirective::exclude(self.string()?),
            "rule" => {
                let code = self.string()?;
                let params = self.params()?;
                ConfigDirective::set_rule(code, params)
            }
            other => return Err(self.error(format!("unknown directive '{}'", other))),
        };

        self.skip_whitespace();
        if !self.at_end() {
            return Err(self.error(format!("unexpected input after '{}'", keyword)));
        }
        Ok(directive)
    }

    fn params(&mut self) -> Result<Params, LinterError> {
        let mut params = Params::new();
        loop {
            self.skip_whitespace();
            if !self.eat(',') {
                return Ok(params);
            }
            self.skip_whitespace();
            let name = if self.eat(':') {
                let name = self
                    .ident()
                    .ok_or_else(|| self.error("expected a parameter name"))?;
                self.expect("=>")?;
                name
            } else {
                let name = self
                    .ident()
                    .ok_or_else(|| self.error("expected a parameter name"))?;
                self.expect(":")?;
                name
            };
            let value = self.value()?;
            params.insert(name, value);
        }
    }

    fn value(&mut self) -> Result<ParamValue, LinterError> {
        self.skip_whitespace();
        match self.peek() {
            Some('\'' | '"') => Ok(ParamValue::String(self.string()?)),
            Some(':') => {
                self.pos += 1;
                self.ident()
                    .map(ParamValue::String)
                    .ok_or_else(|| self.error("expected a symbol name"))
            }
            Some(c) if c == '-' || c.is_ascii_digit() => {
                let start = self.pos;
                self.pos += 1;
                while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
                    self.pos += 1;
                }
                let literal: String = self.chars[start..self.pos]
                    .iter()
                    .filter(|c| **c != '_')
                    .collect();
                literal
                    .parse::<i64>()
                    .map(ParamValue::Integer)
                    .map_err(|_| self.error(format!("invalid integer '{}'", literal)))
            }
            Some(_) => match self.ident().as_deref() {
                Some("true") => Ok(ParamValue::Boolean(true)),
                Some("false") => Ok(ParamValue::Boolean(false)),
                Some(other) => Err(self.error(format!("unexpected value '{}'", other))),
                None => Err(self.error("expected a value")),
            },
            None => Err(self.error("expected a value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const SAMPLE: &str = "all\nrule 'MD013', :line_length => 100, :code_blocks => false\nrule 'MD009', :br_spaces => 2\nexclude_rule 'MD012'\n";

    fn params(pairs: &[(&str, ParamValue)]) -> Params {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_parse_sample() {
        let script = parse_style(SAMPLE).unwrap();
        assert_eq!(
            script.into_directives(),
            vec![
                ConfigDirective::EnableAll,
                ConfigDirective::set_rule(
                    "MD013",
                    params(&[
                        ("line_length", ParamValue::Integer(100)),
                        ("code_blocks", ParamValue::Boolean(false)),
                    ])
                ),
                ConfigDirective::set_rule(
                    "MD009",
                    params(&[("br_spaces", ParamValue::Integer(2))])
                ),
                ConfigDirective::exclude("MD012"),
            ]
        );
    }

    #[test]
    fn test_line_numbers_skip_comments_and_blanks() {
        let script = parse_style("# header comment\n\nall\n  # indented comment\nnone\n").unwrap();
        let lines: Vec<usize> = script.directives().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn test_sourced_directives_keep_lines() {
        let script = parse_style("# comment\nall\n\nrule 'MD999'\n").unwrap();
        let origins: Vec<_> = script
            .into_sourced("style.rb")
            .into_iter()
            .map(|d| d.origin.to_string())
            .collect();
        assert_eq!(origins, vec!["style.rb:2", "style.rb:4"]);
    }

    #[test]
    fn test_value_forms() {
        let script = parse_style(
            "rule \"MD003\", style: :atx\nrule 'MD026', :punctuation => '.#!'\nrule 'MD012', maximum: -1 # trailing\n",
        )
        .unwrap();
        assert_eq!(
            script.into_directives(),
            vec![
                ConfigDirective::set_rule("MD003", params(&[("style", ParamValue::from("atx"))])),
                ConfigDirective::set_rule(
                    "MD026",
                    params(&[("punctuation", ParamValue::from(".#!"))])
                ),
                ConfigDirective::set_rule("MD012", params(&[("maximum", ParamValue::Integer(-1))])),
            ]
        );
    }

    #[test]
    fn test_rule_without_params() {
        let script = parse_style("rule 'MD040'\n").unwrap();
        assert_eq!(
            script.into_directives(),
            vec![ConfigDirective::set_rule("MD040", Params::new())]
        );
    }

    #[rstest]
    #[case::unknown_directive("all\nenable 'MD013'\n", 2)]
    #[case::missing_code("rule\n", 1)]
    #[case::unterminated("exclude_rule 'MD012\n", 1)]
    #[case::missing_arrow("rule 'MD013', :line_length 100\n", 1)]
    #[case::missing_value("\n\nrule 'MD013', :line_length =>\n", 3)]
    #[case::bad_value("rule 'MD013', :line_length => maybe\n", 1)]
    #[case::trailing_input("all the rules\n", 1)]
    fn test_errors_report_line(#[case] source: &str, #[case] expected_line: usize) {
        match parse_style(source) {
            Err(LinterError::Style { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected style error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".mdl.rb");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(StyleScript::from_file(&path).unwrap().len(), 4);
        assert!(StyleScript::from_file(dir.path().join("missing.rb")).is_err());
    }
}
