//! Corpus linting.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mdstyle_parser::{MarkdownParser, Parser, PlainTextParser};
use mdstyle_rules::Violation;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::file_finder::FileFinder;
use crate::{ConfigResolver, EffectiveConfig, Engine, LinterConfig, LinterError};

/// Files larger than this are reported as failures without being read.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Cooperative cancellation flag shared between a caller and one run.
///
/// Documents already being linted finish; documents not yet started are
/// skipped. A token stays cancelled, so use a fresh one per run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Violations found in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintResult {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
}

impl LintResult {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Outcome of linting a set of documents.
#[derive(Debug, Default)]
pub struct LintReport {
    /// Linted documents, in input order.
    pub results: Vec<LintResult>,
    /// Documents that could not be read.
    pub failures: Vec<(PathBuf, LinterError)>,
    /// Documents not started because the run was cancelled.
    pub skipped: Vec<PathBuf>,
}

impl LintReport {
    /// Total number of violations across all results.
    pub fn violation_count(&self) -> usize {
        self.results.iter().map(|r| r.violations.len()).sum()
    }

    pub fn has_violations(&self) -> bool {
        self.results.iter().any(LintResult::has_violations)
    }
}

enum Outcome {
    Linted(LintResult),
    Failed(PathBuf, LinterError),
    Skipped(PathBuf),
}

/// Lints documents against one resolved configuration.
pub struct Linter {
    config: LinterConfig,
    effective: EffectiveConfig,
    engine: Engine<'static>,
    finder: FileFinder,
    pool: Option<rayon::ThreadPool>,
}

impl Linter {
    /// Creates a linter, resolving the configuration up front.
    ///
    /// Configuration errors are returned here, before any document is read.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let directives = config.to_sourced_directives()?;
        let effective = ConfigResolver::builtin().resolve_sourced(&directives)?;
        debug!(
            "Resolved {} directives; {} rules enabled",
            directives.len(),
            effective.enabled_rules().count()
        );

        let finder = FileFinder::new(&config.include, &config.exclude)?;

        let pool = if config.jobs > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.jobs)
                .build()
                .map_err(|e| LinterError::Internal(format!("Failed to build thread pool: {}", e)))?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            config,
            effective,
            engine: Engine::builtin(),
            finder,
            pool,
        })
    }

    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    pub fn effective_config(&self) -> &EffectiveConfig {
        &self.effective
    }

    /// Lints in-memory text. The parser is chosen from `path_hint`'s
    /// extension, defaulting to markdown.
    pub fn lint_text(&self, text: &str, path_hint: Option<&Path>) -> Vec<Violation> {
        let parser = select_parser(path_hint.unwrap_or(Path::new("")));
        let doc = parser.parse(text);
        self.engine.lint(&doc, &self.effective)
    }

    /// Reads and lints a single file.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LinterError> {
        debug!("Linting {}", path.display());

        let metadata = fs::metadata(path).map_err(|e| {
            LinterError::file(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                e
            ))
        })?;

        if !metadata.is_file() {
            return Err(LinterError::file(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        if metadata.len() > MAX_FILE_SIZE {
            return Err(LinterError::file(format!(
                "File size exceeds limit of {} bytes: {}",
                MAX_FILE_SIZE,
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

        Ok(LintResult {
            path: path.to_path_buf(),
            violations: self.lint_text(&content, Some(path)),
        })
    }

    /// Lints files in parallel.
    ///
    /// Read failures are collected rather than aborting the run.
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintReport {
        self.lint_files_cancellable(paths, &CancelToken::new())
    }

    /// Lints files in parallel until `cancel` fires.
    ///
    /// The token only affects this run; later runs are unaffected.
    pub fn lint_files_cancellable(&self, paths: &[PathBuf], cancel: &CancelToken) -> LintReport {
        let run = || -> Vec<Outcome> {
            paths
                .par_iter()
                .map(|path| {
                    if cancel.is_cancelled() {
                        return Outcome::Skipped(path.clone());
                    }
                    match self.lint_file(path) {
                        Ok(result) => Outcome::Linted(result),
                        Err(e) => Outcome::Failed(path.clone(), e),
                    }
                })
                .collect()
        };

        let outcomes = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let mut report = LintReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Linted(result) => report.results.push(result),
                Outcome::Failed(path, error) => {
                    warn!("Failed to lint {}: {}", path.display(), error);
                    report.failures.push((path, error));
                }
                Outcome::Skipped(path) => {
                    debug!("Skipped {} (cancelled)", path.display());
                    report.skipped.push(path);
                }
            }
        }

        info!(
            "Linted {} files ({} failed, {} skipped)",
            report.results.len(),
            report.failures.len(),
            report.skipped.len()
        );
        report
    }

    /// Discovers files matching `patterns` under the current directory and
    /// lints them.
    pub fn lint_patterns(&self, patterns: &[String]) -> Result<LintReport, LinterError> {
        let files = self.discover(patterns, Path::new("."))?;
        Ok(self.lint_files(&files))
    }

    /// Expands patterns with the configured include/exclude filters.
    pub fn discover(&self, patterns: &[String], base_dir: &Path) -> Result<Vec<PathBuf>, LinterError> {
        self.finder.discover(patterns, base_dir)
    }
}

fn select_parser(path: &Path) -> Box<dyn Parser> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let text_parser = PlainTextParser::new();

    if text_parser.can_parse(extension) {
        Box::new(text_parser)
    } else {
        Box::new(MarkdownParser::new())
    }
}
