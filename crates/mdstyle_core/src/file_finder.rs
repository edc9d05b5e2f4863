//! Document discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::LinterError;

/// Extensions picked up when a directory is given as a pattern.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkdn", "mkd", "txt"];

/// Expands file, directory and glob patterns into document paths,
/// filtered by the configured include/exclude globs.
pub struct FileFinder {
    include_globs: Option<GlobSet>,
    exclude_globs: Option<GlobSet>,
}

impl FileFinder {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, LinterError> {
        Ok(Self {
            include_globs: build_globset(include)?,
            exclude_globs: build_globset(exclude)?,
        })
    }

    /// Returns true if `path` is excluded, or not matched by a non-empty
    /// include list. Exclusion wins.
    pub fn should_ignore(&self, path: &Path) -> bool {
        if self
            .exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
        {
            return true;
        }

        self.include_globs
            .as_ref()
            .is_some_and(|includes| !includes.is_match(path))
    }

    /// Expands `patterns` into a sorted, deduplicated list of files.
    ///
    /// An existing file is taken as is, an existing directory contributes
    /// every document below it, and anything else is a glob matched against
    /// paths relative to `base_dir`.
    pub fn discover(&self, patterns: &[String], base_dir: &Path) -> Result<Vec<PathBuf>, LinterError> {
        let mut files = Vec::new();
        let mut globs = GlobSetBuilder::new();
        let mut has_globs = false;

        for pattern in patterns {
            let path = Path::new(pattern);
            if path.is_file() {
                if !self.should_ignore(path) {
                    files.push(path.to_path_buf());
                }
            } else if path.is_dir() {
                for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                    let found = entry.path();
                    if entry.file_type().is_file() && is_document(found) && !self.should_ignore(found) {
                        files.push(normalize(found));
                    }
                }
            } else {
                let glob = Glob::new(pattern).map_err(|e| {
                    LinterError::config(format!("Invalid pattern '{}': {}", pattern, e))
                })?;
                globs.add(glob);
                has_globs = true;
            }
        }

        if has_globs {
            let glob_set = globs
                .build()
                .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

            for entry in WalkDir::new(base_dir).into_iter().filter_map(|e| e.ok()) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let found = entry.path();
                let relative = found.strip_prefix(base_dir).unwrap_or(found);
                if glob_set.is_match(relative) && !self.should_ignore(relative) {
                    debug!("Matched {}", found.display());
                    files.push(normalize(found));
                }
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| LinterError::config(format!("Invalid glob pattern: {}", e)))?;
        builder.add(glob);
    }

    builder
        .build()
        .map(Some)
        .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Drops a leading `./`.
fn normalize(path: &Path) -> PathBuf {
    path.strip_prefix(".").unwrap_or(path).to_path_buf()
}
