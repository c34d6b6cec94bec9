//! Source file discovery and loading.

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use style_lint_core::{Config, LintFile};

const DEFAULT_INCLUDE: &str = "**/*.swift";

/// Expands `paths` into the sorted list of files to lint.
///
/// Directories are searched with the configured `included` patterns (every
/// Swift file by default) and filtered by `excluded`, both matched relative
/// to the directory. Paths naming a file are taken as given.
pub fn discover(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let excluded = config
        .excluded
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let mut found = Vec::new();
    for path in paths {
        if path.is_file() {
            found.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            tracing::warn!("Skipping missing path: {}", path.display());
            continue;
        }
        found.extend(search(path, config, &excluded)?);
    }

    found.sort();
    found.dedup();
    tracing::debug!("Discovered {} file(s)", found.len());
    Ok(found)
}

fn search(root: &Path, config: &Config, excluded: &[Pattern]) -> Result<Vec<PathBuf>> {
    let included: Vec<&str> = if config.included.is_empty() {
        vec![DEFAULT_INCLUDE]
    } else {
        config.included.iter().map(String::as_str).collect()
    };

    let base = Pattern::escape(&root.to_string_lossy());
    let mut found = Vec::new();
    for pattern in included {
        let full = format!("{base}/{pattern}");
        let entries =
            glob::glob(&full).with_context(|| format!("Invalid include pattern: {pattern}"))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    let relative = path.strip_prefix(root).unwrap_or(&path);
                    if excluded.iter().any(|p| p.matches_path(relative)) {
                        tracing::debug!("Excluded: {}", path.display());
                    } else {
                        found.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping unreadable path: {e}"),
            }
        }
    }
    Ok(found)
}

/// Reads every path into a [`LintFile`] parsed with the Swift parser.
///
/// Files that cannot be read as UTF-8 text are logged and left out.
#[must_use]
pub fn load(paths: &[PathBuf]) -> Vec<LintFile> {
    let parser = style_lint_syntax::parser();
    paths
        .iter()
        .filter_map(|path| match LintFile::from_path(path, parser.clone()) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!("Skipping {}: {e}", path.display());
                None
            }
        })
        .collect()
}
