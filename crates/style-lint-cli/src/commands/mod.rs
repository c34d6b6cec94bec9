//! Subcommand implementations.

pub mod autocorrect;
pub mod files;
pub mod init;
pub mod lint;
pub mod output;
pub mod rules;

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;
use style_lint_core::{Analyzer, Config, LintFile};
use style_lint_rules::all_rules;

use crate::config_resolver::ConfigGroup;

/// Builds an analyzer over every built-in rule with `config` applied.
pub fn build_analyzer(config: Config) -> Result<Analyzer> {
    Analyzer::builder()
        .rules(all_rules())
        .config(config)
        .build()
        .context("Failed to build analyzer")
}

/// Files governed by one configuration, with the analyzer built from it.
pub struct Batch {
    /// Analyzer configured for these files.
    pub analyzer: Analyzer,
    /// Loaded source files.
    pub files: Vec<LintFile>,
}

/// Discovers and loads the files of every group.
///
/// A file reached from several groups is linted once, under the first.
pub fn batches(groups: Vec<ConfigGroup>) -> Result<Vec<Batch>> {
    let mut seen: BTreeSet<PathBuf> = BTreeSet::new();
    let mut batches = Vec::with_capacity(groups.len());
    for group in groups {
        let mut discovered = files::discover(&group.paths, &group.config)?;
        discovered.retain(|path| seen.insert(path.clone()));
        tracing::debug!(
            "{} file(s) under {}",
            discovered.len(),
            group
                .source
                .path()
                .map_or_else(|| "default config".to_string(), |p| p.display().to_string())
        );
        batches.push(Batch {
            analyzer: build_analyzer(group.config)?,
            files: files::load(&discovered),
        });
    }
    Ok(batches)
}
