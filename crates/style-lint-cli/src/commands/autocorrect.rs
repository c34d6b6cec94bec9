//! Autocorrect command implementation.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use style_lint_core::{LintFile, LintResult};

use super::batches;
use crate::config_resolver::ConfigGroup;

/// Runs the autocorrect command over every config group.
pub fn run(groups: Vec<ConfigGroup>, dry_run: bool) -> Result<()> {
    let mut result = LintResult::new();
    let mut originals = Vec::new();
    let mut written = 0;
    for mut batch in batches(groups)? {
        let before = batch.files.clone();
        result.extend(
            batch
                .analyzer
                .correct(&mut batch.files)
                .context("Correction failed")?,
        );
        if !dry_run {
            written += write_changed(&before, &batch.files)?;
        }
        originals.extend(before);
    }

    if !dry_run {
        tracing::info!("Wrote {written} file(s)");
    }
    print!("{}", render(&result, &originals, dry_run));
    Ok(())
}

/// Writes every file whose text differs from its original; returns how many.
fn write_changed(originals: &[LintFile], corrected: &[LintFile]) -> Result<usize> {
    let mut written = 0;
    for (before, after) in originals.iter().zip(corrected) {
        if before.contents() == after.contents() {
            continue;
        }
        let Some(path) = after.path() else {
            continue;
        };
        std::fs::write(path, after.contents())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Corrected {}", path.display());
        written += 1;
    }
    Ok(written)
}

/// Lists corrections against the text they were computed on.
fn render(result: &LintResult, originals: &[LintFile], dry_run: bool) -> String {
    let mut out = String::new();
    for (report, file) in result.files.iter().zip(originals) {
        let path = report
            .path
            .as_ref()
            .map_or_else(|| "<input>".to_string(), |p| p.display().to_string());
        for correction in &report.corrections {
            let at = correction.location.resolve(file);
            let _ = writeln!(
                out,
                "{path}:{}:{} Corrected {}",
                at.line, at.column, correction.rule_name
            );
        }
    }

    let count = result.corrections().count();
    let verb = if dry_run { "Would apply" } else { "Applied" };
    let _ = writeln!(out, "{verb} {count} correction(s)");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{build_analyzer, files};
    use std::fs;
    use style_lint_core::Config;
    use tempfile::TempDir;

    fn corrected(dir: &TempDir, text: &str) -> (Vec<LintFile>, Vec<LintFile>, LintResult) {
        let path = dir.path().join("Model.swift");
        fs::write(&path, text).unwrap();
        let mut files = files::load(&[path]);
        let originals = files.clone();
        let result = build_analyzer(Config::default())
            .unwrap()
            .correct(&mut files)
            .unwrap();
        (originals, files, result)
    }

    #[test]
    fn writes_corrected_text_back() {
        let dir = TempDir::new().unwrap();
        let (originals, files, result) = corrected(&dir, "struct A {\n    static private func f() {}\n}\n");

        assert_eq!(write_changed(&originals, &files).unwrap(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("Model.swift")).unwrap(),
            "struct A {\n    private static func f() {}\n}\n"
        );

        let out = render(&result, &originals, false);
        assert!(out.ends_with("Model.swift:2:5 Corrected Function Visibility Order\nApplied 1 correction(s)\n"));
    }

    #[test]
    fn unchanged_files_are_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let (originals, files, result) = corrected(&dir, "struct A {}\n");

        assert_eq!(write_changed(&originals, &files).unwrap(), 0);
        insta::assert_snapshot!(render(&result, &originals, true), @"Would apply 0 correction(s)");
    }
}
