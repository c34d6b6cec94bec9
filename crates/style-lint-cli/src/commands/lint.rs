//! Lint command implementation.

use anyhow::{Context, Result};
use style_lint_core::{LintResult, Severity};

use super::{batches, output};
use crate::config_resolver::ConfigGroup;
use crate::OutputFormat;

/// Exit status when the run found violations at the failing severity.
const FAILURE_EXIT_CODE: i32 = 2;

/// Runs the lint command over every config group and reports once.
pub fn run(groups: Vec<ConfigGroup>, format: OutputFormat, strict: bool) -> Result<()> {
    let mut result = LintResult::new();
    let mut files = Vec::new();
    for batch in batches(groups)? {
        result.extend(batch.analyzer.lint(&batch.files).context("Analysis failed")?);
        files.extend(batch.files);
    }
    output::print(&result, &files, format)?;

    let code = exit_code(&result, strict);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Errors always fail the run; warnings only with `strict`.
fn exit_code(result: &LintResult, strict: bool) -> i32 {
    let threshold = if strict {
        Severity::Warning
    } else {
        Severity::Error
    };
    if result.has_violations_at(threshold) {
        FAILURE_EXIT_CODE
    } else {
        0
    }
}
