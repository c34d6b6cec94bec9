//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{GraphicalReportHandler, GraphicalTheme};
use serde::Serialize;
use std::fmt::Write as _;
use style_lint_core::{
    FileReport, LintFile, LintResult, Severity, StyleViolation, ViolationDiagnostic,
};

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `files` must be the batch the result was produced from, in the same order.
pub fn print(result: &LintResult, files: &[LintFile], format: OutputFormat) -> Result<()> {
    let rendered = render(result, files, format, true)?;
    print!("{rendered}");
    Ok(())
}

/// Renders lint results; `color` switches ANSI escapes on for text output.
pub fn render(
    result: &LintResult,
    files: &[LintFile],
    format: OutputFormat,
    color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result, files, color)),
        OutputFormat::Json => render_json(result, files),
        OutputFormat::Compact => Ok(render_compact(result, files)),
        OutputFormat::Fancy => render_fancy(result, files, color),
    }
}

fn paint(color: bool, code: &str, text: &str) -> String {
    if color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn display_path(report: &FileReport) -> String {
    report
        .path
        .as_ref()
        .map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
}

/// Pairs every violation with the file it was found in.
fn violations<'a>(
    result: &'a LintResult,
    files: &'a [LintFile],
) -> impl Iterator<Item = (&'a FileReport, &'a LintFile, &'a StyleViolation)> {
    result
        .files
        .iter()
        .zip(files)
        .flat_map(|(report, file)| report.violations.iter().map(move |v| (report, file, v)))
}

fn render_text(result: &LintResult, files: &[LintFile], color: bool) -> String {
    let (errors, warnings) = result.count_by_severity();
    let mut out = String::new();

    for (report, file, violation) in violations(result, files) {
        let at = violation.location().resolve(file);
        let severity = match violation.severity() {
            Severity::Error => paint(color, "31", "error"),
            Severity::Warning => paint(color, "33", "warning"),
        };
        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.rule_id(),
            violation.rule_name(),
            display_path(report),
            at.line,
            at.column,
        );
        let _ = writeln!(out, "  {severity}: {}", violation.reason());
        out.push('\n');
    }

    for report in result.files.iter().filter(|r| r.is_skipped()) {
        let _ = writeln!(
            out,
            "{}: skipped ({})",
            display_path(report),
            report.skipped.as_deref().unwrap_or_default()
        );
    }

    let summary_color = if errors > 0 {
        "31"
    } else if warnings > 0 {
        "33"
    } else {
        "32"
    };
    let mut summary = format!(
        "Found {errors} error(s), {warnings} warning(s) in {} file(s)",
        result.files_checked()
    );
    if result.files_skipped() > 0 {
        let _ = write!(summary, ", {} skipped", result.files_skipped());
    }
    let _ = writeln!(out, "{}", paint(color, summary_color, &summary));
    out
}

fn render_compact(result: &LintResult, files: &[LintFile]) -> String {
    let mut out = String::new();
    for (report, file, violation) in violations(result, files) {
        let at = violation.location().resolve(file);
        let _ = writeln!(
            out,
            "{}:{}:{}: {} [{}] {}",
            display_path(report),
            at.line,
            at.column,
            violation.severity(),
            violation.rule_id(),
            violation.reason(),
        );
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files_checked: usize,
    files_skipped: usize,
    errors: usize,
    warnings: usize,
    violations: Vec<JsonViolation<'a>>,
    skipped: Vec<JsonSkipped<'a>>,
}

#[derive(Serialize)]
struct JsonViolation<'a> {
    file: String,
    line: usize,
    column: usize,
    offset: usize,
    severity: Severity,
    rule_id: &'a str,
    rule_name: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
struct JsonSkipped<'a> {
    file: String,
    reason: &'a str,
}

fn render_json(result: &LintResult, files: &[LintFile]) -> Result<String> {
    let (errors, warnings) = result.count_by_severity();
    let report = JsonReport {
        files_checked: result.files_checked(),
        files_skipped: result.files_skipped(),
        errors,
        warnings,
        violations: violations(result, files)
            .map(|(report, file, v)| {
                let at = v.location().resolve(file);
                JsonViolation {
                    file: display_path(report),
                    line: at.line,
                    column: at.column,
                    offset: at.offset,
                    severity: v.severity(),
                    rule_id: v.rule_id(),
                    rule_name: v.rule_name(),
                    reason: v.reason(),
                }
            })
            .collect(),
        skipped: result
            .files
            .iter()
            .filter_map(|r| {
                r.skipped.as_deref().map(|reason| JsonSkipped {
                    file: display_path(r),
                    reason,
                })
            })
            .collect(),
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

fn render_fancy(result: &LintResult, files: &[LintFile], color: bool) -> Result<String> {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);
    let mut out = String::new();
    for (_, file, violation) in violations(result, files) {
        let diagnostic = ViolationDiagnostic::new(violation, file);
        handler.render_report(&mut out, &diagnostic)?;
        out.push('\n');
    }
    let (errors, warnings) = result.count_by_severity();
    let _ = writeln!(
        out,
        "Found {errors} error(s), {warnings} warning(s) in {} file(s)",
        result.files_checked()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use style_lint_core::{Analyzer, ParseError, ParsedSource, StructureParser};
    use style_lint_rules::{LineLength, MissingDocs};

    struct Unparseable;

    impl StructureParser for Unparseable {
        fn parse(&self, _text: &str) -> Result<ParsedSource, ParseError> {
            Err(ParseError::new("unexpected end of input", 13))
        }
    }

    fn batch() -> (LintResult, Vec<LintFile>) {
        let parser = style_lint_syntax::parser();
        let long = format!("let a = 1\nlet b = \"{}\"\n", "x".repeat(100));
        let files = vec![
            LintFile::new(long, parser.clone()).with_path("Sources/Long.swift"),
            LintFile::new("public struct Bare {}\n", parser).with_path("Sources/Bare.swift"),
            LintFile::new("struct Open {\n", Arc::new(Unparseable)).with_path("Sources/Open.swift"),
        ];
        let analyzer = Analyzer::builder()
            .rule(LineLength::new())
            .rule(MissingDocs::new())
            .build()
            .unwrap();
        let result = analyzer.lint(&files).unwrap();
        (result, files)
    }

    #[test]
    fn compact_lists_one_violation_per_line() {
        let (result, files) = batch();
        let out = render(&result, &files, OutputFormat::Compact, false).unwrap();
        insta::assert_snapshot!(out, @r"
        Sources/Long.swift:2:1: warning [line_length] Line should be 100 characters or less: currently 110 characters
        Sources/Bare.swift:1:1: warning [missing_docs] Public declarations should be documented.
        ");
    }

    #[test]
    fn text_ends_with_summary_including_skipped_files() {
        let (result, files) = batch();
        let out = render(&result, &files, OutputFormat::Text, false).unwrap();
        assert!(out.contains("line_length Line Length at Sources/Long.swift:2:1"));
        assert!(out.contains("  warning: Public declarations should be documented."));
        assert!(out.contains("Sources/Open.swift: skipped"));
        assert!(out.ends_with("Found 0 error(s), 2 warning(s) in 2 file(s), 1 skipped\n"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn json_carries_resolved_positions() {
        let (result, files) = batch();
        let out = render(&result, &files, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["files_checked"], 2);
        assert_eq!(value["files_skipped"], 1);
        assert_eq!(value["warnings"], 2);
        assert_eq!(value["violations"][1]["rule_id"], "missing_docs");
        assert_eq!(value["violations"][1]["line"], 1);
        assert_eq!(value["violations"][1]["column"], 1);
        assert_eq!(value["violations"][1]["offset"], 0);
        assert_eq!(value["skipped"][0]["file"], "Sources/Open.swift");
    }

    #[test]
    fn fancy_renders_source_snippets() {
        let (result, files) = batch();
        let out = render(&result, &files, OutputFormat::Fancy, false).unwrap();
        assert!(out.contains("[missing_docs] Public declarations should be documented."));
        assert!(out.contains("Sources/Bare.swift"));
        assert!(out.contains("public struct Bare {}"));
    }
}
