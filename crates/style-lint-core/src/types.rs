//! Core types for lint violations, corrections, and results.

use crate::rule::RuleDescription;
use crate::source::LintFile;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where in a file a violation or correction points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// 0-based byte offset into the file text.
    Offset(usize),
    /// 1-based line number.
    Line(usize),
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path, if the source came from disk.
    pub file: Option<PathBuf>,
    /// Offset or line within the file.
    pub position: Position,
}

impl Location {
    /// Creates an offset-based location inside `file`.
    #[must_use]
    pub fn at_offset(file: &LintFile, offset: usize) -> Self {
        Self {
            file: file.path().map(PathBuf::from),
            position: Position::Offset(offset),
        }
    }

    /// Creates a line-based location inside `file`.
    #[must_use]
    pub fn at_line(file: &LintFile, line: usize) -> Self {
        Self {
            file: file.path().map(PathBuf::from),
            position: Position::Line(line),
        }
    }

    /// Resolves this location against the file's current text.
    ///
    /// A line-only location resolves to column 1 and the offset of the
    /// start of that line.
    #[must_use]
    pub fn resolve(&self, file: &LintFile) -> ResolvedLocation {
        match self.position {
            Position::Offset(offset) => {
                let (line, column) = file.location_for(offset);
                ResolvedLocation {
                    line,
                    column,
                    offset,
                }
            }
            Position::Line(line) => ResolvedLocation {
                line,
                column: 1,
                offset: file
                    .line_range(line)
                    .map_or(file.contents().len(), |r| r.start),
            },
        }
    }
}

/// A location translated to line, column, and offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column in grapheme clusters (1-indexed).
    pub column: usize,
    /// Byte offset in file.
    pub offset: usize,
}

/// A lint violation found during analysis.
///
/// Immutable once created; fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleViolation {
    rule_id: String,
    rule_name: String,
    severity: Severity,
    location: Location,
    reason: String,
}

impl StyleViolation {
    /// Creates a new violation for the rule described by `rule`.
    #[must_use]
    pub fn new(
        rule: &RuleDescription,
        severity: Severity,
        location: Location,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule.identifier.to_string(),
            rule_name: rule.name.to_string(),
            severity,
            location,
            reason: reason.into(),
        }
    }

    /// Identifier of the rule that produced this violation.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    /// Human-readable name of the rule.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Severity of this violation.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Primary location of the violation.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl std::fmt::Display for StyleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = self
            .location
            .file
            .as_ref()
            .map_or_else(|| "<input>".to_string(), |p| p.display().to_string());
        match self.location.position {
            Position::Offset(offset) => write!(f, "{file}@{offset}")?,
            Position::Line(line) => write!(f, "{file}:{line}")?,
        }
        write!(
            f,
            ": {}: {} Violation: {} ({})",
            self.severity, self.rule_name, self.reason, self.rule_id
        )
    }
}

/// A correction that was applied to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Identifier of the rule that requested the edit.
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// Start offset of the edit in the text before correction.
    pub location: Location,
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = self
            .location
            .file
            .as_ref()
            .map_or_else(|| "<input>".to_string(), |p| p.display().to_string());
        match self.location.position {
            Position::Offset(offset) => write!(f, "{file}@{offset}")?,
            Position::Line(line) => write!(f, "{file}:{line}")?,
        }
        write!(f, " Corrected {}", self.rule_name)
    }
}

/// Violations and corrections for a single file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    /// Path of the file, if it came from disk.
    pub path: Option<PathBuf>,
    /// Violations in rule order, then document order.
    pub violations: Vec<StyleViolation>,
    /// Corrections applied, ascending by original offset.
    pub corrections: Vec<Correction>,
    /// Parse error message when the file was skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl FileReport {
    /// Creates an empty report for `file`.
    #[must_use]
    pub fn new(file: &LintFile) -> Self {
        Self {
            path: file.path().map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Creates a report for a file that could not be parsed.
    #[must_use]
    pub fn skipped(file: &LintFile, message: impl Into<String>) -> Self {
        Self {
            skipped: Some(message.into()),
            ..Self::new(file)
        }
    }

    /// Returns true if this file was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }
}

/// Result of running lint analysis over a batch of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// One report per input file, in input order.
    pub files: Vec<FileReport>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over every violation in file order.
    pub fn violations(&self) -> impl Iterator<Item = &StyleViolation> {
        self.files.iter().flat_map(|f| f.violations.iter())
    }

    /// Iterates over every correction in file order.
    pub fn corrections(&self) -> impl Iterator<Item = &Correction> {
        self.files.iter().flat_map(|f| f.corrections.iter())
    }

    /// Number of files that were analyzed.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.files.iter().filter(|f| !f.is_skipped()).count()
    }

    /// Number of files skipped because they could not be parsed.
    #[must_use]
    pub fn files_skipped(&self) -> usize {
        self.files.iter().filter(|f| f.is_skipped()).count()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations().any(|v| v.severity() >= severity)
    }

    /// Counts violations by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        self.violations()
            .fold((0, 0), |(errors, warnings), v| match v.severity() {
                Severity::Error => (errors + 1, warnings),
                Severity::Warning => (errors, warnings + 1),
            })
    }

    /// Adds reports from another result.
    pub fn extend(&mut self, other: Self) {
        self.files.extend(other.files);
    }
}

/// A violation rendered as a miette diagnostic against its source text.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic pointing at the violation inside `file`.
    #[must_use]
    pub fn new(violation: &StyleViolation, file: &LintFile) -> Self {
        let name = file
            .path()
            .map_or_else(|| "<input>".to_string(), |p| p.display().to_string());
        let span = match violation.location().position {
            Position::Offset(offset) => SourceSpan::from((offset, 0)),
            Position::Line(line) => file
                .line_range(line)
                .map_or_else(|| SourceSpan::from((0, 0)), |r| SourceSpan::from(r)),
        };
        Self {
            message: format!("[{}] {}", violation.rule_id(), violation.reason()),
            source_code: NamedSource::new(name, file.contents().to_string()),
            span,
            label: violation.severity().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::FixedParser;
    use crate::rule::RuleDescription;

    static TEST_RULE: RuleDescription = RuleDescription {
        identifier: "test_rule",
        name: "Test Rule",
        description: "A test rule",
        non_triggering_examples: &[],
        triggering_examples: &[],
        corrections: &[],
    };

    fn file(text: &str) -> LintFile {
        LintFile::new(text, FixedParser::empty()).with_path("Sources/App.swift")
    }

    fn make_violation(file: &LintFile, severity: Severity) -> StyleViolation {
        StyleViolation::new(&TEST_RULE, severity, Location::at_line(file, 2), "too long")
    }

    #[test]
    fn offset_location_resolves_line_and_column() {
        let f = file("let a = 1\nlet bb = 2\n");
        let resolved = Location::at_offset(&f, 14).resolve(&f);
        assert_eq!(resolved.line, 2);
        assert_eq!(resolved.column, 5);
        assert_eq!(resolved.offset, 14);
    }

    #[test]
    fn line_location_resolves_to_line_start() {
        let f = file("let a = 1\nlet bb = 2\n");
        let resolved = Location::at_line(&f, 2).resolve(&f);
        assert_eq!(resolved.column, 1);
        assert_eq!(resolved.offset, 10);
    }

    #[test]
    fn violation_display() {
        let f = file("a\nb\n");
        let v = make_violation(&f, Severity::Warning);
        insta::assert_snapshot!(
            v.to_string(),
            @"Sources/App.swift:2: warning: Test Rule Violation: too long (test_rule)"
        );
    }

    #[test]
    fn count_by_severity_and_threshold() {
        let f = file("a\nb\n");
        let mut result = LintResult::new();
        let mut report = FileReport::new(&f);
        report.violations.push(make_violation(&f, Severity::Warning));
        report.violations.push(make_violation(&f, Severity::Error));
        report.violations.push(make_violation(&f, Severity::Warning));
        result.files.push(report);
        result.files.push(FileReport::skipped(&f, "unterminated string"));

        assert_eq!(result.count_by_severity(), (1, 2));
        assert!(result.has_errors());
        assert!(result.has_violations_at(Severity::Warning));
        assert_eq!(result.files_checked(), 1);
        assert_eq!(result.files_skipped(), 1);
    }

    #[test]
    fn diagnostic_spans_whole_line_for_line_locations() {
        let f = file("a\nbcd\n");
        let diag = ViolationDiagnostic::new(&make_violation(&f, Severity::Error), &f);
        assert_eq!(diag.span.offset(), 2);
        assert_eq!(diag.span.len(), 3);
        assert_eq!(diag.label, "error");
    }
}
