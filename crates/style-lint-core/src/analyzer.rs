//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, ConfigError};
use crate::context::RuleContext;
use crate::correction::apply_edits;
use crate::declarations::DeclarationIndex;
use crate::rule::{Rule, RuleBox};
use crate::source::LintFile;
use crate::types::{FileReport, LintResult};

use rayon::prelude::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Error parsing a source file while `fail_on_parse_error` is set.
    #[error("Parse error in {}: {message}", path.as_ref().map_or_else(|| "<input>".to_string(), |p| p.display().to_string()))]
    Parse {
        /// Path to the file that failed to parse.
        path: Option<PathBuf>,
        /// Parse error message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer, applying configuration to every rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration names an unknown rule or
    /// carries an invalid option.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let mut rules = self.rules;
        config.apply(&mut rules)?;

        rules.retain(|rule| {
            let enabled = config.is_rule_enabled(rule.identifier());
            if !enabled {
                debug!("Skipping disabled rule: {}", rule.identifier());
            }
            enabled
        });

        Ok(Analyzer {
            rules,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance. Rules are configured
/// once at build time and only read afterwards, so one analyzer can serve
/// several files concurrently.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Lints a batch of files.
    ///
    /// Every file is parsed and indexed before any rule runs; files are then
    /// validated in parallel against that read-only index. A file that fails
    /// to parse yields no violations and does not affect its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] only when `fail_on_parse_error` is set.
    pub fn lint(&self, files: &[LintFile]) -> Result<LintResult, AnalyzerError> {
        info!(
            "Linting {} files with {} rules",
            files.len(),
            self.rules.len()
        );

        let index = self.index(files)?;
        let ctx = RuleContext::new(&index);
        let reports: Vec<FileReport> = files
            .par_iter()
            .map(|file| self.lint_with(file, &ctx))
            .collect();

        let result = LintResult { files: reports };
        let (errors, warnings) = result.count_by_severity();
        info!(
            "Lint complete: {} error(s), {} warning(s) in {} file(s)",
            errors,
            warnings,
            result.files_checked()
        );
        Ok(result)
    }

    /// Corrects a batch of files in place.
    ///
    /// The edits of every correctable rule are gathered per file and applied
    /// together, so overlapping edits from different rules are resolved by
    /// the applier rather than stacked. Writing the new text back to disk is
    /// left to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] only when `fail_on_parse_error` is set.
    pub fn correct(&self, files: &mut [LintFile]) -> Result<LintResult, AnalyzerError> {
        info!("Correcting {} files", files.len());

        let index = self.index(files)?;
        let ctx = RuleContext::new(&index);
        let reports: Vec<FileReport> = files
            .par_iter_mut()
            .map(|file| self.correct_with(file, &ctx))
            .collect();

        let result = LintResult { files: reports };
        info!(
            "Correction complete: {} correction(s)",
            result.corrections().count()
        );
        Ok(result)
    }

    /// Lints one file on its own.
    #[must_use]
    pub fn lint_file(&self, file: &LintFile) -> FileReport {
        let index = crate::context::index_for_file(file);
        self.lint_with(file, &RuleContext::new(&index))
    }

    /// Corrects one file on its own.
    pub fn correct_file(&self, file: &mut LintFile) -> FileReport {
        let index = crate::context::index_for_file(file);
        self.correct_with(file, &RuleContext::new(&index))
    }

    fn index(&self, files: &[LintFile]) -> Result<DeclarationIndex, AnalyzerError> {
        let mut index = DeclarationIndex::new();
        for file in files {
            match file.parsed() {
                Ok(parsed) => index.insert_structure(&parsed.structure),
                Err(e) if self.fail_on_parse_error => {
                    return Err(AnalyzerError::Parse {
                        path: file.path().map(PathBuf::from),
                        message: e.to_string(),
                    });
                }
                Err(_) => {}
            }
        }
        debug!("Declaration index holds {} types", index.len());
        Ok(index)
    }

    fn lint_with(&self, file: &LintFile, ctx: &RuleContext<'_>) -> FileReport {
        if let Err(e) = file.parsed() {
            warn!("Failed to parse {}: {}", display_path(file), e);
            return FileReport::skipped(file, e.to_string());
        }

        debug!("Linting: {}", display_path(file));
        let mut report = FileReport::new(file);
        for rule in &self.rules {
            report.violations.extend(rule.validate(file, ctx));
        }
        report
    }

    fn correct_with(&self, file: &mut LintFile, ctx: &RuleContext<'_>) -> FileReport {
        if let Err(e) = file.parsed() {
            warn!("Failed to parse {}: {}", display_path(file), e);
            return FileReport::skipped(file, e.to_string());
        }

        debug!("Correcting: {}", display_path(file));
        let edits = self
            .rules
            .iter()
            .filter_map(|rule| rule.as_correctable())
            .flat_map(|rule| rule.violating_edits(file, ctx))
            .collect();

        let mut report = FileReport::new(file);
        report.corrections = apply_edits(file, edits);
        report
    }
}

fn display_path(file: &LintFile) -> String {
    file.path()
        .map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::correction::Edit;
    use crate::parser::tests::FixedParser;
    use crate::rule::{CorrectableRule, RuleDescription};
    use crate::structure::{DeclarationKind, StructuralNode};
    use crate::types::{Location, Severity, StyleViolation};

    static MARKER: RuleDescription = RuleDescription {
        identifier: "marker",
        name: "Marker",
        description: "Flags every `!`.",
        non_triggering_examples: &[],
        triggering_examples: &[],
        corrections: &[],
    };

    static INHERITS: RuleDescription = RuleDescription {
        identifier: "inherits",
        name: "Inherits",
        description: "Flags types that inherit known members.",
        non_triggering_examples: &[],
        triggering_examples: &[],
        corrections: &[],
    };

    struct Marker {
        severity: Severity,
    }

    impl Rule for Marker {
        fn description(&self) -> &'static RuleDescription {
            &MARKER
        }

        fn severity(&self) -> Severity {
            self.severity
        }

        fn configure(&mut self, config: &RuleConfig) -> Result<(), ConfigError> {
            config.reject_unknown(MARKER.identifier, &[])?;
            if let Some(severity) = config.severity {
                self.severity = severity;
            }
            Ok(())
        }

        fn validate(&self, file: &LintFile, _ctx: &RuleContext<'_>) -> Vec<StyleViolation> {
            file.contents()
                .match_indices('!')
                .map(|(offset, _)| {
                    StyleViolation::new(&MARKER, self.severity, Location::at_offset(file, offset), "bang")
                })
                .collect()
        }

        fn as_correctable(&self) -> Option<&dyn CorrectableRule> {
            Some(self)
        }
    }

    impl CorrectableRule for Marker {
        fn violating_edits(&self, file: &LintFile, _ctx: &RuleContext<'_>) -> Vec<Edit> {
            file.contents()
                .match_indices('!')
                .map(|(offset, _)| Edit::new(&MARKER, offset..offset + 1, "."))
                .collect()
        }
    }

    struct Inherits;

    impl Rule for Inherits {
        fn description(&self) -> &'static RuleDescription {
            &INHERITS
        }

        fn severity(&self) -> Severity {
            Severity::Warning
        }

        fn configure(&mut self, _config: &RuleConfig) -> Result<(), ConfigError> {
            Ok(())
        }

        fn validate(&self, file: &LintFile, ctx: &RuleContext<'_>) -> Vec<StyleViolation> {
            let Some(root) = file.structure() else {
                return Vec::new();
            };
            root.depth_first()
                .filter(|n| !ctx.declarations.inherited_members(n).is_empty())
                .map(|n| StyleViolation::new(&INHERITS, Severity::Warning, Location::at_offset(file, n.offset), "inherits"))
                .collect()
        }
    }

    fn marker() -> Marker {
        Marker {
            severity: Severity::Warning,
        }
    }

    #[test]
    fn unknown_rule_in_config_fails_at_build() {
        let config = Config::parse(r#"disabled_rules = ["nope"]"#).expect("parse");
        let err = Analyzer::builder()
            .rule(marker())
            .config(config)
            .build()
            .err()
            .expect("build should fail");
        assert!(matches!(
            err,
            AnalyzerError::Config(ConfigError::UnknownRule { ref identifier }) if identifier == "nope"
        ));
    }

    #[test]
    fn invalid_rule_option_fails_at_build() {
        let config = Config::parse("[rules.marker]\nlimit = 3\n").expect("parse");
        let result = Analyzer::builder().rule(marker()).config(config).build();
        assert!(matches!(
            result,
            Err(AnalyzerError::Config(ConfigError::InvalidOption { .. }))
        ));
    }

    #[test]
    fn severity_override_applies_before_validation() {
        let config = Config::parse("[rules.marker]\nseverity = \"error\"\n").expect("parse");
        let analyzer = Analyzer::builder()
            .rule(marker())
            .config(config)
            .build()
            .expect("build");
        let report = analyzer.lint_file(&LintFile::new("a!", FixedParser::empty()));
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].severity(), Severity::Error);
    }

    #[test]
    fn disabled_rules_do_not_run() {
        let config = Config::parse(r#"disabled_rules = ["marker"]"#).expect("parse");
        let analyzer = Analyzer::builder()
            .rule(marker())
            .config(config)
            .build()
            .expect("build");
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn parse_failure_is_isolated() {
        let analyzer = Analyzer::builder().rule(marker()).build().expect("build");
        let files = vec![
            LintFile::new("bad!", FixedParser::failing("unterminated string")).with_path("Bad.swift"),
            LintFile::new("good!", FixedParser::empty()).with_path("Good.swift"),
        ];
        let result = analyzer.lint(&files).expect("lint");
        assert_eq!(result.files_skipped(), 1);
        assert_eq!(result.files_checked(), 1);
        assert!(result.files[0].violations.is_empty());
        assert_eq!(result.files[1].violations.len(), 1);
    }

    #[test]
    fn parse_failure_can_abort() {
        let analyzer = Analyzer::builder()
            .rule(marker())
            .fail_on_parse_error(true)
            .build()
            .expect("build");
        let files = vec![LintFile::new("bad", FixedParser::failing("unbalanced braces"))];
        assert!(matches!(
            analyzer.lint(&files),
            Err(AnalyzerError::Parse { .. })
        ));
    }

    #[test]
    fn index_spans_all_files() {
        let protocol_file = StructuralNode::new(DeclarationKind::SourceFile, 0, 10).with_child(
            StructuralNode::new(DeclarationKind::Protocol, 0, 10)
                .with_name("P")
                .with_child(StructuralNode::new(DeclarationKind::VarInstance, 2, 2).with_name("x")),
        );
        let conformer_file = StructuralNode::new(DeclarationKind::SourceFile, 0, 10).with_child(
            StructuralNode::new(DeclarationKind::Struct, 0, 10)
                .with_name("S")
                .with_inherited_types(["P"]),
        );
        let files = vec![
            LintFile::new("protocol", FixedParser::with_structure(protocol_file)),
            LintFile::new("conformer", FixedParser::with_structure(conformer_file)),
        ];
        let analyzer = Analyzer::builder().rule(Inherits).build().expect("build");

        let result = analyzer.lint(&files).expect("lint");
        assert_eq!(result.files[1].violations.len(), 1);

        // Alone, the conformer cannot see the protocol.
        assert!(analyzer.lint_file(&files[1]).violations.is_empty());
    }

    #[test]
    fn correct_rewrites_and_reports() {
        let analyzer = Analyzer::builder()
            .rule(marker())
            .rule(Inherits)
            .build()
            .expect("build");
        let mut files = vec![LintFile::new("a!b!", FixedParser::empty())];
        let result = analyzer.correct(&mut files).expect("correct");
        assert_eq!(files[0].contents(), "a.b.");
        assert_eq!(result.corrections().count(), 2);
        assert!(analyzer.lint_file(&files[0]).violations.is_empty());
    }
}
