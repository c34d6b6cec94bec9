//! Rule limiting the length of a line.
//!
//! # Rationale
//!
//! Long lines are hard to read side by side and in review tools. The rule
//! escalates: a line past the first limit is a warning, a line past the
//! second an error.
//!
//! # Configuration
//!
//! ```toml
//! [rules.line_length]
//! thresholds = [120, 200]   # or `warning = 120` / `error = 200`
//! ```
//!
//! Lengths count grapheme clusters, not bytes or code points, and exclude
//! the line terminator.

use style_lint_core::{
    escalate, ConfigError, LintFile, Location, Rule, RuleConfig, RuleContext, RuleDescription,
    RuleParameter, Severity, StyleViolation,
};
use unicode_segmentation::UnicodeSegmentation;

/// Rule identifier for line-length.
pub const IDENTIFIER: &str = "line_length";

/// Rule name for line-length.
pub const NAME: &str = "Line Length";

static DESCRIPTION: RuleDescription = RuleDescription {
    identifier: IDENTIFIER,
    name: NAME,
    description: "Lines should not span too many characters.",
    non_triggering_examples: &["////////////////////////////////////////////////////////////////////////////////////////////////////\n"],
    triggering_examples: &["/////////////////////////////////////////////////////////////////////////////////////////////////////\n", "/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////\n"],
    corrections: &[],
};

/// Flags lines longer than the configured limits.
#[derive(Debug, Clone)]
pub struct LineLength {
    parameters: Vec<RuleParameter<usize>>,
}

impl Default for LineLength {
    fn default() -> Self {
        Self::new()
    }
}

impl LineLength {
    /// Creates the rule with limits of 100 (warning) and 200 (error).
    #[must_use]
    pub fn new() -> Self {
        Self {
            parameters: RuleParameter::ladder([100, 200]),
        }
    }

    /// Sets both limits.
    #[must_use]
    pub fn limits(mut self, warning: usize, error: usize) -> Self {
        self.parameters = RuleParameter::ladder([warning, error]);
        self
    }

    /// Configured limits, least severe first.
    #[must_use]
    pub fn parameters(&self) -> &[RuleParameter<usize>] {
        &self.parameters
    }
}

impl Rule for LineLength {
    fn description(&self) -> &'static RuleDescription {
        &DESCRIPTION
    }

    fn severity(&self) -> Severity {
        self.parameters
            .first()
            .map_or(Severity::Warning, |p| p.severity)
    }

    fn configure(&mut self, config: &RuleConfig) -> Result<(), ConfigError> {
        config.reject_unknown(IDENTIFIER, &["thresholds", "warning", "error"])?;

        if let Some(values) = config.get_usize_array(IDENTIFIER, "thresholds")? {
            if values.is_empty() {
                return Err(ConfigError::invalid(
                    IDENTIFIER,
                    "thresholds",
                    "expected at least one limit",
                ));
            }
            self.parameters = RuleParameter::ladder(values);
        }
        if let Some(warning) = config.get_usize(IDENTIFIER, "warning")? {
            match self.parameters.first_mut() {
                Some(first) => first.value = warning,
                None => self.parameters.push(RuleParameter::new(Severity::Warning, warning)),
            }
        }
        if let Some(error) = config.get_usize(IDENTIFIER, "error")? {
            match self.parameters.get_mut(1) {
                Some(second) => second.value = error,
                None => self.parameters.push(RuleParameter::new(Severity::Error, error)),
            }
        }
        // A severity override applies to the lowest limit.
        if let (Some(severity), Some(first)) = (config.severity, self.parameters.first_mut()) {
            first.severity = severity;
        }
        Ok(())
    }

    fn validate(&self, file: &LintFile, _ctx: &RuleContext<'_>) -> Vec<StyleViolation> {
        let Some(reported_limit) = self.parameters.first().map(|p| p.value) else {
            return Vec::new();
        };

        file.lines()
            .filter_map(|line| {
                let length = line.content.graphemes(true).count();
                escalate(&self.parameters, |limit| length > *limit).map(|parameter| {
                    StyleViolation::new(
                        &DESCRIPTION,
                        parameter.severity,
                        Location::at_line(file, line.index),
                        format!(
                            "Line should be {reported_limit} characters or less: currently {length} characters"
                        ),
                    )
                })
            })
            .collect()
    }
}
