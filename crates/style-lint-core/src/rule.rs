//! Rule traits for defining lint rules.

use crate::config::{ConfigError, RuleConfig};
use crate::context::RuleContext;
use crate::correction::{apply_edits, Edit};
use crate::source::LintFile;
use crate::types::{Correction, Severity, StyleViolation};

/// Static metadata every rule publishes.
///
/// The fixture lists double as documentation and as the seed corpus for the
/// conformance tests run over every registered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescription {
    /// Globally unique, stable identifier (e.g., "line_length").
    pub identifier: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// One-sentence description of what the rule checks.
    pub description: &'static str,
    /// Sources that must not trigger the rule.
    pub non_triggering_examples: &'static [&'static str],
    /// Sources that must trigger the rule at least once.
    pub triggering_examples: &'static [&'static str],
    /// `(input, expected)` pairs for correctable rules.
    pub corrections: &'static [(&'static str, &'static str)],
}

/// A per-file lint rule.
///
/// Implement this trait to create rules that analyze a [`LintFile`]. The
/// analyzer holds rules as `Box<dyn Rule>` and only reaches the correction
/// capability through [`Rule::as_correctable`].
///
/// # Example
///
/// ```ignore
/// use style_lint_core::{Rule, RuleDescription, LintFile, RuleContext, StyleViolation};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn description(&self) -> &'static RuleDescription { &DESCRIPTION }
///     fn severity(&self) -> Severity { Severity::Warning }
///     fn configure(&mut self, _: &RuleConfig) -> Result<(), ConfigError> { Ok(()) }
///     fn validate(&self, file: &LintFile, _: &RuleContext<'_>) -> Vec<StyleViolation> {
///         // ...
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule's metadata and fixtures.
    fn description(&self) -> &'static RuleDescription;

    /// Returns the rule identifier (e.g., "missing_docs").
    fn identifier(&self) -> &'static str {
        self.description().identifier
    }

    /// Returns the human-readable rule name.
    fn name(&self) -> &'static str {
        self.description().name
    }

    /// Returns the default severity for violations from this rule.
    fn severity(&self) -> Severity;

    /// Applies a configuration section to this rule.
    ///
    /// Called before the first validation; rules are not reconfigured
    /// during a pass.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown keys or values of the wrong type.
    fn configure(&mut self, config: &RuleConfig) -> Result<(), ConfigError>;

    /// Checks a single file and returns violations in document order.
    fn validate(&self, file: &LintFile, ctx: &RuleContext<'_>) -> Vec<StyleViolation>;

    /// Returns the correction capability, if this rule has one.
    fn as_correctable(&self) -> Option<&dyn CorrectableRule> {
        None
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A rule that can rewrite the text it flags.
pub trait CorrectableRule: Rule {
    /// Returns the edits that would fix every violation in `file`.
    fn violating_edits(&self, file: &LintFile, ctx: &RuleContext<'_>) -> Vec<Edit>;

    /// Applies this rule's edits to `file` and reports what was changed.
    fn correct(&self, file: &mut LintFile, ctx: &RuleContext<'_>) -> Vec<Correction> {
        let edits = self.violating_edits(file, ctx);
        apply_edits(file, edits)
    }
}
