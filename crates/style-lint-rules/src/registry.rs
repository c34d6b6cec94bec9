//! Registry of every built-in rule.

use crate::{FunctionVisibilityOrder, LineLength, MissingDocs};
use style_lint_core::{RuleBox, RuleDescription};

/// Returns every built-in rule with default settings, in run order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LineLength::new()),
        Box::new(FunctionVisibilityOrder::new()),
        Box::new(MissingDocs::new()),
    ]
}

/// Returns a fresh instance of the rule with `identifier`.
#[must_use]
pub fn rule_by_identifier(identifier: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|rule| rule.identifier() == identifier)
}

/// Returns the description of every built-in rule.
#[must_use]
pub fn descriptions() -> Vec<&'static RuleDescription> {
    all_rules().iter().map(|rule| rule.description()).collect()
}
