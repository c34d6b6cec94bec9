//! Severity-tagged thresholds for rules that escalate.

use crate::types::Severity;
use serde::{Deserialize, Serialize};

/// A threshold value paired with the severity it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleParameter<T> {
    /// Severity reported when this threshold is exceeded.
    pub severity: Severity,
    /// Threshold value.
    pub value: T,
}

impl<T> RuleParameter<T> {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(severity: Severity, value: T) -> Self {
        Self { severity, value }
    }

    /// Builds a ladder from plain values: the first is a warning, the second
    /// an error. Values beyond the second are ignored.
    #[must_use]
    pub fn ladder<I>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = T>,
    {
        [Severity::Warning, Severity::Error]
            .into_iter()
            .zip(values)
            .map(|(severity, value)| Self::new(severity, value))
            .collect()
    }
}

/// Returns the most severe parameter whose threshold is exceeded.
///
/// Parameters are declared least severe first, so the list is walked from
/// the end. `exceeded` decides the comparison direction for the rule.
pub fn escalate<T, F>(parameters: &[RuleParameter<T>], exceeded: F) -> Option<&RuleParameter<T>>
where
    F: Fn(&T) -> bool,
{
    parameters.iter().rev().find(|p| exceeded(&p.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_assigns_ascending_severity() {
        let params = RuleParameter::ladder([100, 200, 300]);
        assert_eq!(
            params,
            vec![
                RuleParameter::new(Severity::Warning, 100),
                RuleParameter::new(Severity::Error, 200),
            ]
        );
    }

    #[test]
    fn escalate_prefers_most_severe() {
        let params = RuleParameter::ladder([100, 200]);
        assert_eq!(escalate(&params, |limit| 100 > *limit), None);
        assert_eq!(
            escalate(&params, |limit| 101 > *limit).map(|p| p.severity),
            Some(Severity::Warning)
        );
        assert_eq!(
            escalate(&params, |limit| 201 > *limit).map(|p| p.severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn escalate_on_empty_ladder() {
        let params: Vec<RuleParameter<usize>> = Vec::new();
        assert!(escalate(&params, |_| true).is_none());
    }
}
