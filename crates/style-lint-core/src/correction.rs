//! Applying text edits requested by correctable rules.

use crate::rule::RuleDescription;
use crate::source::LintFile;
use crate::types::{Correction, Location};
use std::ops::Range;
use tracing::debug;

/// A replacement of a byte range with new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte range in the current text.
    pub range: Range<usize>,
    /// Text to put in place of the range.
    pub replacement: String,
    /// Identifier of the requesting rule.
    pub rule_id: &'static str,
    /// Name of the requesting rule.
    pub rule_name: &'static str,
}

impl Edit {
    /// Creates an edit on behalf of `rule`.
    #[must_use]
    pub fn new(rule: &RuleDescription, range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
            rule_id: rule.identifier,
            rule_name: rule.name,
        }
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        let (a, b) = (&self.range, &other.range);
        match (a.is_empty(), b.is_empty()) {
            (true, true) => a.start == b.start,
            (true, false) => b.start < a.start && a.start < b.end,
            (false, true) => a.start < b.start && b.start < a.end,
            (false, false) => a.start < b.end && b.start < a.end,
        }
    }

    fn fits(&self, text: &str) -> bool {
        self.range.start <= self.range.end
            && self.range.end <= text.len()
            && text.is_char_boundary(self.range.start)
            && text.is_char_boundary(self.range.end)
    }
}

/// Applies `edits` to `file` and returns one correction per applied edit.
///
/// Edits are considered by descending start offset, keeping submission order
/// for equal starts. An edit that overlaps one already accepted, or that does
/// not fit the text, is skipped and reported nowhere. Accepted edits are
/// applied back to front so pending offsets stay valid. Each correction
/// carries the edit's start offset in the text before correction, and the
/// returned list is ascending by that offset.
pub fn apply_edits(file: &mut LintFile, edits: Vec<Edit>) -> Vec<Correction> {
    let mut candidates = edits;
    candidates.sort_by(|a, b| b.range.start.cmp(&a.range.start));

    let mut accepted: Vec<Edit> = Vec::with_capacity(candidates.len());
    for edit in candidates {
        if !edit.fits(file.contents()) {
            debug!(
                "Skipping out-of-bounds edit {:?} from {}",
                edit.range, edit.rule_id
            );
            continue;
        }
        if accepted.iter().any(|a| a.conflicts_with(&edit)) {
            debug!(
                "Skipping conflicting edit {:?} from {}",
                edit.range, edit.rule_id
            );
            continue;
        }
        accepted.push(edit);
    }

    if accepted.is_empty() {
        return Vec::new();
    }

    // Back to front; a replacement goes before an insertion at its start.
    accepted.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });

    let mut text = file.contents().to_string();
    for edit in &accepted {
        text.replace_range(edit.range.clone(), &edit.replacement);
    }

    let corrections: Vec<Correction> = accepted
        .iter()
        .rev()
        .map(|edit| Correction {
            rule_id: edit.rule_id.to_string(),
            rule_name: edit.rule_name.to_string(),
            location: Location::at_offset(file, edit.range.start),
        })
        .collect();

    file.write(text);
    corrections
}
