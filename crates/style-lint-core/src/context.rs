//! Context types for rule execution.

use crate::declarations::DeclarationIndex;
use crate::source::LintFile;

static EMPTY_INDEX: DeclarationIndex = DeclarationIndex::new();

/// Run-wide state handed to every rule invocation.
///
/// Holds only shared references; rules never mutate it.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Member lookup for inherited-member resolution.
    pub declarations: &'a DeclarationIndex,
}

impl<'a> RuleContext<'a> {
    /// Creates a context over a prepared declaration index.
    #[must_use]
    pub fn new(declarations: &'a DeclarationIndex) -> Self {
        Self { declarations }
    }
}

impl RuleContext<'static> {
    /// A context with an empty declaration index.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(&EMPTY_INDEX)
    }
}

/// Builds the declaration index a single file would see if linted alone.
#[must_use]
pub fn index_for_file(file: &LintFile) -> DeclarationIndex {
    DeclarationIndex::from_structures(file.structure())
}
