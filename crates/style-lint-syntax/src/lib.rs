//! # style-lint-syntax
//!
//! Tree-sitter based structure provider for style-lint.
//!
//! This crate turns Swift source text into the declaration tree and token
//! stream that rules consume through [`style_lint_core::StructureParser`]:
//!
//! - [`SwiftParser`] for declaration extraction (kinds, names,
//!   accessibility, documentation, inheritance clauses)
//! - [`tokens::collect`] for the comment-preserving token stream

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod swift;
pub mod tokens;

pub use swift::SwiftParser;

use std::sync::Arc;
use style_lint_core::StructureParser;

/// Returns a shared parser ready to attach to [`style_lint_core::LintFile`]s.
#[must_use]
pub fn parser() -> Arc<dyn StructureParser> {
    Arc::new(SwiftParser::new())
}
