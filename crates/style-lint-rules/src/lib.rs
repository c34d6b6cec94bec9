//! # style-lint-rules
//!
//! Built-in lint rules for style-lint.
//!
//! ## Available Rules
//!
//! | Identifier | Name | Correctable | Description |
//! |------------|------|-------------|-------------|
//! | `line_length` | Line Length | no | Lines should not span too many characters |
//! | `function_visibility_order` | Function Visibility Order | yes | Function visibility should always be the first modifier |
//! | `missing_docs` | Missing Docs | no | Public declarations should be documented |
//!
//! ## Usage
//!
//! ```ignore
//! use style_lint_core::Analyzer;
//! use style_lint_rules::{LineLength, MissingDocs};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(LineLength::new().limits(120, 200))
//!     .rule(MissingDocs::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod function_visibility_order;
pub mod line_length;
pub mod missing_docs;
mod registry;

pub use function_visibility_order::FunctionVisibilityOrder;
pub use line_length::LineLength;
pub use missing_docs::MissingDocs;
pub use registry::{all_rules, descriptions, rule_by_identifier};

/// Re-export core types for convenience.
pub use style_lint_core::{Rule, Severity, StyleViolation};
