//! # style-lint-core
//!
//! Core framework for style linting of Swift source files.
//!
//! This crate provides the foundational traits and types for building
//! source linters. It includes:
//!
//! - [`LintFile`] for source text with lazily computed line and structure data
//! - [`StructureParser`] as the seam to a structure provider
//! - [`Rule`] and [`CorrectableRule`] traits for per-file rules
//! - [`DeclarationIndex`] for cross-file member lookup
//! - [`Analyzer`] for orchestrating lint and correction runs
//! - [`StyleViolation`] and [`Correction`] for representing results
//!
//! ## Example
//!
//! ```ignore
//! use style_lint_core::{Analyzer, LintFile};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(LineLength::new())
//!     .build()?;
//!
//! let file = LintFile::from_path("Sources/App.swift", parser)?;
//! let result = analyzer.lint(&[file])?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod correction;
mod declarations;
mod parameter;
mod parser;
mod rule;
mod source;
mod structure;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{Config, ConfigError, RuleConfig};
pub use context::{index_for_file, RuleContext};
pub use correction::{apply_edits, Edit};
pub use declarations::DeclarationIndex;
pub use parameter::{escalate, RuleParameter};
pub use parser::{ParseError, ParsedSource, StructureParser, Token, TokenKind};
pub use rule::{CorrectableRule, Rule, RuleBox, RuleDescription};
pub use source::{Line, LintFile};
pub use structure::{AccessControlLevel, Accessibility, DeclarationKind, DepthFirst, StructuralNode};
pub use types::{
    Correction, FileReport, LintResult, Location, Position, ResolvedLocation, Severity,
    StyleViolation, ViolationDiagnostic,
};
