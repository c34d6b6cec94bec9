//! Contract with the external source parser.

use crate::structure::StructuralNode;
use std::ops::Range;

/// Classification of a source token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved or contextual keyword (`func`, `public`, `override`, ...).
    Keyword,
    /// Plain identifier.
    Identifier,
    /// Attribute such as `@objc`.
    Attribute,
    /// String literal, including its quotes.
    String,
    /// Numeric literal.
    Number,
    /// Regular comment.
    Comment,
    /// Documentation comment (`///` or `/** */`).
    DocComment,
    /// Any other single character.
    Punctuation,
}

/// A classified span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// Token classification.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    /// Byte offset just past the token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Byte range of the token.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Returns the token text inside `source`.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.range()).unwrap_or_default()
    }

    /// Returns true for comments of either kind.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment | TokenKind::DocComment)
    }
}

/// Parser output for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSource {
    /// Root of the declaration tree.
    pub structure: StructuralNode,
    /// All tokens in document order, comments included.
    pub tokens: Vec<Token>,
}

impl ParsedSource {
    /// Tokens that start inside `range`.
    #[must_use]
    pub fn tokens_in(&self, range: Range<usize>) -> &[Token] {
        let start = self.tokens.partition_point(|t| t.offset < range.start);
        let end = self.tokens.partition_point(|t| t.offset < range.end);
        &self.tokens[start..end.max(start)]
    }
}

/// Error reported when source text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    /// Description of the problem.
    pub message: String,
    /// Byte offset where the problem was detected.
    pub offset: usize,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Turns raw source text into a structural model.
///
/// Implementations must be deterministic and free of shared mutable state;
/// the analyzer calls them from several threads at once.
pub trait StructureParser: Send + Sync {
    /// Parses `text` into a declaration tree and token stream.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the text is malformed.
    fn parse(&self, text: &str) -> Result<ParsedSource, ParseError>;
}
