//! Source files under analysis.

use crate::parser::{ParseError, ParsedSource, StructureParser};
use crate::structure::StructuralNode;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use unicode_segmentation::UnicodeSegmentation;

/// A single line of a [`LintFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line number (1-indexed).
    pub index: usize,
    /// Line text without the trailing newline.
    pub content: &'a str,
    /// Byte offset of the first character.
    pub offset: usize,
}

/// The text of one source file together with its lazily derived views.
///
/// Both the line index and the parse result are computed on first use and
/// dropped whenever the text changes through [`LintFile::write`].
#[derive(Clone)]
pub struct LintFile {
    path: Option<PathBuf>,
    contents: String,
    parser: Arc<dyn StructureParser>,
    line_starts: OnceLock<Vec<usize>>,
    parsed: OnceLock<Result<ParsedSource, ParseError>>,
}

impl std::fmt::Debug for LintFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintFile")
            .field("path", &self.path)
            .field("len", &self.contents.len())
            .finish_non_exhaustive()
    }
}

impl LintFile {
    /// Creates an in-memory file parsed with `parser`.
    #[must_use]
    pub fn new(contents: impl Into<String>, parser: Arc<dyn StructureParser>) -> Self {
        Self {
            path: None,
            contents: contents.into(),
            parser,
            line_starts: OnceLock::new(),
            parsed: OnceLock::new(),
        }
    }

    /// Reads a file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn from_path(
        path: impl Into<PathBuf>,
        parser: Arc<dyn StructureParser>,
    ) -> std::io::Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)?;
        Ok(Self::new(contents, parser).with_path(path))
    }

    /// Attaches a path used in reported locations.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Path of the file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current text.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Replaces the text and invalidates the line index and parse result.
    pub fn write(&mut self, contents: impl Into<String>) {
        self.contents = contents.into();
        self.line_starts = OnceLock::new();
        self.parsed = OnceLock::new();
    }

    /// Returns the parse result for the current text.
    ///
    /// # Errors
    ///
    /// Returns the parser's error when the text is malformed.
    pub fn parsed(&self) -> Result<&ParsedSource, &ParseError> {
        self.parsed
            .get_or_init(|| self.parser.parse(&self.contents))
            .as_ref()
    }

    /// Returns the declaration tree, or `None` if the text failed to parse.
    #[must_use]
    pub fn structure(&self) -> Option<&StructuralNode> {
        self.parsed().ok().map(|p| &p.structure)
    }

    /// Byte offsets at which each line starts.
    #[must_use]
    pub fn line_starts(&self) -> &[usize] {
        self.line_starts.get_or_init(|| {
            std::iter::once(0)
                .chain(
                    self.contents
                        .bytes()
                        .enumerate()
                        .filter(|(_, b)| *b == b'\n')
                        .map(|(i, _)| i + 1),
                )
                .collect()
        })
    }

    /// Number of lines. A trailing newline does not start a new line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        let starts = self.line_starts();
        match starts.last() {
            Some(&last) if last == self.contents.len() && starts.len() > 1 => starts.len() - 1,
            _ => starts.len(),
        }
    }

    /// Byte range of a 1-based line, excluding its line terminator.
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        let starts = self.line_starts();
        let start = starts[line - 1];
        let mut end = starts
            .get(line)
            .map_or(self.contents.len(), |next| next - 1);
        if self.contents[start..end].ends_with('\r') {
            end -= 1;
        }
        Some(start..end)
    }

    /// Iterates over the lines of the file.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        (1..=self.line_count()).filter_map(move |index| {
            self.line_range(index).map(|range| Line {
                index,
                offset: range.start,
                content: &self.contents[range],
            })
        })
    }

    /// Translates a byte offset into a 1-based `(line, column)` pair.
    ///
    /// Columns count grapheme clusters. Offsets past the end clamp to the end.
    #[must_use]
    pub fn location_for(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.contents.len());
        let starts = self.line_starts();
        let line = starts.partition_point(|&start| start <= offset);
        let line_start = starts[line - 1];
        let column = self
            .contents
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.graphemes(true).count());
        (line, column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::FixedParser;

    fn file(text: &str) -> LintFile {
        LintFile::new(text, FixedParser::empty())
    }

    #[test]
    fn lines_strip_terminators() {
        let f = file("first\r\nsecond\nthird\n");
        let lines: Vec<_> = f.lines().map(|l| (l.index, l.content)).collect();
        assert_eq!(lines, vec![(1, "first"), (2, "second"), (3, "third")]);
    }

    #[test]
    fn last_line_without_newline_is_counted() {
        let f = file("a\nb");
        assert_eq!(f.line_count(), 2);
        assert_eq!(f.line_range(2), Some(2..3));
        assert_eq!(f.line_range(3), None);
    }

    #[test]
    fn empty_file_has_one_empty_line() {
        let f = file("");
        assert_eq!(f.line_count(), 1);
        assert_eq!(f.lines().next().map(|l| l.content), Some(""));
    }

    #[test]
    fn location_for_counts_characters() {
        let f = file("let é = 1\nfunc x()\n");
        assert_eq!(f.location_for(0), (1, 1));
        // "let é " is 7 bytes but 6 characters
        assert_eq!(f.location_for(7), (1, 7));
        assert_eq!(f.location_for(11), (2, 1));
    }

    #[test]
    fn location_for_counts_grapheme_clusters() {
        // "e" followed by a combining acute accent is one column
        let f = file("let e\u{301} = 1\n");
        assert_eq!(f.location_for("let e\u{301} ".len()), (1, 7));

        let flags = "\u{1F1EF}\u{1F1F5}".repeat(3);
        let f = file(&format!("{flags}x"));
        assert_eq!(f.location_for(flags.len()), (1, 4));
    }

    #[test]
    fn write_invalidates_line_index() {
        let mut f = file("a\nb\n");
        assert_eq!(f.line_count(), 2);
        f.write("a\nb\nc\nd\n");
        assert_eq!(f.line_count(), 4);
        assert_eq!(f.location_for(6), (4, 1));
    }
}
