//! Token stream derived from a Swift syntax tree.

use style_lint_core::{Token, TokenKind};
use tree_sitter::Node;

/// Node kinds emitted as one token without looking at their children.
const STRING_KINDS: &[&str] = &[
    "line_string_literal",
    "multi_line_string_literal",
    "raw_string_literal",
    "regex_literal",
];

const NUMBER_KINDS: &[&str] = &[
    "integer_literal",
    "real_literal",
    "hex_literal",
    "oct_literal",
    "bin_literal",
];

/// Returns every token under `root` in document order, comments included.
///
/// Literals and attributes become single tokens; zero-width nodes inserted
/// by error recovery are dropped.
#[must_use]
pub fn collect(root: Node<'_>, source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        let whole = classify(&node, source);
        if let Some(kind) = whole {
            let length = node.end_byte().saturating_sub(node.start_byte());
            if length > 0 && !node.is_missing() {
                tokens.push(Token::new(kind, node.start_byte(), length));
            }
        }
        if whole.is_none() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return tokens;
            }
        }
    }
}

/// Token kind for nodes that form a single token, `None` for nodes whose
/// children carry the tokens.
fn classify(node: &Node<'_>, source: &str) -> Option<TokenKind> {
    let kind = node.kind();
    let text = source.get(node.start_byte()..node.end_byte()).unwrap_or("");
    match kind {
        "comment" | "multiline_comment" => Some(comment_kind(text)),
        "attribute" => Some(TokenKind::Attribute),
        "simple_identifier" | "type_identifier" => Some(TokenKind::Identifier),
        _ if STRING_KINDS.contains(&kind) => Some(TokenKind::String),
        _ if NUMBER_KINDS.contains(&kind) => Some(TokenKind::Number),
        _ if node.child_count() > 0 => None,
        _ => Some(leaf_kind(text, node.is_named())),
    }
}

/// `///` and `/**` open documentation; `////`, `/**/` and `/***` do not.
#[must_use]
pub fn comment_kind(text: &str) -> TokenKind {
    let line_doc = text.starts_with("///") && !text.starts_with("////");
    let block_doc =
        text.starts_with("/**") && !text.starts_with("/**/") && !text.starts_with("/***");
    if line_doc || block_doc {
        TokenKind::DocComment
    } else {
        TokenKind::Comment
    }
}

fn leaf_kind(text: &str, named: bool) -> TokenKind {
    let starts_word = |s: &str| s.starts_with(|c: char| c == '_' || c.is_alphabetic());
    if let Some(rest) = text.strip_prefix('#') {
        // Compiler directives and `#selector`-style keywords.
        if starts_word(rest) {
            return TokenKind::Keyword;
        }
    }
    if starts_word(text) || text.starts_with('`') {
        if named {
            TokenKind::Identifier
        } else {
            TokenKind::Keyword
        }
    } else {
        TokenKind::Punctuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn kinds(src: &str) -> Vec<(TokenKind, String)> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_swift::LANGUAGE.into())
            .expect("swift grammar");
        let tree = parser.parse(src, None).expect("tree");
        collect(tree.root_node(), src)
            .into_iter()
            .map(|t| (t.kind, t.text(src).to_string()))
            .collect()
    }

    #[test]
    fn classifies_declaration_tokens() {
        let tokens = kinds("@objc public func run(x: Int) {}");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Attribute, "@objc".into()),
                (TokenKind::Keyword, "public".into()),
                (TokenKind::Keyword, "func".into()),
                (TokenKind::Identifier, "run".into()),
                (TokenKind::Punctuation, "(".into()),
                (TokenKind::Identifier, "x".into()),
                (TokenKind::Punctuation, ":".into()),
                (TokenKind::Identifier, "Int".into()),
                (TokenKind::Punctuation, ")".into()),
                (TokenKind::Punctuation, "{".into()),
                (TokenKind::Punctuation, "}".into()),
            ]
        );
    }

    #[test]
    fn distinguishes_doc_comments() {
        assert_eq!(comment_kind("/// doc"), TokenKind::DocComment);
        assert_eq!(comment_kind("/** doc */"), TokenKind::DocComment);
        assert_eq!(comment_kind("// plain"), TokenKind::Comment);
        assert_eq!(comment_kind("/**/"), TokenKind::Comment);
        assert_eq!(comment_kind("//// banner"), TokenKind::Comment);
        assert_eq!(comment_kind("/*** banner ***/"), TokenKind::Comment);

        let tokens = kinds("/// doc\n// plain\nlet a = 1\n");
        assert_eq!(tokens[0].0, TokenKind::DocComment);
        assert_eq!(tokens[1].0, TokenKind::Comment);
    }

    #[test]
    fn strings_hide_their_contents() {
        let tokens = kinds("let s = \"func \\(a) {\"\n");
        let strings: Vec<&str> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::String)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(strings, vec!["\"func \\(a) {\""]);
        assert!(!tokens.iter().any(|(_, t)| t == "{"));
    }

    #[test]
    fn tokens_are_sorted_and_disjoint() {
        let src = "struct S {\n  // note\n  var a = [1, 2.5]\n  func f() -> Int { a.count }\n}\n";
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_swift::LANGUAGE.into())
            .expect("swift grammar");
        let tree = parser.parse(src, None).expect("tree");
        let tokens = collect(tree.root_node(), src);
        assert!(tokens.windows(2).all(|w| w[0].end() <= w[1].offset));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Number && t.text(src) == "2.5"));
    }

    #[test]
    fn offsets_are_bytes() {
        let src = "let é = \"ü\"";
        let tokens = kinds(src);
        assert_eq!(tokens[1], (TokenKind::Identifier, "é".into()));
        assert_eq!(tokens[3], (TokenKind::String, "\"ü\"".into()));
    }
}
