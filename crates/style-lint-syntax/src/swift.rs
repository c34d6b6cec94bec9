//! Swift declaration extractor using Tree-sitter.
//!
//! Only type bodies are walked; function bodies and statements are left
//! alone. Trees with recovered syntax errors are still extracted, with the
//! contents of error nodes read as members of the enclosing declaration.

use crate::tokens;
use style_lint_core::{
    Accessibility, DeclarationKind, ParseError, ParsedSource, StructuralNode, StructureParser,
    Token, TokenKind,
};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

const MODIFIERS: &[&str] = &[
    "open",
    "public",
    "internal",
    "fileprivate",
    "private",
    "override",
    "required",
    "convenience",
    "final",
    "static",
    "dynamic",
    "mutating",
    "nonmutating",
    "lazy",
    "weak",
    "unowned",
    "optional",
    "indirect",
    "prefix",
    "postfix",
    "infix",
    "nonisolated",
];

/// Extracts the declaration tree and token stream from Swift source.
pub struct SwiftParser {
    language: Language,
}

impl SwiftParser {
    /// Creates a new Swift parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_swift::LANGUAGE.into(),
        }
    }
}

impl Default for SwiftParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureParser for SwiftParser {
    fn parse(&self, text: &str) -> Result<ParsedSource, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::new(format!("failed to load Swift grammar: {e}"), 0))?;
        let tree = parser
            .parse(text, None)
            .ok_or_else(|| ParseError::new("parser returned no syntax tree", 0))?;
        let root = tree.root_node();
        if root.has_error() {
            debug!("Recovered from syntax errors in {} byte source", text.len());
        }

        let tokens = tokens::collect(root, text);
        let extractor = Extractor {
            text,
            tokens: &tokens,
        };
        let mut structure = StructuralNode::new(DeclarationKind::SourceFile, 0, text.len());
        structure.children = extractor.members(root, &Scope::default());
        debug!("Extracted {} top-level declarations", structure.children.len());

        Ok(ParsedSource { structure, tokens })
    }
}

/// What the enclosing declaration implies for its members.
#[derive(Debug, Clone, Default)]
struct Scope {
    in_type: bool,
    /// Level of members that declare none.
    members: Option<Accessibility>,
    /// Level of enum cases.
    cases: Option<Accessibility>,
}

/// Modifiers written before a declaration keyword.
#[derive(Debug, Default)]
struct Prefix {
    visibility: Option<Accessibility>,
    is_static: bool,
    is_class: bool,
}

struct Extractor<'a> {
    text: &'a str,
    tokens: &'a [Token],
}

impl<'a> Extractor<'a> {
    fn text(&self, node: &Node<'_>) -> &'a str {
        self.text
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
    }

    fn members(&self, container: Node<'_>, scope: &Scope) -> Vec<StructuralNode> {
        let mut nodes = Vec::new();
        let mut cursor = container.walk();
        for child in container.children(&mut cursor) {
            match child.kind() {
                "class_declaration" | "protocol_declaration" => {
                    nodes.push(self.type_declaration(&child));
                }
                "function_declaration"
                | "protocol_function_declaration"
                | "init_declaration"
                | "deinit_declaration"
                | "subscript_declaration" => nodes.push(self.function(&child, scope)),
                "property_declaration" | "protocol_property_declaration" => {
                    nodes.push(self.variable(&child, scope));
                }
                "typealias_declaration" => nodes.push(self.typealias(&child, scope)),
                "enum_entry" => nodes.extend(self.enum_case(&child, scope)),
                "ERROR" => nodes.extend(self.members(child, scope)),
                _ => {}
            }
        }
        nodes
    }

    /// Tokens that start inside `node`.
    fn tokens_of(&self, node: &Node<'_>) -> &'a [Token] {
        let start = self.tokens.partition_point(|t| t.offset < node.start_byte());
        let end = self.tokens.partition_point(|t| t.offset < node.end_byte());
        &self.tokens[start..end.max(start)]
    }

    /// Start of the first non-comment token in `node`.
    fn start(&self, node: &Node<'_>) -> usize {
        self.tokens_of(node)
            .iter()
            .find(|t| !t.is_comment())
            .map_or(node.start_byte(), |t| t.offset)
    }

    fn prefix(&self, node: &Node<'_>) -> Prefix {
        let tokens: Vec<&Token> = self
            .tokens_of(node)
            .iter()
            .filter(|t| !t.is_comment())
            .collect();
        let word = |i: usize| tokens.get(i).map_or("", |t| t.text(self.text));

        let mut prefix = Prefix::default();
        let mut i = 0;
        while let Some(token) = tokens.get(i) {
            let current = word(i);
            match token.kind {
                TokenKind::Attribute => {}
                TokenKind::Keyword if current == "class" => {
                    let next = word(i + 1);
                    let is_modifier = MODIFIERS.contains(&next)
                        || matches!(next, "func" | "var" | "let" | "subscript");
                    if !is_modifier {
                        break;
                    }
                    prefix.is_class = true;
                }
                TokenKind::Keyword if MODIFIERS.contains(&current) => {
                    if word(i + 1) == "(" {
                        // A setter-scoped level such as `private(set)`.
                        while i < tokens.len() && word(i) != ")" {
                            i += 1;
                        }
                    } else {
                        if let Some(level) = Accessibility::from_keyword(current) {
                            prefix.visibility = Some(level);
                        }
                        prefix.is_static |= current == "static";
                    }
                }
                _ => break,
            }
            i += 1;
        }
        prefix
    }

    /// Doc comments directly before `offset`, joined with newlines.
    fn documentation(&self, offset: usize) -> Option<String> {
        let before = self.tokens.partition_point(|t| t.offset < offset);
        let docs: Vec<&str> = self.tokens[..before]
            .iter()
            .rev()
            .take_while(|t| t.kind == TokenKind::DocComment)
            .map(|t| t.text(self.text))
            .collect();
        if docs.is_empty() {
            return None;
        }
        Some(docs.into_iter().rev().collect::<Vec<_>>().join("\n"))
    }

    fn node(
        &self,
        kind: DeclarationKind,
        start: usize,
        end: usize,
        accessibility: Accessibility,
        documentation: Option<String>,
    ) -> StructuralNode {
        let node = StructuralNode::new(kind, start, end.saturating_sub(start))
            .with_accessibility(accessibility);
        match documentation {
            Some(doc) => node.with_documentation(doc),
            None => node,
        }
    }

    fn declaration(
        &self,
        decl: &Node<'_>,
        kind: DeclarationKind,
        accessibility: Accessibility,
    ) -> StructuralNode {
        let start = self.start(decl);
        self.node(
            kind,
            start,
            decl.end_byte(),
            accessibility,
            self.documentation(start),
        )
    }

    fn type_declaration(&self, decl: &Node<'_>) -> StructuralNode {
        let keyword = if decl.kind() == "protocol_declaration" {
            "protocol"
        } else {
            decl.child_by_field_name("declaration_kind")
                .map_or("class", |k| self.text(&k))
        };
        let kind = match keyword {
            "struct" => DeclarationKind::Struct,
            "enum" => DeclarationKind::Enum,
            "protocol" => DeclarationKind::Protocol,
            "extension" => DeclarationKind::Extension,
            "actor" => DeclarationKind::Unrecognized("source.lang.swift.decl.actor".to_string()),
            _ => DeclarationKind::Class,
        };

        let prefix = self.prefix(decl);
        let accessibility = prefix.visibility.clone().unwrap_or(Accessibility::Internal);
        let inner = Scope {
            in_type: true,
            members: match kind {
                DeclarationKind::Protocol => Some(accessibility.clone()),
                DeclarationKind::Extension => prefix.visibility.clone(),
                _ => None,
            },
            cases: (kind == DeclarationKind::Enum).then(|| accessibility.clone()),
        };

        let mut cursor = decl.walk();
        let inherited: Vec<String> = decl
            .children(&mut cursor)
            .filter(|c| c.kind() == "inheritance_specifier")
            .map(|c| self.text(&c).to_string())
            .collect();
        let children = self
            .body(decl)
            .map(|body| self.members(body, &inner))
            .unwrap_or_default();

        let mut node = self
            .declaration(decl, kind, accessibility)
            .with_inherited_types(inherited);
        node.name = decl
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_string());
        node.children = children;
        debug!(
            "Extracted {} with {} members",
            node.name.as_deref().unwrap_or("<anonymous>"),
            node.children.len()
        );
        node
    }

    fn body<'t>(&self, decl: &Node<'t>) -> Option<Node<'t>> {
        decl.child_by_field_name("body").or_else(|| {
            let mut cursor = decl.walk();
            let found = decl
                .children(&mut cursor)
                .find(|c| c.kind().ends_with("_body"));
            found
        })
    }

    fn function(&self, decl: &Node<'_>, scope: &Scope) -> StructuralNode {
        let prefix = self.prefix(decl);
        let (kind, base) = match decl.kind() {
            "init_declaration" => (DeclarationKind::Initializer, "init".to_string()),
            "deinit_declaration" => (DeclarationKind::Deinitializer, "deinit".to_string()),
            "subscript_declaration" => (DeclarationKind::Subscript, "subscript".to_string()),
            _ => {
                let kind = if !scope.in_type {
                    DeclarationKind::FunctionFree
                } else if prefix.is_static {
                    DeclarationKind::FunctionMethodStatic
                } else if prefix.is_class {
                    DeclarationKind::FunctionMethodClass
                } else {
                    DeclarationKind::FunctionMethodInstance
                };
                let name = decl
                    .child_by_field_name("name")
                    .map_or("", |n| self.text(&n))
                    .trim_matches('`');
                (kind, name.to_string())
            }
        };

        let name = if kind == DeclarationKind::Deinitializer {
            base
        } else {
            let subscript = kind == DeclarationKind::Subscript;
            let mut cursor = decl.walk();
            let labels: String = decl
                .children(&mut cursor)
                .filter(|c| c.kind() == "parameter")
                .map(|p| format!("{}:", parameter_label(self.text(&p), subscript)))
                .collect();
            format!("{base}({labels})")
        };

        let accessibility = accessibility(&prefix, scope.members.as_ref());
        self.declaration(decl, kind, accessibility).with_name(name)
    }

    fn variable(&self, decl: &Node<'_>, scope: &Scope) -> StructuralNode {
        let prefix = self.prefix(decl);
        let kind = if !scope.in_type {
            DeclarationKind::VarGlobal
        } else if prefix.is_static {
            DeclarationKind::VarStatic
        } else if prefix.is_class {
            DeclarationKind::VarClass
        } else {
            DeclarationKind::VarInstance
        };

        let name = decl
            .child_by_field_name("name")
            .and_then(first_identifier)
            .map(|id| self.text(&id).trim_matches('`').to_string());

        let accessibility = accessibility(&prefix, scope.members.as_ref());
        let node = self.declaration(decl, kind, accessibility);
        match name {
            Some(name) => node.with_name(name),
            None => node,
        }
    }

    fn typealias(&self, decl: &Node<'_>, scope: &Scope) -> StructuralNode {
        let prefix = self.prefix(decl);
        let name = decl
            .child_by_field_name("name")
            .map_or("", |n| self.text(&n))
            .to_string();
        let accessibility = accessibility(&prefix, scope.members.as_ref());
        self.declaration(decl, DeclarationKind::Typealias, accessibility)
            .with_name(name)
    }

    /// One node per element; the first covers the `case` keyword, the rest
    /// start at their own name.
    fn enum_case(&self, entry: &Node<'_>, scope: &Scope) -> Vec<StructuralNode> {
        // (start, end, name) per element
        let mut elements: Vec<(usize, usize, String)> = Vec::new();
        let mut cursor = entry.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                match cursor.field_name() {
                    Some("name") => {
                        let name = self.text(&child).trim_matches('`').to_string();
                        elements.push((child.start_byte(), child.end_byte(), name));
                    }
                    Some("data_contents") => {
                        if let Some(element) = elements.last_mut() {
                            let labels: String = split_parameters(self.text(&child))
                                .into_iter()
                                .map(|p| format!("{}:", parameter_label(p, false)))
                                .collect();
                            element.2 = format!("{}({labels})", element.2);
                            element.1 = child.end_byte();
                        }
                    }
                    Some("raw_value") => {
                        if let Some(element) = elements.last_mut() {
                            element.1 = child.end_byte();
                        }
                    }
                    _ => {}
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        let prefix = self.prefix(entry);
        let accessibility = accessibility(&prefix, scope.cases.as_ref());
        let entry_start = self.start(entry);
        let documentation = self.documentation(entry_start);
        elements
            .into_iter()
            .enumerate()
            .map(|(n, (start, end, name))| {
                let start = if n == 0 { entry_start } else { start };
                self.node(
                    DeclarationKind::EnumElement,
                    start,
                    end,
                    accessibility.clone(),
                    documentation.clone(),
                )
                .with_name(name)
            })
            .collect()
    }
}

fn accessibility(prefix: &Prefix, implied: Option<&Accessibility>) -> Accessibility {
    prefix
        .visibility
        .clone()
        .or_else(|| implied.cloned())
        .unwrap_or(Accessibility::Internal)
}

fn first_identifier(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() == "simple_identifier" {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_identifier)
}

/// Byte indices of `target` outside brackets, parentheses and generic
/// arguments.
fn top_level(text: &str, target: char) -> Vec<usize> {
    let mut depth = 0usize;
    let mut found = Vec::new();
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '>' if !text[..i].ends_with('-') => depth = depth.saturating_sub(1),
            c if c == target && depth == 0 => found.push(i),
            _ => {}
        }
    }
    found
}

/// Splits a parenthesized list such as `(x: Int, Int)` into its entries.
fn split_parameters(list: &str) -> Vec<&str> {
    let inner = list
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(list);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut from = 0;
    for comma in top_level(inner, ',') {
        parts.push(&inner[from..comma]);
        from = comma + 1;
    }
    parts.push(&inner[from..]);
    parts
}

/// The argument label of one parameter: the first name before its `:`, or
/// `_` when there is none. Subscript parameters are unlabeled unless they
/// spell out both an argument label and a parameter name.
fn parameter_label(parameter: &str, subscript: bool) -> &str {
    let Some(&colon) = top_level(parameter, ':').first() else {
        return "_";
    };
    let names: Vec<&str> = parameter[..colon]
        .split_whitespace()
        .map(|n| n.trim_matches('`'))
        .collect();
    let label = if subscript {
        names.get(1).and(names.first())
    } else {
        names.first()
    };
    label.copied().unwrap_or("_")
}
