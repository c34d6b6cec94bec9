//! Language-agnostic declaration tree.
//!
//! The parser reports declaration kinds and accessibility using the
//! SourceKit string vocabulary (`source.lang.swift.decl.*`). Both map onto
//! closed enums here; strings outside the vocabulary are kept in an
//! `Unrecognized` variant instead of failing.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Declaration category of a [`StructuralNode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// Root node covering a whole file.
    SourceFile,
    /// `class`
    Class,
    /// `struct`
    Struct,
    /// `enum`
    Enum,
    /// `case` inside an enum.
    EnumElement,
    /// `protocol`
    Protocol,
    /// `extension`
    Extension,
    /// `typealias`
    Typealias,
    /// Free function.
    FunctionFree,
    /// Instance method.
    FunctionMethodInstance,
    /// `static func`
    FunctionMethodStatic,
    /// `class func`
    FunctionMethodClass,
    /// `init`
    Initializer,
    /// `deinit`
    Deinitializer,
    /// `subscript`
    Subscript,
    /// Global `var`/`let`.
    VarGlobal,
    /// Instance property.
    VarInstance,
    /// `static var`
    VarStatic,
    /// `class var`
    VarClass,
    /// Local variable.
    VarLocal,
    /// Kind string outside the known vocabulary.
    Unrecognized(String),
}

impl DeclarationKind {
    /// Maps a SourceKit kind string onto a declaration kind.
    #[must_use]
    pub fn from_source_kit(value: &str) -> Self {
        match value {
            "source.lang.swift.sourcefile" => Self::SourceFile,
            "source.lang.swift.decl.class" => Self::Class,
            "source.lang.swift.decl.struct" => Self::Struct,
            "source.lang.swift.decl.enum" => Self::Enum,
            "source.lang.swift.decl.enumelement" => Self::EnumElement,
            "source.lang.swift.decl.protocol" => Self::Protocol,
            "source.lang.swift.decl.extension" => Self::Extension,
            "source.lang.swift.decl.typealias" => Self::Typealias,
            "source.lang.swift.decl.function.free" => Self::FunctionFree,
            "source.lang.swift.decl.function.method.instance" => Self::FunctionMethodInstance,
            "source.lang.swift.decl.function.method.static" => Self::FunctionMethodStatic,
            "source.lang.swift.decl.function.method.class" => Self::FunctionMethodClass,
            "source.lang.swift.decl.function.constructor" => Self::Initializer,
            "source.lang.swift.decl.function.destructor" => Self::Deinitializer,
            "source.lang.swift.decl.function.subscript" => Self::Subscript,
            "source.lang.swift.decl.var.global" => Self::VarGlobal,
            "source.lang.swift.decl.var.instance" => Self::VarInstance,
            "source.lang.swift.decl.var.static" => Self::VarStatic,
            "source.lang.swift.decl.var.class" => Self::VarClass,
            "source.lang.swift.decl.var.local" => Self::VarLocal,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns the SourceKit kind string for this kind.
    #[must_use]
    pub fn as_source_kit(&self) -> &str {
        match self {
            Self::SourceFile => "source.lang.swift.sourcefile",
            Self::Class => "source.lang.swift.decl.class",
            Self::Struct => "source.lang.swift.decl.struct",
            Self::Enum => "source.lang.swift.decl.enum",
            Self::EnumElement => "source.lang.swift.decl.enumelement",
            Self::Protocol => "source.lang.swift.decl.protocol",
            Self::Extension => "source.lang.swift.decl.extension",
            Self::Typealias => "source.lang.swift.decl.typealias",
            Self::FunctionFree => "source.lang.swift.decl.function.free",
            Self::FunctionMethodInstance => "source.lang.swift.decl.function.method.instance",
            Self::FunctionMethodStatic => "source.lang.swift.decl.function.method.static",
            Self::FunctionMethodClass => "source.lang.swift.decl.function.method.class",
            Self::Initializer => "source.lang.swift.decl.function.constructor",
            Self::Deinitializer => "source.lang.swift.decl.function.destructor",
            Self::Subscript => "source.lang.swift.decl.function.subscript",
            Self::VarGlobal => "source.lang.swift.decl.var.global",
            Self::VarInstance => "source.lang.swift.decl.var.instance",
            Self::VarStatic => "source.lang.swift.decl.var.static",
            Self::VarClass => "source.lang.swift.decl.var.class",
            Self::VarLocal => "source.lang.swift.decl.var.local",
            Self::Unrecognized(value) => value,
        }
    }

    /// Returns true for kinds that can carry a documentation comment.
    #[must_use]
    pub fn is_documentable(&self) -> bool {
        !matches!(
            self,
            Self::SourceFile | Self::VarLocal | Self::Unrecognized(_)
        )
    }

    /// Returns true for functions, methods, and initializers.
    #[must_use]
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            Self::FunctionFree
                | Self::FunctionMethodInstance
                | Self::FunctionMethodStatic
                | Self::FunctionMethodClass
                | Self::Initializer
        )
    }

    /// Returns true for declarations whose members can be inherited.
    #[must_use]
    pub fn is_type_like(&self) -> bool {
        matches!(
            self,
            Self::Class | Self::Struct | Self::Enum | Self::Protocol | Self::Extension
        )
    }
}

/// Declared accessibility as reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    /// `open`
    Open,
    /// `public`
    Public,
    /// `internal`, explicit or implicit.
    Internal,
    /// `fileprivate`
    FilePrivate,
    /// `private`
    Private,
    /// No accessibility reported.
    #[default]
    Unspecified,
    /// Accessibility string outside the known vocabulary.
    Unrecognized(String),
}

impl Accessibility {
    /// Maps a SourceKit accessibility string.
    #[must_use]
    pub fn from_source_kit(value: &str) -> Self {
        match value {
            "source.lang.swift.accessibility.open" => Self::Open,
            "source.lang.swift.accessibility.public" => Self::Public,
            "source.lang.swift.accessibility.internal" => Self::Internal,
            "source.lang.swift.accessibility.fileprivate" => Self::FilePrivate,
            "source.lang.swift.accessibility.private" => Self::Private,
            "" => Self::Unspecified,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns the SourceKit accessibility string.
    #[must_use]
    pub fn as_source_kit(&self) -> &str {
        match self {
            Self::Open => "source.lang.swift.accessibility.open",
            Self::Public => "source.lang.swift.accessibility.public",
            Self::Internal => "source.lang.swift.accessibility.internal",
            Self::FilePrivate => "source.lang.swift.accessibility.fileprivate",
            Self::Private => "source.lang.swift.accessibility.private",
            Self::Unspecified => "",
            Self::Unrecognized(value) => value,
        }
    }

    /// Maps a modifier keyword (`public`, `fileprivate`, ...).
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "open" => Some(Self::Open),
            "public" => Some(Self::Public),
            "internal" => Some(Self::Internal),
            "fileprivate" => Some(Self::FilePrivate),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    /// The access-control level this accessibility falls under, if any.
    #[must_use]
    pub fn access_control_level(&self) -> Option<AccessControlLevel> {
        match self {
            Self::Open | Self::Public => Some(AccessControlLevel::Public),
            Self::Internal => Some(AccessControlLevel::Internal),
            Self::FilePrivate | Self::Private => Some(AccessControlLevel::Private),
            Self::Unspecified | Self::Unrecognized(_) => None,
        }
    }
}

/// Access-control levels used in rule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessControlLevel {
    /// `private` and `fileprivate`.
    Private,
    /// `internal`
    Internal,
    /// `public` and `open`.
    Public,
}

impl std::fmt::Display for AccessControlLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Private => write!(f, "private"),
            Self::Internal => write!(f, "internal"),
            Self::Public => write!(f, "public"),
        }
    }
}

impl std::str::FromStr for AccessControlLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" | "fileprivate" => Ok(Self::Private),
            "internal" => Ok(Self::Internal),
            "public" | "open" => Ok(Self::Public),
            other => Err(format!("unknown access control level `{other}`")),
        }
    }
}

/// One declaration in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralNode {
    /// Declaration category.
    pub kind: DeclarationKind,
    /// Declared name, if any.
    pub name: Option<String>,
    /// Byte offset where the declaration starts, modifiers included.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
    /// Declared or implied accessibility.
    pub accessibility: Accessibility,
    /// Attached documentation comment text.
    pub documentation: Option<String>,
    /// Names in the inheritance clause, in order.
    pub inherited_types: Vec<String>,
    /// Nested declarations.
    pub children: Vec<StructuralNode>,
}

impl StructuralNode {
    /// Creates a node with no name, accessibility, or children.
    #[must_use]
    pub fn new(kind: DeclarationKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            name: None,
            offset,
            length,
            accessibility: Accessibility::Unspecified,
            documentation: None,
            inherited_types: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the accessibility.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Attaches a documentation comment.
    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Sets the inherited type names.
    #[must_use]
    pub fn with_inherited_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inherited_types = names.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a child declaration.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Byte range covered by the declaration.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }

    /// Names of the direct children that have one.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|c| c.name.as_deref())
    }

    /// Lazy pre-order traversal starting at this node.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst { stack: vec![self] }
    }
}

/// Pre-order iterator over a [`StructuralNode`] tree.
#[derive(Debug, Clone)]
pub struct DepthFirst<'a> {
    stack: Vec<&'a StructuralNode>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a StructuralNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
