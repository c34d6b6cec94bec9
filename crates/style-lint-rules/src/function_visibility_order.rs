//! Rule requiring the visibility modifier to come first.
//!
//! # Rationale
//!
//! Reading a declaration left to right, its visibility is the first thing a
//! reviewer wants to know. Keeping it in front also makes declarations of
//! the same level line up.
//!
//! # Detected Patterns
//!
//! - `override public func x()`
//! - `required internal init()`
//!
//! # Good Patterns
//!
//! ```swift
//! public override func x()
//! fileprivate required init()
//! ```
//!
//! Setter-scoped levels such as `private(set)` are not visibility modifiers
//! here. When anything other than a modifier sits between the first and last
//! modifier (an attribute or a comment), the declaration is reported but left
//! as written.

use std::ops::Range;
use style_lint_core::{
    ConfigError, CorrectableRule, Edit, LintFile, Location, Rule, RuleConfig, RuleContext,
    RuleDescription, Severity, StyleViolation, Token, TokenKind,
};
use tracing::debug;

/// Rule identifier for function-visibility-order.
pub const IDENTIFIER: &str = "function_visibility_order";

/// Rule name for function-visibility-order.
pub const NAME: &str = "Function Visibility Order";

const VISIBILITIES: &[&str] = &["open", "public", "internal", "fileprivate", "private"];

const OTHER_MODIFIERS: &[&str] = &[
    "override",
    "required",
    "convenience",
    "final",
    "static",
    "class",
    "dynamic",
    "mutating",
    "nonmutating",
    "optional",
    "prefix",
    "postfix",
    "infix",
    "nonisolated",
];

static DESCRIPTION: RuleDescription = RuleDescription {
    identifier: IDENTIFIER,
    name: NAME,
    description: "Function visibility should always be the first modifier.",
    non_triggering_examples: &[
        "class A {\n    func x() {}\n}\n",
        "class A {\n    public func x() {}\n}\n",
        "class A {\n    internal func x() {}\n}\n",
        "class A {\n    fileprivate func x() {}\n}\n",
        "class A {\n    private func x() {}\n}\n",
        "class A {\n    override func x() {}\n}\n",
        "class A {\n    public override func x() {}\n}\n",
        "class A {\n    internal override func x() {}\n}\n",
        "class A {\n    fileprivate override func x() {}\n}\n",
        "class A {\n    private override func x() {}\n}\n",
        "class A {\n    init() {}\n}\n",
        "class A {\n    public init() {}\n}\n",
        "class A {\n    internal init() {}\n}\n",
        "class A {\n    fileprivate init() {}\n}\n",
        "class A {\n    private init() {}\n}\n",
        "class A {\n    required init() {}\n}\n",
        "class A {\n    public required init() {}\n}\n",
        "class A {\n    internal required init() {}\n}\n",
        "class A {\n    private required init() {}\n}\n",
        "class A {\n    fileprivate required init() {}\n}\n",
        "class A {\n    override init() {}\n}\n",
        "class A {\n    public override init() {}\n}\n",
        "class A {\n    internal override init() {}\n}\n",
        "class A {\n    private override init() {}\n}\n",
        "class A {\n    fileprivate override init() {}\n}\n",
    ],
    triggering_examples: &[
        "class A {\n    override public func x() {}\n}\n",
        "class A {\n    override internal func x() {}\n}\n",
        "class A {\n    override fileprivate func x() {}\n}\n",
        "class A {\n    override private func x() {}\n}\n",
        "class A {\n    required public init() {}\n}\n",
        "class A {\n    required internal init() {}\n}\n",
        "class A {\n    required private init() {}\n}\n",
        "class A {\n    required fileprivate init() {}\n}\n",
        "class A {\n    override public init() {}\n}\n",
        "class A {\n    override internal init() {}\n}\n",
        "class A {\n    override private init() {}\n}\n",
        "class A {\n    override fileprivate init() {}\n}\n",
    ],
    corrections: &[
        (
            "class A {\n    override public func x() {}\n}\n",
            "class A {\n    public override func x() {}\n}\n",
        ),
        (
            "class A {\n    override internal func x() {}\n}\n",
            "class A {\n    internal override func x() {}\n}\n",
        ),
        (
            "class A {\n    override fileprivate func x() {}\n}\n",
            "class A {\n    fileprivate override func x() {}\n}\n",
        ),
        (
            "class A {\n    override private func x() {}\n}\n",
            "class A {\n    private override func x() {}\n}\n",
        ),
        (
            "class A {\n    required public init() {}\n}\n",
            "class A {\n    public required init() {}\n}\n",
        ),
        (
            "class A {\n    required internal init() {}\n}\n",
            "class A {\n    internal required init() {}\n}\n",
        ),
        (
            "class A {\n    required private init() {}\n}\n",
            "class A {\n    private required init() {}\n}\n",
        ),
        (
            "class A {\n    required fileprivate init() {}\n}\n",
            "class A {\n    fileprivate required init() {}\n}\n",
        ),
        (
            "class A {\n    override public init() {}\n}\n",
            "class A {\n    public override init() {}\n}\n",
        ),
        (
            "class A {\n    override internal init() {}\n}\n",
            "class A {\n    internal override init() {}\n}\n",
        ),
        (
            "class A {\n    override private init() {}\n}\n",
            "class A {\n    private override init() {}\n}\n",
        ),
        (
            "class A {\n    override fileprivate init() {}\n}\n",
            "class A {\n    fileprivate override init() {}\n}\n",
        ),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Visibility,
    Modifier,
    Unrelated,
}

/// A declaration whose visibility is not its first modifier.
struct Misordered {
    offset: usize,
    rewrite: Option<(Range<usize>, String)>,
}

/// Requires visibility to be the first modifier of functions and initializers.
#[derive(Debug, Clone)]
pub struct FunctionVisibilityOrder {
    severity: Severity,
}

impl Default for FunctionVisibilityOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionVisibilityOrder {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn misordered(file: &LintFile) -> Vec<Misordered> {
        let Ok(parsed) = file.parsed() else {
            return Vec::new();
        };
        let text = file.contents();

        parsed
            .structure
            .depth_first()
            .filter(|node| node.kind.is_function_like())
            .filter_map(|node| {
                let tokens = parsed.tokens_in(node.range());
                let keyword = tokens.iter().position(|t| {
                    t.kind == TokenKind::Keyword && matches!(t.text(text), "func" | "init")
                })?;
                check_prefix(&tokens[..keyword], text)
            })
            .collect()
    }
}

fn role(tokens: &[Token], i: usize, text: &str) -> Role {
    let token = &tokens[i];
    if token.kind != TokenKind::Keyword {
        return Role::Unrelated;
    }
    let word = token.text(text);
    if VISIBILITIES.contains(&word) {
        let scoped = tokens
            .get(i + 1)
            .is_some_and(|next| next.kind == TokenKind::Punctuation && next.text(text) == "(");
        if scoped {
            Role::Unrelated
        } else {
            Role::Visibility
        }
    } else if OTHER_MODIFIERS.contains(&word) {
        Role::Modifier
    } else {
        Role::Unrelated
    }
}

fn check_prefix(prefix: &[Token], text: &str) -> Option<Misordered> {
    let roles: Vec<Role> = (0..prefix.len()).map(|i| role(prefix, i, text)).collect();
    let modifiers: Vec<usize> = (0..prefix.len())
        .filter(|&i| roles[i] != Role::Unrelated)
        .collect();

    let visibility = modifiers
        .iter()
        .position(|&i| roles[i] == Role::Visibility)?;
    if visibility == 0 {
        return None;
    }

    let first = modifiers[0];
    let last = modifiers[modifiers.len() - 1];
    let offset = prefix[first].offset;

    if roles[first..=last].contains(&Role::Unrelated) {
        debug!("Not reordering modifiers at {}: span holds other tokens", offset);
        return Some(Misordered {
            offset,
            rewrite: None,
        });
    }

    let visibility_token = modifiers[visibility];
    let replacement = std::iter::once(visibility_token)
        .chain(modifiers.iter().copied().filter(|&i| i != visibility_token))
        .map(|i| prefix[i].text(text))
        .collect::<Vec<_>>()
        .join(" ");

    Some(Misordered {
        offset,
        rewrite: Some((offset..prefix[last].end(), replacement)),
    })
}

impl Rule for FunctionVisibilityOrder {
    fn description(&self) -> &'static RuleDescription {
        &DESCRIPTION
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn configure(&mut self, config: &RuleConfig) -> Result<(), ConfigError> {
        config.reject_unknown(IDENTIFIER, &[])?;
        if let Some(severity) = config.severity {
            self.severity = severity;
        }
        Ok(())
    }

    fn validate(&self, file: &LintFile, _ctx: &RuleContext<'_>) -> Vec<StyleViolation> {
        Self::misordered(file)
            .into_iter()
            .map(|m| {
                StyleViolation::new(
                    &DESCRIPTION,
                    self.severity,
                    Location::at_offset(file, m.offset),
                    "Function visibility should always be the first modifier.",
                )
            })
            .collect()
    }

    fn as_correctable(&self) -> Option<&dyn CorrectableRule> {
        Some(self)
    }
}

impl CorrectableRule for FunctionVisibilityOrder {
    fn violating_edits(&self, file: &LintFile, _ctx: &RuleContext<'_>) -> Vec<Edit> {
        Self::misordered(file)
            .into_iter()
            .filter_map(|m| m.rewrite)
            .map(|(range, replacement)| Edit::new(&DESCRIPTION, range, replacement))
            .collect()
    }
}
