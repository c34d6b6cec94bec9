//! Rule requiring documentation comments on visible declarations.
//!
//! # Rationale
//!
//! Declarations other modules can see are an API. Without a doc comment the
//! only way to learn how to use one is to read its implementation.
//!
//! # Detected Patterns
//!
//! - `public func a() {}` with no `///` or `/** */` comment directly above
//! - the same with only a regular `//` or `/* */` comment above
//!
//! # Good Patterns
//!
//! ```swift
//! /// Adds one.
//! public func a() {}
//! ```
//!
//! A member that implements something declared by a type it inherits from
//! (a protocol requirement, an overridden method) is covered by that
//! declaration's documentation and is not reported. Its own members still
//! are.
//!
//! # Configuration
//!
//! ```toml
//! [rules.missing_docs]
//! warning = ["public"]
//! error = ["internal"]
//! ```

use style_lint_core::{
    escalate, AccessControlLevel, ConfigError, LintFile, Location, Rule, RuleConfig, RuleContext,
    RuleDescription, RuleParameter, Severity, StructuralNode, StyleViolation,
};

/// Rule identifier for missing-docs.
pub const IDENTIFIER: &str = "missing_docs";

/// Rule name for missing-docs.
pub const NAME: &str = "Missing Docs";

static DESCRIPTION: RuleDescription = RuleDescription {
    identifier: IDENTIFIER,
    name: NAME,
    description: "Public declarations should be documented.",
    non_triggering_examples: &[
        // public, documented using /// docs
        "/// docs\npublic func a() {}\n",
        // public, documented using /** docs */
        "/** docs */\npublic func a() {}\n",
        // internal (implicit), undocumented
        "func a() {}\n",
        // internal (explicit), undocumented
        "internal func a() {}\n",
        // private, undocumented
        "private func a() {}\n",
        // internal (implicit), undocumented
        "// regular comment\nfunc a() {}\n",
        // internal (implicit), undocumented
        "/* regular comment */\nfunc a() {}\n",
        // protocol member is documented, but inherited member is not
        "/// docs\npublic protocol A {\n/// docs\nvar b: Int { get } }\n/// docs\npublic struct C: A {\npublic let b: Int\n}",
    ],
    triggering_examples: &[
        // public, undocumented
        "public func a() {}\n",
        // public, undocumented
        "// regular comment\npublic func a() {}\n",
        // public, undocumented
        "/* regular comment */\npublic func a() {}\n",
        // protocol member and inherited member are both undocumented
        "/// docs\npublic protocol A {\n// no docs\nvar b: Int { get } }\n/// docs\npublic struct C: A {\n\npublic let b: Int\n}",
    ],
    corrections: &[],
};

/// Requires documentation on declarations at the configured access levels.
#[derive(Debug, Clone)]
pub struct MissingDocs {
    parameters: Vec<RuleParameter<AccessControlLevel>>,
}

impl Default for MissingDocs {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingDocs {
    /// Creates the rule checking public declarations at warning level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parameters: vec![RuleParameter::new(Severity::Warning, AccessControlLevel::Public)],
        }
    }

    /// Replaces the checked levels.
    #[must_use]
    pub fn levels(mut self, parameters: Vec<RuleParameter<AccessControlLevel>>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Configured levels and their severities.
    #[must_use]
    pub fn parameters(&self) -> &[RuleParameter<AccessControlLevel>] {
        &self.parameters
    }

    fn collect(
        &self,
        file: &LintFile,
        ctx: &RuleContext<'_>,
        node: &StructuralNode,
        skipping: &[&str],
        out: &mut Vec<StyleViolation>,
    ) {
        let inherited = ctx.declarations.inherited_members(node);
        for child in &node.children {
            self.collect(file, ctx, child, &inherited, out);
        }

        if node.name.as_deref().is_some_and(|name| skipping.contains(&name)) {
            return;
        }
        if !node.kind.is_documentable() || node.documentation.is_some() {
            return;
        }
        let Some(level) = node.accessibility.access_control_level() else {
            return;
        };
        if let Some(parameter) = escalate(&self.parameters, |acl| *acl == level) {
            out.push(StyleViolation::new(
                &DESCRIPTION,
                parameter.severity,
                Location::at_offset(file, node.offset),
                format!("{} declarations should be documented.", capitalized(level)),
            ));
        }
    }
}

fn capitalized(level: AccessControlLevel) -> &'static str {
    match level {
        AccessControlLevel::Private => "Private",
        AccessControlLevel::Internal => "Internal",
        AccessControlLevel::Public => "Public",
    }
}

fn parse_levels(
    config: &RuleConfig,
    key: &str,
    severity: Severity,
) -> Result<Vec<RuleParameter<AccessControlLevel>>, ConfigError> {
    let Some(values) = config.get_str_array(IDENTIFIER, key)? else {
        return Ok(Vec::new());
    };
    values
        .iter()
        .map(|value| {
            value
                .parse::<AccessControlLevel>()
                .map(|level| RuleParameter::new(severity, level))
                .map_err(|message| ConfigError::invalid(IDENTIFIER, key, message))
        })
        .collect()
}

impl Rule for MissingDocs {
    fn description(&self) -> &'static RuleDescription {
        &DESCRIPTION
    }

    fn severity(&self) -> Severity {
        self.parameters
            .first()
            .map_or(Severity::Warning, |p| p.severity)
    }

    fn configure(&mut self, config: &RuleConfig) -> Result<(), ConfigError> {
        config.reject_unknown(IDENTIFIER, &["warning", "error"])?;

        let mut parameters = parse_levels(config, "warning", Severity::Warning)?;
        parameters.extend(parse_levels(config, "error", Severity::Error)?);
        if config.options.contains_key("warning") || config.options.contains_key("error") {
            self.parameters = parameters;
        }
        if let Some(severity) = config.severity {
            for parameter in &mut self.parameters {
                parameter.severity = severity;
            }
        }
        Ok(())
    }

    fn validate(&self, file: &LintFile, ctx: &RuleContext<'_>) -> Vec<StyleViolation> {
        let Some(root) = file.structure() else {
            return Vec::new();
        };
        let mut violations = Vec::new();
        self.collect(file, ctx, root, &[], &mut violations);
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use style_lint_core::{index_for_file, Position};

    fn check_with(rule: &MissingDocs, code: &str) -> Vec<StyleViolation> {
        let file = LintFile::new(code, style_lint_syntax::parser());
        let index = index_for_file(&file);
        rule.validate(&file, &RuleContext::new(&index))
    }

    fn check_code(code: &str) -> Vec<StyleViolation> {
        check_with(&MissingDocs::new(), code)
    }

    fn offsets(violations: &[StyleViolation]) -> Vec<usize> {
        violations
            .iter()
            .map(|v| match v.location().position {
                Position::Offset(o) | Position::Line(o) => o,
            })
            .collect()
    }

    #[test]
    fn test_documented_public_function_is_clean() {
        assert!(check_code("/// docs\npublic func a() {}\n").is_empty());
        assert!(check_code("/** docs */\npublic func a() {}\n").is_empty());
    }

    #[test]
    fn test_detects_undocumented_public_function() {
        let violations = check_code("// regular comment\npublic func a() {}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(offsets(&violations), vec![19]);
        assert_eq!(violations[0].reason(), "Public declarations should be documented.");
    }

    #[test]
    fn test_inherited_member_is_skipped() {
        let documented_requirement = "/// docs\npublic protocol A {\n/// docs\nvar b: Int { get } }\n/// docs\npublic struct C: A {\npublic let b: Int\n}";
        assert!(check_code(documented_requirement).is_empty());

        let undocumented_requirement = "/// docs\npublic protocol A {\n// no docs\nvar b: Int { get } }\n/// docs\npublic struct C: A {\n\npublic let b: Int\n}";
        let violations = check_code(undocumented_requirement);
        // Only the protocol requirement is reported.
        assert_eq!(violations.len(), 1);
        assert_eq!(offsets(&violations), vec![40]);
    }

    #[test]
    fn test_children_are_reported_before_parent() {
        let violations = check_code("public struct S {\npublic func f() {}\n}\n");
        assert_eq!(offsets(&violations), vec![18, 0]);
    }

    #[test]
    fn test_skipped_member_still_has_its_members_checked() {
        let code = "/// d\npublic class Base {\n/// d\npublic class Inner {}\n}\n\
                    /// d\npublic class Derived: Base {\npublic class Inner {\npublic func f() {}\n}\n}\n";
        let violations = check_code(code);
        assert_eq!(violations.len(), 1);
        let f = code.find("public func f").expect("fixture");
        assert_eq!(offsets(&violations), vec![f]);
    }

    #[test]
    fn test_unknown_inherited_type_skips_nothing() {
        let violations = check_code("/// d\npublic struct C: Unknown {\npublic let b: Int\n}\n");
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_severity_follows_matching_level() {
        let rule = MissingDocs::new().levels(vec![
            RuleParameter::new(Severity::Warning, AccessControlLevel::Public),
            RuleParameter::new(Severity::Error, AccessControlLevel::Internal),
        ]);
        let violations = check_with(&rule, "public func a() {}\nfunc b() {}\nprivate func c() {}\n");
        let severities: Vec<Severity> = violations.iter().map(StyleViolation::severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
    }

    #[test]
    fn test_open_counts_as_public() {
        assert_eq!(check_code("open class K {}\n").len(), 1);
    }

    #[test]
    fn test_configure_levels() {
        let config = style_lint_core::Config::parse(
            "[rules.missing_docs]\nwarning = [\"public\", \"open\"]\nerror = [\"internal\"]\n",
        )
        .expect("parse");
        let mut rule = MissingDocs::new();
        rule.configure(&config.rules[IDENTIFIER]).expect("configure");
        assert_eq!(
            rule.parameters(),
            [
                RuleParameter::new(Severity::Warning, AccessControlLevel::Public),
                RuleParameter::new(Severity::Warning, AccessControlLevel::Public),
                RuleParameter::new(Severity::Error, AccessControlLevel::Internal),
            ]
        );

        let bad = style_lint_core::Config::parse("[rules.missing_docs]\nwarning = [\"protected\"]\n")
            .expect("parse");
        let err = MissingDocs::new()
            .configure(&bad.rules[IDENTIFIER])
            .unwrap_err();
        assert!(err.to_string().contains("protected"));
    }
}
