//! Rules command implementation.

use std::fmt::Write as _;
use style_lint_rules::all_rules;

/// Runs the rules command.
pub fn run() {
    print!("{}", table());
}

fn table() -> String {
    let mut out = String::from("Available rules:\n\n");
    let _ = writeln!(
        out,
        "{:<28} {:<28} {:<12} {:<9} Description",
        "Identifier", "Name", "Correctable", "Severity"
    );
    let _ = writeln!(out, "{}", "-".repeat(100));

    for rule in all_rules() {
        let correctable = if rule.as_correctable().is_some() {
            "yes"
        } else {
            "no"
        };
        let _ = writeln!(
            out,
            "{:<28} {:<28} {:<12} {:<9} {}",
            rule.identifier(),
            rule.name(),
            correctable,
            rule.severity().to_string(),
            rule.description().description
        );
    }

    out.push_str("\nConfigure rules in style-lint.toml, e.g.:\n");
    out.push_str("  [rules.line_length]\n  warning = 120\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule_once() {
        let table = table();
        for rule in all_rules() {
            assert_eq!(
                table.lines().filter(|l| l.starts_with(rule.identifier())).count(),
                1,
                "{} missing from table",
                rule.identifier()
            );
        }
    }

    #[test]
    fn marks_correctable_rules() {
        let table = table();
        let row = table
            .lines()
            .find(|l| l.starts_with("function_visibility_order"))
            .unwrap();
        assert!(row.contains(" yes "));
        assert!(row.contains("warning"));
    }
}
