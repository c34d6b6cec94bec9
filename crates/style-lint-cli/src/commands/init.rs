//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_NAME: &str = "style-lint.toml";

const DEFAULT_CONFIG: &str = r#"# style-lint configuration

# Rules that should not run
disabled_rules = []

# When set, only these rules run
# only_rules = ["line_length", "missing_docs"]

# Glob patterns of files to lint, relative to the linted directory
# (default: every *.swift file)
# included = ["Sources/**/*.swift"]

# Glob patterns of files to skip
excluded = [
    ".build/**",
    "Pods/**",
    "Carthage/**",
]

[rules.line_length]
# Lines past `warning` are warnings, lines past `error` are errors
warning = 100
error = 200

# [rules.function_visibility_order]
# severity = "error"

[rules.missing_docs]
# Access levels that must be documented, by severity
warning = ["public"]
# error = ["internal"]
"#;

/// Runs the init command, writing the default config into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: style-lint lint");

    Ok(())
}
