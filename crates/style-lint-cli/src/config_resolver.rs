//! Per-path configuration resolution with global fallback.
//!
//! Every linted path is resolved on its own, in this order:
//!
//! 1. `--config` flag (explicit path, shared by all paths)
//! 2. The nearest `style-lint.toml` or `.style-lint.toml` in the path's
//!    directory or one of its ancestors
//! 3. `~/.style-lint/config.toml` (global fallback)
//! 4. No config found → defaults
//!
//! Paths that resolve to the same file are linted together under it.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use style_lint_core::Config;

/// Where a configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found next to the linted path or in one of its ancestors.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.style-lint/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Linted paths that share one configuration.
#[derive(Debug)]
pub struct ConfigGroup {
    /// Where the configuration came from.
    pub source: ConfigSource,
    /// The loaded configuration.
    pub config: Config,
    /// Paths, in command-line order, linted under it.
    pub paths: Vec<PathBuf>,
}

/// Project-level config file names, checked in order within a directory.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["style-lint.toml", ".style-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Finds and loads the configuration that governs each linted path.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    explicit: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl ConfigResolver {
    /// Creates a resolver honoring an optional `--config` path.
    #[must_use]
    pub fn new(explicit: Option<&Path>) -> Self {
        Self::with_global_dir(explicit, global_config_dir())
    }

    /// Testable core: accepts `global_dir` as parameter to avoid env var races.
    fn with_global_dir(explicit: Option<&Path>, global_dir: Option<PathBuf>) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            global_dir,
        }
    }

    /// Locates the configuration for `target`, a file or directory.
    #[must_use]
    pub fn locate(&self, target: &Path) -> ConfigSource {
        if let Some(p) = &self.explicit {
            return ConfigSource::Explicit(p.clone());
        }

        let start = search_start(target);
        for dir in start.ancestors() {
            for name in PROJECT_CONFIG_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    tracing::debug!(
                        "Found project config for {}: {}",
                        target.display(),
                        candidate.display()
                    );
                    return ConfigSource::Project(candidate);
                }
            }
        }

        if let Some(dir) = &self.global_dir {
            let candidate = dir.join(GLOBAL_CONFIG_NAME);
            if candidate.is_file() {
                tracing::debug!("Found global config: {}", candidate.display());
                return ConfigSource::Global(candidate);
            }
        }

        ConfigSource::Default
    }

    /// Loads the configuration `source` points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config.
    pub fn load(&self, source: &ConfigSource) -> Result<Config> {
        let Some(path) = source.path() else {
            return Ok(Config::default());
        };
        if matches!(source, ConfigSource::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Groups `paths` by the configuration governing each, loading every
    /// distinct configuration once. Groups keep first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error if any resolved configuration fails to load.
    pub fn resolve(&self, paths: &[PathBuf]) -> Result<Vec<ConfigGroup>> {
        let mut located: Vec<(ConfigSource, Vec<PathBuf>)> = Vec::new();
        for path in paths {
            let source = self.locate(path);
            match located.iter_mut().find(|(s, _)| *s == source) {
                Some((_, members)) => members.push(path.clone()),
                None => located.push((source, vec![path.clone()])),
            }
        }

        located
            .into_iter()
            .map(|(source, paths)| {
                let config = self.load(&source)?;
                Ok(ConfigGroup {
                    source,
                    config,
                    paths,
                })
            })
            .collect()
    }
}

/// Directory where the upward search for `target` begins, made absolute so
/// the walk reaches the real ancestors of relative paths.
fn search_start(target: &Path) -> PathBuf {
    let dir = if target.is_dir() {
        target
    } else {
        target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    };
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

/// Returns the global config directory path.
///
/// Resolution: `$STYLE_LINT_CONFIG_DIR` > `~/.style-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("STYLE_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".style-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolver(global: Option<&Path>) -> ConfigResolver {
        ConfigResolver::with_global_dir(None, global.map(Path::to_path_buf))
    }

    fn canonical(path: PathBuf) -> PathBuf {
        path.canonicalize().unwrap()
    }

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();
        fs::write(tmp.path().join("style-lint.toml"), "").unwrap();

        let resolver = ConfigResolver::with_global_dir(Some(&explicit), None);
        assert_eq!(resolver.locate(tmp.path()), ConfigSource::Explicit(explicit));
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("style-lint.toml"), "").unwrap();
        fs::write(tmp.path().join(".style-lint.toml"), "").unwrap();

        assert_eq!(
            resolver(None).locate(tmp.path()),
            ConfigSource::Project(canonical(tmp.path().join("style-lint.toml")))
        );
    }

    #[test]
    fn nearest_ancestor_config_wins() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("App/Sources/Models");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("style-lint.toml"), "").unwrap();
        fs::write(tmp.path().join("App/.style-lint.toml"), "").unwrap();
        let file = nested.join("User.swift");
        fs::write(&file, "struct User {}\n").unwrap();

        let app_config = canonical(tmp.path().join("App/.style-lint.toml"));
        assert_eq!(
            resolver(None).locate(&file),
            ConfigSource::Project(app_config.clone())
        );
        assert_eq!(
            resolver(None).locate(&nested),
            ConfigSource::Project(app_config)
        );
        assert_eq!(
            resolver(None).locate(tmp.path()),
            ConfigSource::Project(canonical(tmp.path().join("style-lint.toml")))
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        assert_eq!(
            resolver(Some(global.path())).locate(project.path()),
            ConfigSource::Global(global.path().join("config.toml"))
        );
    }

    #[test]
    fn no_config_anywhere_returns_default() {
        let project = TempDir::new().unwrap();
        let source = resolver(None).locate(project.path());
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
    }

    #[test]
    fn load_reads_and_validates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("style-lint.toml");
        fs::write(&path, "disabled_rules = [\"missing_docs\"]\n").unwrap();
        let resolver = resolver(None);
        let config = resolver.load(&ConfigSource::Project(path.clone())).unwrap();
        assert!(!config.is_rule_enabled("missing_docs"));

        fs::write(&path, "unknown_key = 1\n").unwrap();
        let err = resolver.load(&ConfigSource::Project(path)).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load config"));

        assert!(resolver.load(&ConfigSource::Default).is_ok());
    }

    #[test]
    fn paths_are_grouped_by_their_config() {
        let tmp = TempDir::new().unwrap();
        for dir in ["App", "Kit"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
        }
        fs::write(
            tmp.path().join("App/style-lint.toml"),
            "disabled_rules = [\"line_length\"]\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("Kit/style-lint.toml"),
            "disabled_rules = [\"missing_docs\"]\n",
        )
        .unwrap();
        fs::write(tmp.path().join("App/Extra.swift"), "").unwrap();

        let paths = vec![
            tmp.path().join("App"),
            tmp.path().join("Kit"),
            tmp.path().join("App/Extra.swift"),
        ];
        let groups = resolver(None).resolve(&paths).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].paths, vec![paths[0].clone(), paths[2].clone()]);
        assert!(!groups[0].config.is_rule_enabled("line_length"));
        assert_eq!(groups[1].paths, vec![paths[1].clone()]);
        assert!(!groups[1].config.is_rule_enabled("missing_docs"));
    }

    #[test]
    fn broken_config_fails_resolution() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("style-lint.toml"), "disabled_rules = 3\n").unwrap();
        let err = resolver(None)
            .resolve(&[tmp.path().to_path_buf()])
            .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load config"));
    }
}
