//! Configuration handling for sweep
//!
//! Read from `<config_dir>/git-sweep/config.toml` unless a path is given.
//! A missing default file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SweepError;

/// Sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sweep-specific settings
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Core sweep settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Extra branch names never swept; `main`, `master` and the checked-out
    /// branch are always protected
    #[serde(default)]
    pub protected_branches: Vec<String>,

    /// git binary to invoke
    #[serde(default = "default_git")]
    pub git: String,
}

fn default_git() -> String {
    "git".to_string()
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            protected_branches: Vec::new(),
            git: default_git(),
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("git-sweep").join("config.toml"))
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, SweepError> {
        toml::from_str(content).map_err(|e| SweepError::Config(e.to_string()))
    }

    /// Load from an explicit path; the file must exist
    pub fn load(path: &Path) -> Result<Self, SweepError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| SweepError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `path` if given, otherwise from the default location when it exists
    pub fn discover(path: Option<&Path>) -> Result<Self, SweepError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.is_file() => {
                tracing::debug!("loading config from {}", default.display());
                Self::load(&default)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::ProtectedBranches;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.sweep.protected_branches.is_empty());
        assert_eq!(config.sweep.git, "git");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::from_toml("[sweep]\n").unwrap(), Config::default());
    }

    #[test]
    fn test_override_protected_branches() {
        let config = Config::from_toml(
            r#"
[sweep]
protected_branches = ["develop", "release"]
"#,
        )
        .unwrap();
        assert_eq!(config.sweep.protected_branches, vec!["develop", "release"]);
        assert_eq!(config.sweep.git, "git");
    }

    #[test]
    fn test_protected_branches_add_to_main_and_master() {
        for content in [
            "[sweep]\nprotected_branches = [\"develop\"]\n",
            "[sweep]\nprotected_branches = []\n",
        ] {
            let config = Config::from_toml(content).unwrap();
            let protected =
                ProtectedBranches::new(config.sweep.protected_branches.iter().cloned(), None);
            assert!(protected.contains("main"));
            assert!(protected.contains("master"));
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_toml("[sweep]\nprotect = [\"main\"]\n").unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let err = Config::discover(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, SweepError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[sweep]\ngit = \"/usr/bin/git\"\n").expect("failed to write config");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.sweep.git, "/usr/bin/git");
        assert!(config.sweep.protected_branches.is_empty());
    }
}
