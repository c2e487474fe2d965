use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::pattern::NamePattern;
use crate::error::{MkVersionError, Result};

const CONFIG_FILE_NAME: &str = "mkversion.toml";

/// Represents the complete configuration for mkversion.
///
/// Contains the versioning rules handed to the coordinator and the naming
/// patterns tags and series branches are parsed with.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub patterns: PatternsConfig,
}

fn default_trunk_version() -> u32 {
    2
}

/// Returns the default list of fully-qualified trunk branch names.
fn default_trunk_branches() -> Vec<String> {
    vec!["origin/master".to_string(), "origin/main".to_string()]
}

fn default_unknown_version() -> String {
    "unknown".to_string()
}

/// Versioning rules.
///
/// `trunk_version` is the version trunk allocates under; `unknown_version` is
/// printed when no active branch can be found.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    #[serde(default = "default_trunk_version")]
    pub trunk_version: u32,

    #[serde(default = "default_trunk_branches")]
    pub trunk_branches: Vec<String>,

    #[serde(default = "default_unknown_version")]
    pub unknown_version: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            trunk_version: default_trunk_version(),
            trunk_branches: default_trunk_branches(),
            unknown_version: default_unknown_version(),
        }
    }
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_tag_suffix() -> String {
    "GA".to_string()
}

/// Series-branch suffixes accepted by default.
fn default_branch_suffixes() -> Vec<String> {
    vec![".next".to_string()]
}

/// Literal text around the version numbers in tag and branch names.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PatternsConfig {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_tag_suffix")]
    pub tag_suffix: String,

    #[serde(default = "default_branch_suffixes")]
    pub branch_suffixes: Vec<String>,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        PatternsConfig {
            tag_prefix: default_tag_prefix(),
            tag_suffix: default_tag_suffix(),
            branch_suffixes: default_branch_suffixes(),
        }
    }
}

impl PatternsConfig {
    pub fn tag_pattern(&self) -> Result<NamePattern> {
        NamePattern::tag(&self.tag_prefix, &self.tag_suffix)
    }

    pub fn branch_pattern(&self) -> Result<NamePattern> {
        NamePattern::branch(self.branch_suffixes.as_slice())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `mkversion.toml` in current directory
/// 3. `.mkversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if local.exists() {
        read_config_file(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| MkVersionError::config(e.to_string()))
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| MkVersionError::config(format!("Cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.versioning.trunk_version, 2);
        assert_eq!(config.versioning.unknown_version, "unknown");
        assert!(config
            .versioning
            .trunk_branches
            .contains(&"origin/master".to_string()));
        assert_eq!(config.patterns.tag_prefix, "v");
        assert_eq!(config.patterns.tag_suffix, "GA");
        assert_eq!(config.patterns.branch_suffixes, vec![".next".to_string()]);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[versioning]\ntrunk_version = 7\n").unwrap();
        assert_eq!(config.versioning.trunk_version, 7);
        assert_eq!(config.versioning.unknown_version, "unknown");
        assert_eq!(config.patterns, PatternsConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("[versioning\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_empty_branch_suffix_rejected() {
        let patterns = PatternsConfig {
            branch_suffixes: vec![".next".to_string(), String::new()],
            ..PatternsConfig::default()
        };
        assert!(patterns.branch_pattern().is_err());

        let patterns = PatternsConfig {
            branch_suffixes: Vec::new(),
            ..PatternsConfig::default()
        };
        assert!(patterns.branch_pattern().is_err());
    }

    #[test]
    fn test_several_branch_suffixes_from_toml() {
        let config = parse_config(
            "[patterns]\nbranch_suffixes = [\".next\", \".x\", \"-patch\"]\n",
        )
        .unwrap();
        let pattern = config.patterns.branch_pattern().unwrap();
        assert!(pattern.parse("origin/1.8.x").is_some());
        assert!(pattern.parse("origin/1.8-patch").is_some());
        assert!(pattern.parse("origin/1.8.next").is_some());
    }
}
