//! Setup configuration module.
//!
//! Handles loading and validating the optional `setup.toml` in the template
//! root. Every option has a default, so the file only needs the values you
//! want to change. Command-line flags override whatever the file says.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "bazaar-starter"  # Copy destination, relative to the template
//! in_place = false               # Customize the template itself instead
//! keep_sections = false          # Keep pages-sections of other homepages
//!
//! [copy]
//! exclude = ["node_modules", ".next", ".git"]  # Never copied
//! ```
//!
//! The homepage catalog is not configurable here: it describes how the
//! template is laid out and ships with the binary.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the template root.
pub const CONFIG_FILENAME: &str = "setup.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Setup configuration loaded from `setup.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    /// Where copy mode writes the customized project, relative to the
    /// template root unless absolute.
    pub output_dir: PathBuf,
    /// Customize the template directory itself.
    pub in_place: bool,
    /// Keep `src/pages-sections/*` of non-selected homepages.
    pub keep_sections: bool,
    /// Template copy settings.
    pub copy: CopyConfig,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("bazaar-starter"),
            in_place: false,
            keep_sections: false,
            copy: CopyConfig::default(),
        }
    }
}

/// Template copy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    /// File or directory names skipped wherever they appear in the tree.
    pub exclude: Vec<String>,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            exclude: vec![
                "node_modules".to_string(),
                ".next".to_string(),
                ".git".to_string(),
            ],
        }
    }
}

impl SetupConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self
            .output_dir
            .components()
            .all(|c| matches!(c, Component::CurDir))
        {
            return Err(ConfigError::Validation(
                "output_dir must not be the template root; use in_place instead".into(),
            ));
        }
        if self.copy.exclude.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "copy.exclude entries must not be empty".into(),
            ));
        }
        if self.copy.exclude.iter().any(|e| e.contains(['/', '\\'])) {
            return Err(ConfigError::Validation(
                "copy.exclude entries are single names, not paths".into(),
            ));
        }
        Ok(())
    }

    /// Copy destination resolved against the template root.
    pub fn output_path(&self, template_root: &Path) -> PathBuf {
        template_root.join(&self.output_dir)
    }
}

/// Load `setup.toml` from the template root.
///
/// Returns the defaults when no file exists. Returns `Err` if the file exists
/// but is not valid TOML, has unknown keys, or fails validation.
pub fn load_config(root: &Path) -> Result<SetupConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(SetupConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SetupConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented stock `setup.toml` with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r##"# homepage-setup configuration
# =============================
# Place this file as setup.toml in the template root.
# All options are optional - defaults are shown below.
# Unknown keys will cause an error.

# Directory the customized project is written to (copy mode).
# Relative paths are resolved against the template root. If the directory
# already exists, the new files are merged into it, replacing files with the
# same name.
output_dir = "bazaar-starter"

# Customize the template directory itself instead of a copy.
# Non-selected homepages are deleted from the template. There is no undo.
in_place = false

# Keep src/pages-sections/* of the homepages that were not selected.
# Their routes under src/app are still removed.
keep_sections = false

# ---------------------------------------------------------------------------
# Template copy
# ---------------------------------------------------------------------------
[copy]
# File and directory names never copied, wherever they appear in the tree.
exclude = ["node_modules", ".next", ".git"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SetupConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("bazaar-starter"));
        assert!(!config.in_place);
        assert!(!config.keep_sections);
        assert_eq!(config.copy.exclude, vec!["node_modules", ".next", ".git"]);
    }

    #[test]
    fn parse_partial_config() {
        let config: SetupConfig = toml::from_str("keep_sections = true\n").unwrap();
        assert!(config.keep_sections);
        // Defaults preserved
        assert_eq!(config.output_dir, PathBuf::from("bazaar-starter"));
        assert_eq!(config.copy.exclude.len(), 3);
    }

    #[test]
    fn parse_copy_section() {
        let toml = r#"
[copy]
exclude = ["node_modules", "coverage"]
"#;
        let config: SetupConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.copy.exclude, vec!["node_modules", "coverage"]);
    }

    #[test]
    fn stock_config_matches_defaults() {
        let config: SetupConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SetupConfig::default());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), SetupConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "output_dir = \"../shop\"\nin_place = false\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("../shop"));
        assert_eq!(config.output_path(tmp.path()), tmp.path().join("../shop"));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SetupConfig, _> = toml::from_str("output = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn catalog_section_rejected() {
        let toml = r#"
[catalog]
fashion-1 = "(layout-1)"
"#;
        let result: Result<SetupConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<SetupConfig, _> = toml::from_str("[copy]\ninclude = []\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_ok() {
        assert!(SetupConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_output_dir() {
        let config = SetupConfig {
            output_dir: PathBuf::new(),
            ..SetupConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_output_dir_is_template_root() {
        let config = SetupConfig {
            output_dir: PathBuf::from("./."),
            ..SetupConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_exclude_entries() {
        let mut config = SetupConfig::default();
        config.copy.exclude.push(" ".into());
        assert!(config.validate().is_err());

        let mut config = SetupConfig::default();
        config.copy.exclude.push("src/app".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_error_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "output_dir = \".\"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}
