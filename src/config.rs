use serde::Deserialize;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub wrap: WrapConfig,
    pub changelog: ChangelogConfig,
    pub rules: RulesConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WrapConfig {
    /// Column width used when re-wrapping long prose lines.
    pub width: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self { width: 80 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChangelogConfig {
    pub title: String,
    pub intro: String,
    /// Width of the wrapped file lists under each entry.
    pub list_width: usize,
    pub limit: Option<usize>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            title: "Changelog".to_string(),
            intro: "All notable changes to this project are documented in this file.".to_string(),
            list_width: 80,
            limit: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Prefix the agent sees in front of every tool name.
    pub tool_prefix: String,
    /// Location of the tool server checkout, used in documentation links.
    pub server_path: String,
    pub database_path: String,
    /// Directory, relative to the project root, that receives rule files.
    pub rules_dir: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            tool_prefix: "project_tools_".to_string(),
            server_path: ".".to_string(),
            database_path: ".agent/state.db".to_string(),
            rules_dir: ".cursor/rules".to_string(),
        }
    }
}

impl RulesConfig {
    /// Fully qualified tool name as an agent would call it.
    pub fn tool(&self, name: &str) -> String {
        format!("{}{}", self.tool_prefix, name)
    }
}

impl Config {
    /// Load config from a TOML file, or return the compiled defaults if the
    /// file is missing or malformed.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed config");
                    Self::compiled_default()
                }
            },
            Err(_) => Self::compiled_default(),
        }
    }

    /// Load config from a TOML file, reporting parse errors instead of
    /// falling back.
    pub fn load_strict(path: &Path) -> crate::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Config parsed from the bundled `default_config.toml`.
    pub fn compiled_default() -> Self {
        // build.rs rejects a malformed bundled file
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }
}
