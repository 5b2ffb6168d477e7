//! Configuration loading and management
//!
//! Handles parsing of `.plotline.toml` files. Configuration replaces the
//! ambient "current backend" state a chat view might otherwise carry:
//! backend selection and endpoint settings are explicit values handed to
//! the interpreter-selection layer.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up next to a project file.
pub const CONFIG_FILE: &str = ".plotline.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat interpreter configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Endpoint settings for model-backed backends
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

/// Which interpreter answers chat commands.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatBackend {
    /// Built-in rule-based grammar
    #[default]
    Rules,
    /// Hosted model endpoint
    Hosted,
    /// Locally served model
    Local,
    /// Caller-configured custom endpoint
    Custom,
}

impl std::fmt::Display for ChatBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChatBackend::Rules => "rules",
            ChatBackend::Hosted => "hosted",
            ChatBackend::Local => "local",
            ChatBackend::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Chat-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Interpreter backend
    #[serde(default)]
    pub backend: ChatBackend,

    /// Maximum suggestions shown while typing (capped at 5)
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

fn default_suggestion_limit() -> usize {
    5
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend: ChatBackend::default(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

/// Endpoint settings for hosted/local/custom backends.
///
/// The core never opens a connection itself; these values are handed to
/// whichever collaborator the caller registers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub api_version: String,
}

impl EndpointConfig {
    /// Whether enough is set for a model-backed backend to be usable.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.model.trim().is_empty()
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `.plotline.toml` from a directory, falling back to defaults
    /// when the file is missing or malformed.
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Load from an explicit path when given, else from the directory
    /// containing `project_path`.
    pub fn load_for_project(config: Option<&PathBuf>, project_path: &Path) -> Self {
        match config {
            Some(path) => Self::load(path).unwrap_or_default(),
            None => {
                let dir = project_path.parent().unwrap_or_else(|| Path::new("."));
                Self::load_from_dir(dir)
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Suggestion cap: configured limit, never above 5.
    pub fn suggestion_limit(&self) -> usize {
        self.chat.suggestion_limit.min(default_suggestion_limit())
    }
}
