use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{IndexerError, Result};

/// Configuration for one conversion run.
///
/// Controls the identity stamped into the metadata vertex and the optional
/// embedding of document contents. Every field has a default, so a config
/// file only needs to name the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Absolute project root; document URIs are joined against it.
    pub project_root: String,
    /// Language id stamped on the project vertex, documents and hovers.
    pub language: String,
    /// Whether to embed base64 file contents in document vertices.
    pub embed_contents: bool,
    /// Tool name reported in the metadata vertex.
    pub tool_name: String,
    /// Tool version reported in the metadata vertex.
    pub tool_version: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            project_root: String::new(),
            language: "unknown".to_string(),
            embed_contents: false,
            tool_name: "lsifgen".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Loads a configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<EmitConfig> {
    let contents = fs::read_to_string(path).map_err(|e| IndexerError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: EmitConfig = serde_json::from_str(&contents).map_err(|e| IndexerError::Config {
        message: format!("failed to parse config file '{}': {}", path.display(), e),
    })?;

    Ok(config)
}

/// Saves a configuration to disk using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final
/// location, so a partial write never corrupts the configuration.
pub fn save_config(path: &Path, config: &EmitConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| IndexerError::Config {
                message: format!("failed to create config directory '{}': {}", parent.display(), e),
            })?;
        }
    }

    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| IndexerError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| IndexerError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| IndexerError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}
