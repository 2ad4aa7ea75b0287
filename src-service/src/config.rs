//! Configuration management for SignBridge.
//!
//! Handles loading and saving service configuration to platform-standard
//! config directories:
//! - Linux: `~/.config/signbridge/config.json`
//! - macOS: `~/Library/Application Support/signbridge/config.json`
//! - Windows: `%APPDATA%\signbridge\config.json`

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use signbridge_common::DatasetConfig;

/// Service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Root of the word -> clip dataset tree.
    #[serde(default = "default_dataset_dir")]
    pub dataset_dir: PathBuf,
    /// Where generated clip-sequence videos are written.
    #[serde(default = "default_generated_dir")]
    pub generated_dir: PathBuf,
    /// Where published viewer pages live.
    #[serde(default = "default_published_dir")]
    pub published_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dataset_dir: default_dataset_dir(),
            generated_dir: default_generated_dir(),
            published_dir: default_published_dir(),
        }
    }
}

impl ServiceConfig {
    /// The configuration as exposed to clients.
    pub fn client_view(&self) -> DatasetConfig {
        DatasetConfig {
            dataset_dir: self.dataset_dir.display().to_string(),
            generated_dir: self.generated_dir.display().to_string(),
            published_dir: self.published_dir.display().to_string(),
        }
    }
}

/// Base directory for the dataset and media directories when no config
/// exists yet.
fn data_root() -> PathBuf {
    ProjectDirs::from("", "", "signbridge")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_dataset_dir() -> PathBuf {
    data_root().join("isl_dataset")
}

fn default_generated_dir() -> PathBuf {
    data_root().join("generated_videos")
}

fn default_published_dir() -> PathBuf {
    data_root().join("published_videos")
}

/// Get the path to the config file.
fn get_config_path() -> Result<PathBuf, String> {
    let proj_dirs =
        ProjectDirs::from("", "", "signbridge").ok_or("Could not determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.json"))
}

/// Load configuration from disk.
/// Returns default config if the file doesn't exist or is invalid.
pub fn load_config() -> ServiceConfig {
    let path = match get_config_path() {
        Ok(p) => p,
        Err(_) => return ServiceConfig::default(),
    };

    match fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => ServiceConfig::default(),
    }
}

/// Save configuration to disk.
pub fn save_config(config: &ServiceConfig) -> Result<(), String> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create config dir: {}", e))?;
    }

    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(&path, contents).map_err(|e| format!("Failed to write config: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directories_share_a_root() {
        let config = ServiceConfig::default();
        assert_eq!(config.dataset_dir.parent(), config.generated_dir.parent());
        assert_eq!(config.generated_dir.parent(), config.published_dir.parent());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"dataset_dir": "/srv/isl_dataset"}"#).unwrap();
        assert_eq!(config.dataset_dir, PathBuf::from("/srv/isl_dataset"));
        assert_eq!(config.generated_dir, default_generated_dir());
    }

    #[test]
    fn test_client_view_round_trips_paths() {
        let config = ServiceConfig {
            dataset_dir: PathBuf::from("/srv/isl_dataset"),
            generated_dir: PathBuf::from("/srv/generated"),
            published_dir: PathBuf::from("/srv/published"),
        };
        let view = config.client_view();
        assert_eq!(view.dataset_dir, "/srv/isl_dataset");
        assert_eq!(view.published_dir, "/srv/published");
    }
}
