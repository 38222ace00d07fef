//! Application Configuration
//!
//! JSON settings file. A missing or empty file is created with defaults; an
//! unreadable one falls back to defaults without being overwritten.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{is_valid_name_format, DEFAULT_LIST_NAME_FORMAT};
use crate::workflow::WorkflowSettings;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "MENU_PLANNER_CONFIG";
/// Config file used when neither an argument nor the env var is given
pub const DEFAULT_CONFIG_FILE: &str = "menu-planner.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    /// Level filter for the logger (trace, debug, info, warn, error)
    pub log_level: String,
    /// chrono format for the default shopping list name
    pub list_name_format: String,
    pub preview_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = WorkflowSettings::default();
        Self {
            db_path: PathBuf::from("data/menu_planner.db"),
            log_dir: PathBuf::from("logs"),
            log_level: "info".to_string(),
            list_name_format: settings.list_name_format,
            preview_limit: settings.preview_limit,
        }
    }
}

impl AppConfig {
    /// Load the config at `path`, writing defaults when the file does not exist yet
    pub async fn load(path: &Path) -> Result<Self, String> {
        match tokio::fs::read(path).await {
            Ok(bytes) if !bytes.is_empty() => match serde_json::from_slice::<AppConfig>(&bytes) {
                Ok(mut config) => {
                    config.sanitize();
                    Ok(config)
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                    Ok(Self::default())
                }
            },
            _ => {
                let config = Self::default();
                config.save(path).await?;
                Ok(config)
            }
        }
    }

    /// Replace values that would fail at use time with their defaults
    fn sanitize(&mut self) {
        if !is_valid_name_format(&self.list_name_format) {
            log::warn!(
                "Invalid list_name_format '{}' in config, using '{}'",
                self.list_name_format,
                DEFAULT_LIST_NAME_FORMAT
            );
            self.list_name_format = DEFAULT_LIST_NAME_FORMAT.to_string();
        }
    }

    pub async fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }

    /// Config path: first CLI argument, then the env var, then the default file
    pub fn resolve_path(arg: Option<String>) -> PathBuf {
        arg.or_else(|| std::env::var(CONFIG_ENV).ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Paths in the config are relative to the config file's directory
    pub fn resolve_relative(&mut self, config_path: &Path) {
        let base = match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => return,
        };
        if self.db_path.is_relative() && self.db_path.as_os_str() != ":memory:" {
            self.db_path = base.join(&self.db_path);
        }
        if self.log_dir.is_relative() {
            self.log_dir = base.join(&self.log_dir);
        }
    }

    pub fn workflow_settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            list_name_format: self.list_name_format.clone(),
            preview_limit: self.preview_limit,
        }
    }
}
