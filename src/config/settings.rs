use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;
use crate::core::error::CoreError;
use crate::core::IgnoreRule;

const APP_NAME: &str = "FolderLens";
const CONFIG_FILE: &str = "config.json";

/// Conventional filename for ignore-rule export and import.
pub const IGNORE_RULES_FILE: &str = "ignore-rules.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "folderlens", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the application configuration, creating a default file on first run.
///
/// A corrupted or unparseable file logs a warning and falls back to the
/// default configuration instead of crashing. `path_override` points tests
/// at a throwaway location.
pub fn load_config(path_override: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path_override {
        Some(path) => path,
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = AppConfig::default();
        save_config(&default_config, Some(config_path))?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)?;
    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            Ok(AppConfig::default())
        }
    }
}

/// Saves the provided configuration, creating the directory if necessary.
pub fn save_config(config: &AppConfig, path_override: Option<PathBuf>) -> Result<()> {
    let config_path = match path_override {
        Some(path) => path,
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::info!("Created config directory: {:?}", parent);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::debug!("Saved config to {:?}", config_path);

    Ok(())
}

/// Exports the ignore rules to a user-specified JSON file.
pub fn export_ignore_rules(rules: &[IgnoreRule], export_path: &Path) -> Result<()> {
    let rules_json = serde_json::to_string_pretty(rules)?;
    fs::write(export_path, rules_json)?;
    tracing::info!("Exported {} ignore rules to {:?}", rules.len(), export_path);
    Ok(())
}

/// Imports ignore rules from a JSON file.
///
/// The top-level value must be an array; anything else rejects the import
/// whole so the caller keeps its prior rules. There is no partial apply.
pub fn import_ignore_rules(import_path: &Path) -> Result<Vec<IgnoreRule>, CoreError> {
    let content = fs::read_to_string(import_path)
        .map_err(|err| CoreError::Io(err, import_path.to_path_buf()))?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    if !value.is_array() {
        return Err(CoreError::MalformedRuleImport(
            "top-level value is not an array".to_string(),
        ));
    }
    let rules: Vec<IgnoreRule> = serde_json::from_value(value)?;
    tracing::info!("Imported {} ignore rules from {:?}", rules.len(), import_path);
    Ok(rules)
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.folderlens.FolderLens/
// Linux:   ~/.config/com.folderlens.FolderLens/
// Windows: %APPDATA%/com.folderlens.FolderLens/config/
