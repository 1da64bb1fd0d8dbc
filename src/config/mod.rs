pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::{DisplaySettings, IgnoreRule};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub ignore_rules: Vec<IgnoreRule>,
    pub settings: DisplaySettings,
    pub last_directory: Option<PathBuf>,
    pub export_directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ignore_rules: default_ignore_rules(),
            settings: DisplaySettings::default(),
            last_directory: None,
            export_directory: dirs::desktop_dir(),
        }
    }
}

/// The stock rule set for fresh installations. `.git` ships disabled so
/// repository folders stay visible until the user opts out.
pub fn default_ignore_rules() -> Vec<IgnoreRule> {
    vec![
        IgnoreRule::new("node_modules", "node_modules", true),
        IgnoreRule::new("git", ".git", false),
        IgnoreRule::new("pycache", "__pycache__", true),
        IgnoreRule::new("dist", "dist", true),
        IgnoreRule::new("build", "build", true),
    ]
}
