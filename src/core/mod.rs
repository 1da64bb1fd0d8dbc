pub mod error;
pub mod export;
pub mod filter;
pub mod mutate;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_util;

use serde::{Deserialize, Serialize};

/// A named, toggleable substring pattern that excludes matching-named nodes
/// from the filtered view.
///
/// Patterns are plain substrings, not globs or regexes: a rule matches when
/// its pattern occurs anywhere in a node's `name`. Matching is case-sensitive
/// and never looks at the full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreRule {
    pub name: String,
    pub pattern: String,
    pub enabled: bool,
}

impl IgnoreRule {
    pub fn new(name: &str, pattern: &str, enabled: bool) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            enabled,
        }
    }

    /// Whether this rule excludes a node with the given name.
    pub fn matches(&self, node_name: &str) -> bool {
        self.enabled && node_name.contains(&self.pattern)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Relative column widths of the tree view, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeColumns {
    pub name: u8,
    pub size: u8,
    pub modified: u8,
}

/// Display settings for the tree view.
///
/// Only `show_files` and `show_hidden_files` affect the filter pipeline; the
/// remaining fields are cosmetic and carried for the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub theme: Theme,
    pub accent_color: String,
    pub show_files: bool,
    pub show_hidden_files: bool,
    pub auto_refresh: bool,
    pub tree_columns: TreeColumns,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            accent_color: "#06C755".to_string(),
            show_files: true,
            show_hidden_files: false,
            auto_refresh: true,
            tree_columns: TreeColumns {
                name: 60,
                size: 20,
                modified: 20,
            },
        }
    }
}

pub use error::CoreError;
pub use search::SearchResult;
pub use tree::{NodeKind, TreeNode};
