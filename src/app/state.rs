//! Defines the central, mutable state of the application.

use std::path::PathBuf;

use super::bookmarks::BookmarkStore;
use super::hotkeys::HotkeyRegistry;
use crate::config::AppConfig;
use crate::core::{SearchResult, TreeNode};

/// Holds the complete state of one running engine.
///
/// Constructed at startup, owned exclusively by the engine for its lifetime,
/// torn down at shutdown. The interface layer reads derived views and submits
/// operations; it never holds this struct.
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// Where config writes go; `None` means the platform default location.
    pub config_path: Option<PathBuf>,
    /// The absolute path of the currently loaded directory, empty before the
    /// first successful load.
    pub current_path: String,
    /// The raw, unfiltered tree snapshot. The single source of truth; every
    /// visible view derives from it.
    pub root: TreeNode,
    pub bookmarks: BookmarkStore,
    /// The current filename search query.
    pub search_query: String,
    /// Matches for `search_query` over the raw tree, in pre-order.
    pub search_results: Vec<SearchResult>,
    pub hotkeys: HotkeyRegistry,
}

impl Default for AppState {
    /// Creates a default `AppState`, loading the configuration from disk.
    fn default() -> Self {
        Self::with_config(AppConfig::load().unwrap_or_default())
    }
}

impl AppState {
    /// Creates a state container around an explicit configuration, skipping
    /// the on-disk lookup.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            config_path: None,
            current_path: String::new(),
            root: TreeNode::empty_root(),
            bookmarks: BookmarkStore::new(),
            search_query: String::new(),
            search_results: Vec::new(),
            hotkeys: HotkeyRegistry::with_defaults(),
        }
    }
}
