//! The engine operation set consumed by the interface layer.
//!
//! `Engine` is the process-wide state container: it exclusively owns the raw
//! tree, the bookmark store, and the hotkey table for its lifetime. The host
//! UI reads derived views (`filtered_tree`, `search_results`, exports) and
//! submits operations; it never reaches into state directly. Everything here
//! is synchronous except `load`/`refresh`, whose only await point is the host
//! provider's directory listing.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use chrono::{DateTime, Utc};

use super::bookmarks::Bookmark;
use super::hotkeys::{Dispatch, HotkeyAction, KeyEvent};
use super::state::AppState;
use crate::config::settings;
use crate::core::error::CoreError;
use crate::core::tree::{NodeKind, TreeNode};
use crate::core::{export, filter, mutate, search};
use crate::core::{DisplaySettings, IgnoreRule, SearchResult, Theme};
use crate::host::{FileSystemProvider, Prompter};

/// Conventional filenames for tree exports.
pub const STRUCTURED_EXPORT_FILE: &str = "file-tree.json";
pub const TEXT_EXPORT_FILE: &str = "file-tree.txt";

pub struct Engine {
    state: AppState,
    fs: Box<dyn FileSystemProvider>,
}

impl Engine {
    pub fn new(fs: Box<dyn FileSystemProvider>) -> Self {
        Self::with_state(AppState::default(), fs)
    }

    pub fn with_state(state: AppState, fs: Box<dyn FileSystemProvider>) -> Self {
        Self { state, fs }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Materializes the tree at `path` through the host provider and swaps it
    /// in wholesale. On failure the previous tree, path, and search results
    /// all stay in place; the caller surfaces the error to the user.
    pub async fn load(&mut self, path: &str) -> Result<(), CoreError> {
        let dir = PathBuf::from(path);
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());

        let mut root = materialize_dir(self.fs.as_ref(), dir.clone(), name, None).await?;
        if let NodeKind::Folder { is_expanded, .. } = &mut root.kind {
            *is_expanded = true;
        }

        self.state.root = root;
        self.state.current_path = path.to_string();
        self.state.config.last_directory = Some(dir);
        self.save_config();
        self.refresh_search_results();
        tracing::info!("Loaded folder {}", path);
        Ok(())
    }

    /// Re-reads the currently loaded directory. A no-op before the first
    /// successful load.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        if self.state.current_path.is_empty() {
            return Ok(());
        }
        let path = self.state.current_path.clone();
        self.load(&path).await
    }

    pub fn toggle_expansion(&mut self, id: &str) {
        if !mutate::toggle_expansion(&mut self.state.root, id) {
            tracing::debug!("toggle_expansion: no folder with id {}", id);
        }
        self.refresh_search_results();
    }

    pub fn expand_all(&mut self) {
        mutate::expand_all(&mut self.state.root);
        self.refresh_search_results();
    }

    pub fn collapse_all(&mut self) {
        mutate::collapse_all(&mut self.state.root);
        self.refresh_search_results();
    }

    pub fn add_tag(&mut self, id: &str, tag: &str) {
        if !mutate::add_tag(&mut self.state.root, id, tag) {
            tracing::debug!("add_tag: no node with id {}", id);
        }
        self.refresh_search_results();
    }

    pub fn remove_tag(&mut self, id: &str, tag: &str) {
        if !mutate::remove_tag(&mut self.state.root, id, tag) {
            tracing::debug!("remove_tag: no node with id {}", id);
        }
        self.refresh_search_results();
    }

    /// Interactive tag entry through the host prompter. Cancellation and
    /// blank input add nothing.
    pub fn prompt_and_tag(&mut self, id: &str, prompter: &dyn Prompter) -> bool {
        let Some(name) = self.state.root.find(id).map(|node| node.name.clone()) else {
            tracing::debug!("prompt_and_tag: no node with id {}", id);
            return false;
        };
        let message = format!("Add tag to \"{}\"", name);
        match prompter.prompt_for_text(&message, "") {
            Some(tag) if !tag.trim().is_empty() => {
                self.add_tag(id, tag.trim());
                true
            }
            _ => false,
        }
    }

    pub fn add_bookmark(&mut self, node: &TreeNode) -> Bookmark {
        self.state.bookmarks.add(node)
    }

    pub fn remove_bookmark(&mut self, id: &str) {
        self.state.bookmarks.remove(id);
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.state.bookmarks.entries()
    }

    /// Replaces the rule set; the next derived read reflects it.
    pub fn set_ignore_rules(&mut self, rules: Vec<IgnoreRule>) {
        self.state.config.ignore_rules = rules;
        self.save_config();
    }

    pub fn set_settings(&mut self, display: DisplaySettings) {
        self.state.config.settings = display;
        self.save_config();
    }

    pub fn set_search_query(&mut self, text: &str) {
        self.state.search_query = text.to_string();
        self.refresh_search_results();
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.state.search_results
    }

    /// The derived view: always recomputed from the raw tree, never cached.
    pub fn filtered_tree(&self) -> TreeNode {
        filter::filter_tree(
            &self.state.root,
            &self.state.config.ignore_rules,
            &self.state.config.settings,
        )
    }

    pub fn export_structured(&self) -> Result<Vec<u8>, CoreError> {
        export::to_structured(&self.filtered_tree())
    }

    pub fn export_text(&self) -> Vec<u8> {
        export::to_text(&self.filtered_tree())
    }

    pub fn save_structured_export(&self) -> Result<PathBuf, CoreError> {
        let bytes = self.export_structured()?;
        self.save_export(STRUCTURED_EXPORT_FILE, &bytes)
    }

    pub fn save_text_export(&self) -> Result<PathBuf, CoreError> {
        self.save_export(TEXT_EXPORT_FILE, &self.export_text())
    }

    /// Replaces the rule set from a JSON file. A malformed file rejects the
    /// import whole; prior rules stay in place.
    pub fn import_ignore_rules(&mut self, path: &Path) -> Result<(), CoreError> {
        let rules = settings::import_ignore_rules(path)?;
        self.set_ignore_rules(rules);
        Ok(())
    }

    pub fn export_ignore_rules(&self, path: &Path) -> anyhow::Result<()> {
        settings::export_ignore_rules(&self.state.config.ignore_rules, path)
    }

    /// Aggregate tag counts over the raw tree.
    pub fn tag_summary(&self) -> BTreeMap<String, usize> {
        self.state.root.tag_summary()
    }

    /// Runs a key-down event through the hotkey table and executes whatever
    /// it resolves to. Returns the dispatch so the host can suppress its
    /// default handling.
    pub async fn handle_key_event(&mut self, event: &KeyEvent) -> Option<Dispatch> {
        let dispatch = self.state.hotkeys.dispatch(event)?;
        match dispatch.action {
            HotkeyAction::Refresh => {
                if let Err(err) = self.refresh().await {
                    tracing::warn!("Refresh via hotkey failed: {}", err);
                }
            }
            HotkeyAction::ExpandAll => self.expand_all(),
            HotkeyAction::CollapseAll => self.collapse_all(),
            HotkeyAction::ToggleTheme => self.toggle_theme(),
        }
        Some(dispatch)
    }

    fn toggle_theme(&mut self) {
        let mut display = self.state.config.settings.clone();
        display.theme = match display.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.set_settings(display);
    }

    fn save_export(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, CoreError> {
        let primary_dir = self
            .state
            .config
            .export_directory
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let target = primary_dir.join(filename);
        match std::fs::write(&target, bytes) {
            Ok(()) => Ok(target),
            Err(err) => {
                tracing::warn!(
                    "Export to {:?} failed ({}), falling back to temp dir",
                    target,
                    err
                );
                let fallback = std::env::temp_dir().join(filename);
                std::fs::write(&fallback, bytes)
                    .map_err(|err| CoreError::Io(err, fallback.clone()))?;
                Ok(fallback)
            }
        }
    }

    fn save_config(&self) {
        if let Err(err) = settings::save_config(&self.state.config, self.state.config_path.clone())
        {
            tracing::warn!("Failed to save config: {}", err);
        }
    }

    fn refresh_search_results(&mut self) {
        self.state.search_results =
            search::search_tree(&self.state.root, &self.state.search_query);
    }
}

/// Builds a folder node for `dir`, recursing through the provider one
/// directory at a time. A folder whose listing contains a `.git` entry gets
/// its repository metadata attached. Unreadable subdirectories stay in the
/// tree as empty folders rather than failing the whole load.
fn materialize_dir<'a>(
    fs: &'a dyn FileSystemProvider,
    dir: PathBuf,
    name: String,
    modified: Option<DateTime<Utc>>,
) -> Pin<Box<dyn Future<Output = Result<TreeNode, CoreError>> + Send + 'a>> {
    Box::pin(async move {
        let entries = fs.list_directory(&dir).await?;
        let path_str = dir.to_string_lossy().into_owned();
        let mut node = TreeNode::folder(&path_str, &name, &path_str, modified);

        if entries.iter().any(|e| e.is_directory && e.name == ".git") {
            node.is_git_repo = true;
            node.git_branch = fs.read_git_branch(&dir).await;
        }

        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            let child_path = dir.join(&entry.name);
            if entry.is_directory {
                match materialize_dir(fs, child_path.clone(), entry.name.clone(), entry.modified)
                    .await
                {
                    Ok(child) => children.push(child),
                    Err(err) => {
                        tracing::warn!(
                            "Leaving unreadable directory {:?} unexpanded: {}",
                            child_path,
                            err
                        );
                        let p = child_path.to_string_lossy();
                        children.push(TreeNode::folder(&p, &entry.name, &p, entry.modified));
                    }
                }
            } else {
                let p = child_path.to_string_lossy();
                children.push(TreeNode::file(&p, &entry.name, &p, entry.size, entry.modified));
            }
        }

        if let NodeKind::Folder { children: slot, .. } = &mut node.kind {
            *slot = children;
        }
        Ok(node)
    })
}
