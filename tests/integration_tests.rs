//! Integration tests for the Folder Lens engine.
//!
//! These tests run the engine against real temporary directories through the
//! production `OsFileSystem` provider, exercising the full load → mutate →
//! filter → export flow the host UI drives.

use folder_lens::app::engine::{Engine, TEXT_EXPORT_FILE};
use folder_lens::app::hotkeys::KeyEvent;
use folder_lens::app::state::AppState;
use folder_lens::config::AppConfig;
use folder_lens::core::IgnoreRule;
use folder_lens::host::OsFileSystem;
use std::path::PathBuf;
use tempfile::TempDir;

/// Contains the test infrastructure.
mod helpers {
    use super::*;
    use std::fs;

    /// `TestHarness` sets up a complete, isolated environment for each test
    /// case: a scratch directory to browse and a clean configuration whose
    /// writes stay inside the scratch directory.
    pub struct TestHarness {
        pub engine: Engine,
        pub root_path: PathBuf,
        _temp_dir: TempDir,
    }

    impl TestHarness {
        pub fn new() -> Self {
            let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let root_path = temp_dir.path().join("project");
            fs::create_dir(&root_path).expect("Failed to create project dir");

            let config = AppConfig {
                ignore_rules: Vec::new(),
                last_directory: None,
                export_directory: Some(temp_dir.path().to_path_buf()),
                ..AppConfig::default()
            };
            let mut state = AppState::with_config(config);
            state.config_path = Some(temp_dir.path().join("config.json"));

            Self {
                engine: Engine::with_state(state, Box::new(OsFileSystem)),
                root_path,
                _temp_dir: temp_dir,
            }
        }

        /// Creates a file inside the browsed project directory.
        pub fn create_file(&self, path: &str, content: &str) {
            let file_path = self.root_path.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(file_path, content).expect("Failed to write file");
        }

        /// Sets up a standard project structure for testing.
        pub fn setup_basic_project(&self) {
            self.create_file("src/main.rs", "fn main() {}");
            self.create_file("src/lib.rs", "// Library code");
            self.create_file("README.md", "# My Project");
            self.create_file("node_modules/pkg/index.js", "module.exports = {};");
            self.create_file(".env", "SECRET=1");
        }

        pub fn root_str(&self) -> String {
            self.root_path.to_string_lossy().into_owned()
        }

        pub fn node_id(&self, rel: &str) -> String {
            self.root_path.join(rel).to_string_lossy().into_owned()
        }
    }
}

#[tokio::test]
async fn load_materializes_the_whole_tree() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();

    harness.engine.load(&harness.root_str()).await.unwrap();

    let state = harness.engine.state();
    assert_eq!(state.current_path, harness.root_str());
    assert!(state.root.is_expanded(), "loaded root starts expanded");

    let src = state.root.find(&harness.node_id("src")).unwrap();
    assert!(src.is_folder());
    assert!(!src.is_expanded(), "loaded subfolders start collapsed");
    assert!(state.root.find(&harness.node_id("src/main.rs")).is_some());
    assert!(state
        .root
        .find(&harness.node_id("node_modules/pkg/index.js"))
        .is_some());

    let readme = state.root.find(&harness.node_id("README.md")).unwrap();
    assert_eq!(readme.size(), Some("# My Project".len() as u64));
}

#[tokio::test]
async fn failed_load_preserves_the_previous_tree() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.engine.load(&harness.root_str()).await.unwrap();

    let missing = harness.root_path.join("does-not-exist");
    let result = harness.engine.load(&missing.to_string_lossy()).await;
    assert!(result.is_err());

    let state = harness.engine.state();
    assert_eq!(state.current_path, harness.root_str());
    assert!(state.root.find(&harness.node_id("src")).is_some());
}

#[tokio::test]
async fn refresh_picks_up_new_entries() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.engine.load(&harness.root_str()).await.unwrap();
    assert!(harness
        .engine
        .state()
        .root
        .find(&harness.node_id("CHANGELOG.md"))
        .is_none());

    harness.create_file("CHANGELOG.md", "## 0.2.0");

    // Refresh is bound to ctrl+r; drive it through the dispatcher.
    let dispatch = harness.engine.handle_key_event(&KeyEvent::ctrl("r")).await;
    assert!(dispatch.is_some());
    assert!(harness
        .engine
        .state()
        .root
        .find(&harness.node_id("CHANGELOG.md"))
        .is_some());
}

#[tokio::test]
async fn ignore_rules_and_settings_shape_the_view_only() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.engine.load(&harness.root_str()).await.unwrap();

    harness
        .engine
        .set_ignore_rules(vec![IgnoreRule::new("node_modules", "node_modules", true)]);

    let filtered = harness.engine.filtered_tree();
    assert!(filtered.find(&harness.node_id("node_modules")).is_none());
    assert!(filtered.find(&harness.node_id("src/main.rs")).is_some());
    // Hidden files are off by default.
    assert!(filtered.find(&harness.node_id(".env")).is_none());

    // The raw snapshot is untouched and search still sees everything.
    assert!(harness
        .engine
        .state()
        .root
        .find(&harness.node_id("node_modules"))
        .is_some());
    harness.engine.set_search_query("index");
    assert_eq!(harness.engine.search_results().len(), 1);
}

#[tokio::test]
async fn text_export_respects_expansion_and_lands_on_disk() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.engine.load(&harness.root_str()).await.unwrap();

    // Collapsed "src" must terminate the text export at its own line.
    let text = String::from_utf8(harness.engine.export_text()).unwrap();
    assert!(text.contains("📁 src"));
    assert!(!text.contains("main.rs"));

    harness.engine.expand_all();
    let text = String::from_utf8(harness.engine.export_text()).unwrap();
    assert!(text.contains("  📄 main.rs"));

    let written = harness.engine.save_text_export().unwrap();
    assert!(written.ends_with(TEXT_EXPORT_FILE));
    assert_eq!(std::fs::read(&written).unwrap(), harness.engine.export_text());
}

#[tokio::test]
async fn structured_export_includes_collapsed_children() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.engine.load(&harness.root_str()).await.unwrap();
    harness.engine.collapse_all();

    let bytes = harness.engine.export_structured().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let rendered = json.to_string();
    assert!(rendered.contains("main.rs"), "collapsed children still serialize");
}

#[tokio::test]
async fn tags_survive_filtering_and_aggregate() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.engine.load(&harness.root_str()).await.unwrap();

    let main_id = harness.node_id("src/main.rs");
    harness.engine.add_tag(&main_id, "entrypoint");
    harness.engine.add_tag(&main_id, "entrypoint");
    harness.engine.add_tag(&harness.node_id("README.md"), "docs");

    let filtered = harness.engine.filtered_tree();
    assert_eq!(
        filtered.find(&main_id).unwrap().tags,
        vec!["entrypoint", "entrypoint"]
    );

    let summary = harness.engine.tag_summary();
    assert_eq!(summary.get("entrypoint"), Some(&2));
    assert_eq!(summary.get("docs"), Some(&1));

    harness.engine.remove_tag(&main_id, "entrypoint");
    assert!(harness.engine.tag_summary().get("entrypoint").is_none());
}

#[tokio::test]
async fn git_metadata_is_attached_at_load_time() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.create_file(".git/HEAD", "ref: refs/heads/feature/tree-engine\n");

    harness.engine.load(&harness.root_str()).await.unwrap();

    let root = &harness.engine.state().root;
    assert!(root.is_git_repo);
    assert_eq!(root.git_branch.as_deref(), Some("feature/tree-engine"));
}

#[tokio::test]
async fn bookmarks_outlive_reloads() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.engine.load(&harness.root_str()).await.unwrap();

    let src = harness
        .engine
        .state()
        .root
        .find(&harness.node_id("src"))
        .unwrap()
        .clone();
    let first = harness.engine.add_bookmark(&src);
    let second = harness.engine.add_bookmark(&src);
    assert_ne!(first.id, second.id);

    // Reload: tree ids are fresh but the bookmarks keep their snapshots.
    harness.engine.refresh().await.unwrap();
    assert_eq!(harness.engine.bookmarks().len(), 2);
    assert_eq!(harness.engine.bookmarks()[0].name, "src");

    harness.engine.remove_bookmark(&first.id);
    assert_eq!(harness.engine.bookmarks().len(), 1);
    // Unknown ids are silently ignored.
    harness.engine.remove_bookmark("bookmark-0-0");
    assert_eq!(harness.engine.bookmarks().len(), 1);
}
