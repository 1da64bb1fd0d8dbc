//! The bookmark registry: an insertion-ordered collection of folder
//! snapshots with a lifecycle independent of the tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::tree::TreeNode;

/// A saved pointer to a filesystem entry. Holds copies of `name` and `path`
/// taken at creation time, never a live tree reference, so later reloads and
/// mutations leave existing bookmarks untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    pub path: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct BookmarkStore {
    entries: Vec<Bookmark>,
    counter: u64,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots the node and appends a new bookmark.
    ///
    /// Ids combine the wall clock with a monotonic counter, so bookmarking
    /// the same node twice in the same millisecond still yields two distinct
    /// entries.
    pub fn add(&mut self, node: &TreeNode) -> Bookmark {
        let added_at = Utc::now();
        self.counter += 1;
        let bookmark = Bookmark {
            id: format!("bookmark-{}-{}", added_at.timestamp_millis(), self.counter),
            name: node.name.clone(),
            path: node.path.clone(),
            added_at,
        };
        self.entries.push(bookmark.clone());
        bookmark
    }

    /// Deletes by exact id; an unknown id is a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|bookmark| bookmark.id != id);
        self.entries.len() != before
    }

    /// Bookmarks in insertion order.
    pub fn entries(&self) -> &[Bookmark] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
