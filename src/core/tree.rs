//! The tree model: one recursive node type and its construction rules.
//!
//! A tree is rooted at exactly one node. Node ids are unique across the whole
//! tree and stable for the lifetime of one loaded snapshot; shape changes only
//! on a full reload, everything else mutates node attributes in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind-specific payload of a [`TreeNode`].
///
/// Folders always carry a materialized `children` vector once their listing
/// has been read; an empty vector means "known to have no children".
/// Expansion state is transient UI state and exists only on folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
    },
    Folder {
        children: Vec<TreeNode>,
        is_expanded: bool,
    },
}

/// A single node of the directory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Stable unique identifier within one loaded tree. The host uses the
    /// absolute path; any opaque unique key satisfies the contract.
    pub id: String,
    /// Display label, the final path segment.
    pub name: String,
    /// Full path string; informational, not used for identity after load.
    pub path: String,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub is_git_repo: bool,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn file(
        id: &str,
        name: &str,
        path: &str,
        size: Option<u64>,
        modified: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            modified: modified.unwrap_or_else(Utc::now),
            tags: Vec::new(),
            git_branch: None,
            is_git_repo: false,
            kind: NodeKind::File { size },
        }
    }

    /// A freshly constructed folder starts collapsed with an empty (but
    /// materialized) child list; the loader fills children in and expands
    /// only the root.
    pub fn folder(id: &str, name: &str, path: &str, modified: Option<DateTime<Utc>>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            modified: modified.unwrap_or_else(Utc::now),
            tags: Vec::new(),
            git_branch: None,
            is_git_repo: false,
            kind: NodeKind::Folder {
                children: Vec::new(),
                is_expanded: false,
            },
        }
    }

    /// The placeholder root shown before any folder has been loaded.
    pub fn empty_root() -> Self {
        Self::folder("empty-root", "Root", "", None)
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn children(&self) -> Option<&[TreeNode]> {
        match &self.kind {
            NodeKind::Folder { children, .. } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<TreeNode>> {
        match &mut self.kind {
            NodeKind::Folder { children, .. } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    /// `false` for files, which carry no expansion state.
    pub fn is_expanded(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Folder {
                is_expanded: true,
                ..
            }
        )
    }

    pub fn size(&self) -> Option<u64> {
        match self.kind {
            NodeKind::File { size } => size,
            NodeKind::Folder { .. } => None,
        }
    }

    /// Pre-order lookup by id over the whole tree, root included.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children()?
            .iter()
            .find_map(|child| child.find(id))
    }

    /// Aggregate count of every tag reachable by traversal, in sorted order.
    /// This is the "tag registry" used for export and summary views; tags
    /// themselves live on the nodes.
    pub fn tag_summary(&self) -> BTreeMap<String, usize> {
        let mut summary = BTreeMap::new();
        self.collect_tags(&mut summary);
        summary
    }

    fn collect_tags(&self, summary: &mut BTreeMap<String, usize>) {
        for tag in &self.tags {
            *summary.entry(tag.clone()).or_insert(0) += 1;
        }
        if let Some(children) = self.children() {
            for child in children {
                child.collect_tags(summary);
            }
        }
    }
}
