//! The filter pipeline: derives the visible tree from the raw snapshot.
//!
//! The raw tree is the single source of truth. The filtered tree is always
//! recomputed from it on demand, never cached, so rule and setting changes
//! show up on the next read without touching the stored snapshot.

use super::tree::{NodeKind, TreeNode};
use super::{DisplaySettings, IgnoreRule};

/// Derives the filtered view of `root`, depth-first and top-down.
///
/// The root node itself is exempt from every rule; filtering starts at its
/// children. A node is dropped when an enabled ignore rule's pattern occurs
/// in its name, when it is hidden (name starts with `.`) and hidden files are
/// off, or when it is a file and files are off. Folders are never pruned for
/// ending up empty.
pub fn filter_tree(root: &TreeNode, rules: &[IgnoreRule], settings: &DisplaySettings) -> TreeNode {
    let mut filtered = root.clone();
    if let NodeKind::Folder { children, .. } = &mut filtered.kind {
        let taken = std::mem::take(children);
        *children = filter_level(taken, rules, settings);
    }
    filtered
}

fn filter_level(
    children: Vec<TreeNode>,
    rules: &[IgnoreRule],
    settings: &DisplaySettings,
) -> Vec<TreeNode> {
    children
        .into_iter()
        .filter(|child| survives(child, rules, settings))
        .map(|mut child| {
            if let NodeKind::Folder { children, .. } = &mut child.kind {
                let taken = std::mem::take(children);
                *children = filter_level(taken, rules, settings);
            }
            child
        })
        .collect()
}

fn survives(node: &TreeNode, rules: &[IgnoreRule], settings: &DisplaySettings) -> bool {
    if rules.iter().any(|rule| rule.matches(&node.name)) {
        return false;
    }
    if !settings.show_hidden_files && node.name.starts_with('.') {
        return false;
    }
    if !settings.show_files && !node.is_folder() {
        return false;
    }
    true
}
