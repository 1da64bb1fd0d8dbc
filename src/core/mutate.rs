//! Structural transforms over the raw tree.
//!
//! Every operation works against the raw snapshot, never the filtered view,
//! and changes node attributes only; tree shape changes solely on reload.
//! Targeted operations report whether the id resolved so callers can log the
//! miss, but a stale id is never an error: UI state may briefly lag a reload.

use super::tree::{NodeKind, TreeNode};

/// Flips `is_expanded` on the folder with the given id. No-op (returns
/// `false`) when the id is missing or resolves to a file.
pub fn toggle_expansion(tree: &mut TreeNode, id: &str) -> bool {
    match find_mut(tree, id) {
        Some(TreeNode {
            kind: NodeKind::Folder { is_expanded, .. },
            ..
        }) => {
            *is_expanded = !*is_expanded;
            true
        }
        _ => false,
    }
}

/// Expands every folder, the root included.
pub fn expand_all(tree: &mut TreeNode) {
    set_expansion(tree, true);
}

/// Collapses every folder, the root included.
pub fn collapse_all(tree: &mut TreeNode) {
    set_expansion(tree, false);
}

fn set_expansion(node: &mut TreeNode, expanded: bool) {
    if let NodeKind::Folder {
        children,
        is_expanded,
    } = &mut node.kind
    {
        *is_expanded = expanded;
        for child in children {
            set_expansion(child, expanded);
        }
    }
}

/// Appends `tag` to the matched node's tag list.
///
/// Duplicate tags are allowed: adding the same tag twice records it twice.
pub fn add_tag(tree: &mut TreeNode, id: &str, tag: &str) -> bool {
    match find_mut(tree, id) {
        Some(node) => {
            node.tags.push(tag.to_string());
            true
        }
        None => false,
    }
}

/// Removes all occurrences of `tag` (exact string match) from the matched
/// node's tag list.
pub fn remove_tag(tree: &mut TreeNode, id: &str, tag: &str) -> bool {
    match find_mut(tree, id) {
        Some(node) => {
            node.tags.retain(|existing| existing != tag);
            true
        }
        None => false,
    }
}

fn find_mut<'a>(node: &'a mut TreeNode, id: &str) -> Option<&'a mut TreeNode> {
    if node.id == id {
        return Some(node);
    }
    if let NodeKind::Folder { children, .. } = &mut node.kind {
        for child in children {
            if let Some(found) = find_mut(child, id) {
                return Some(found);
            }
        }
    }
    None
}
