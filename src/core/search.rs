//! Name search over the raw tree.
//!
//! Search runs against the unfiltered snapshot: ignore rules and display
//! settings never suppress a hit. Results come back in pre-order traversal
//! order with no ranking.

use serde::Serialize;

use super::tree::TreeNode;

/// A read-only projection of one search hit. The contained node is a
/// snapshot; it is never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub item: TreeNode,
    pub matched_labels: Vec<String>,
}

/// Case-insensitive substring match of `query` against node names.
///
/// An empty or whitespace-only query means search is inactive and yields
/// nothing. The root itself is excluded; matching starts at its children.
pub fn search_tree(root: &TreeNode, query: &str) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut results = Vec::new();
    if let Some(children) = root.children() {
        for child in children {
            visit(child, &needle, &mut results);
        }
    }
    results
}

fn visit(node: &TreeNode, needle: &str, results: &mut Vec<SearchResult>) {
    if node.name.to_lowercase().contains(needle) {
        results.push(SearchResult {
            item: node.clone(),
            matched_labels: vec![node.name.clone()],
        });
    }
    if let Some(children) = node.children() {
        for child in children {
            visit(child, needle, results);
        }
    }
}
