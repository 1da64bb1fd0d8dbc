//! Shared generators for the core property tests.

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use super::tree::{NodeKind, TreeNode};

const NAMES: &[&str] = &[
    "src",
    "lib.rs",
    ".git",
    "node_modules",
    "App.tsx",
    "readme.md",
    ".env",
    "build",
    "docs",
    "main.rs",
];

fn fixed_time() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

fn arb_name() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(NAMES)
}

/// A rooted tree with unique pre-order ids, mixed kinds, repeated and hidden
/// names, and arbitrary expansion state.
pub(crate) fn arb_tree() -> impl Strategy<Value = TreeNode> {
    let leaf = (arb_name(), 0u64..4096).prop_map(|(name, size)| {
        TreeNode::file("x", name, name, Some(size), Some(fixed_time()))
    });

    let node = leaf.prop_recursive(3, 24, 4, |inner| {
        (
            arb_name(),
            proptest::collection::vec(inner, 0..4),
            any::<bool>(),
        )
            .prop_map(|(name, children, expanded)| {
                folder_with(name, children, expanded)
            })
    });

    (proptest::collection::vec(node, 0..4), any::<bool>()).prop_map(|(children, expanded)| {
        let mut root = folder_with("root", children, expanded);
        assign_ids(&mut root);
        root
    })
}

fn folder_with(name: &str, new_children: Vec<TreeNode>, expanded: bool) -> TreeNode {
    let mut folder = TreeNode::folder("x", name, name, Some(fixed_time()));
    if let NodeKind::Folder {
        children,
        is_expanded,
    } = &mut folder.kind
    {
        *children = new_children;
        *is_expanded = expanded;
    }
    folder
}

fn assign_ids(root: &mut TreeNode) {
    fn walk(node: &mut TreeNode, counter: &mut usize) {
        node.id = format!("n{counter}");
        *counter += 1;
        if let NodeKind::Folder { children, .. } = &mut node.kind {
            for child in children {
                walk(child, counter);
            }
        }
    }
    let mut counter = 0;
    walk(root, &mut counter);
}

/// Every id in the tree, pre-order, root included.
pub(crate) fn all_ids(root: &TreeNode) -> Vec<String> {
    fn walk(node: &TreeNode, out: &mut Vec<String>) {
        out.push(node.id.clone());
        if let Some(children) = node.children() {
            for child in children {
                walk(child, out);
            }
        }
    }
    let mut ids = Vec::new();
    walk(root, &mut ids);
    ids
}
