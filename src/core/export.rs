//! Renders a filtered tree to its transport formats.
//!
//! The two formats deliberately disagree about expansion state: the
//! structured export always contains every filtered child, while the text
//! export stops at collapsed folders. Both operate on the already-filtered
//! view handed to them.

use super::error::CoreError;
use super::tree::{NodeKind, TreeNode};

/// Serializes the filtered view, all attributes included, as pretty-printed
/// JSON bytes. Expansion state is recorded but never limits inclusion.
pub fn to_structured(tree: &TreeNode) -> Result<Vec<u8>, CoreError> {
    Ok(serde_json::to_vec_pretty(tree)?)
}

/// Renders the filtered view as indented text, one line per node.
///
/// Rendering starts at the root's children, two spaces of indentation per
/// depth, a kind marker per line. A collapsed folder terminates its branch:
/// its line is emitted but none of its children are.
pub fn to_text(tree: &TreeNode) -> Vec<u8> {
    let mut out = String::new();
    if let Some(children) = tree.children() {
        render_level(children, 0, &mut out);
    }
    out.into_bytes()
}

fn render_level(nodes: &[TreeNode], depth: usize, out: &mut String) {
    for node in nodes {
        let marker = if node.is_folder() { "📁" } else { "📄" };
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(marker);
        out.push(' ');
        out.push_str(&node.name);
        out.push('\n');

        if let NodeKind::Folder {
            children,
            is_expanded: true,
        } = &node.kind
        {
            render_level(children, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree(src_expanded: bool) -> TreeNode {
        let mut root = TreeNode::folder("root", "proj", "/proj", None);
        let mut src = TreeNode::folder("src", "src", "/proj/src", None);
        if let NodeKind::Folder { is_expanded, .. } = &mut src.kind {
            *is_expanded = src_expanded;
        }
        src.children_mut().unwrap().push(TreeNode::file(
            "app-tsx",
            "App.tsx",
            "/proj/src/App.tsx",
            Some(2048),
            None,
        ));
        root.children_mut().unwrap().push(src);
        root.children_mut().unwrap().push(TreeNode::file(
            "readme",
            "README.md",
            "/proj/README.md",
            Some(64),
            None,
        ));
        root
    }

    fn text(tree: &TreeNode) -> String {
        String::from_utf8(to_text(tree)).unwrap()
    }

    #[test]
    fn expanded_folders_render_children_indented() {
        let rendered = text(&sample_tree(true));
        assert_eq!(rendered, "📁 src\n  📄 App.tsx\n📄 README.md\n");
    }

    #[test]
    fn collapsed_folder_terminates_its_branch() {
        let rendered = text(&sample_tree(false));
        assert_eq!(rendered, "📁 src\n📄 README.md\n");
        assert!(!rendered.contains("App.tsx"));
    }

    #[test]
    fn root_itself_is_not_a_line() {
        let rendered = text(&sample_tree(true));
        assert!(!rendered.contains("proj"));
    }

    #[test]
    fn structured_export_ignores_expansion_state() {
        let bytes = to_structured(&sample_tree(false)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let src = &json["children"][0];
        assert_eq!(src["is_expanded"], false);
        assert_eq!(src["children"][0]["name"], "App.tsx");
    }

    #[test]
    fn structured_export_round_trips() {
        let tree = sample_tree(true);
        let bytes = to_structured(&tree).unwrap();
        let parsed: TreeNode = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, tree);
    }
}
