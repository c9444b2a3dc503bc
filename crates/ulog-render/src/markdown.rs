//! Tree to Markdown.
//!
//! For each entry of a section, in order:
//!
//! - a named section or list emits `#`×depth, the capitalized key (in
//!   brackets at [`CATEGORY_DEPTH`]), a blank line, its contents one level
//!   deeper, and a closing blank line;
//! - a leaf emits `- <value>`; its key is not shown;
//! - an unnamed section or list (placeholder entry, or a list item) emits its
//!   contents at the current depth, without a heading.

use ulog_types::{Node, SectionKey};

use crate::document::RenderedDocument;

/// Depth of the top-level headings. Depth 1 belongs to the changelog title.
pub const ROOT_DEPTH: usize = 2;

/// Depth at which headings name a change category, rendered as `[Category]`.
pub const CATEGORY_DEPTH: usize = 2;

/// Render a merged tree starting at [`ROOT_DEPTH`].
pub fn render(tree: &Node) -> RenderedDocument {
    RenderedDocument::new(&render_at(tree, ROOT_DEPTH))
}

/// Render a tree with its top-level headings at `depth`. The output is not
/// trimmed.
pub fn render_at(tree: &Node, depth: usize) -> String {
    let mut out = String::new();
    render_contents(tree, depth, &mut out);
    out
}

fn render_contents(node: &Node, depth: usize, out: &mut String) {
    match node {
        Node::Section(entries) => {
            for (key, value) in entries {
                render_entry(key, value, depth, out);
            }
        }
        Node::List(items) => {
            for item in items {
                render_unnamed(item, depth, out);
            }
        }
        Node::Leaf(value) => bullet(value, out),
    }
}

fn render_entry(key: &SectionKey, value: &Node, depth: usize, out: &mut String) {
    match (key.as_name(), value) {
        (_, Node::Leaf(text)) => bullet(text, out),
        (Some(name), nested) => {
            out.push_str(&heading(name, depth));
            out.push_str("\n\n");
            render_contents(nested, depth + 1, out);
            out.push('\n');
        }
        (None, nested) => render_contents(nested, depth, out),
    }
}

fn render_unnamed(node: &Node, depth: usize, out: &mut String) {
    match node {
        Node::Leaf(text) => bullet(text, out),
        nested => render_contents(nested, depth, out),
    }
}

fn bullet(text: &str, out: &mut String) {
    out.push_str("- ");
    out.push_str(text);
    out.push('\n');
}

fn heading(name: &str, depth: usize) -> String {
    let title = capitalize(name);
    let marker = "#".repeat(depth);
    if depth == CATEGORY_DEPTH {
        format!("{marker} [{title}]")
    } else {
        format!("{marker} {title}")
    }
}

/// Uppercase the first character, leave the rest alone.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> Node {
        Node::from_json(value)
    }

    #[test]
    fn merged_bugs_render_under_headings() {
        let merged = tree(json!({"fixed": {"bugs": [
            "Crash on logout [[sc-2](https://t/2)]",
            "Null pointer on login [[sc-10](https://t/10)]"
        ]}}));
        assert_eq!(
            render(&merged).as_str(),
            "## [Fixed]\n\n### Bugs\n\n- Crash on logout [[sc-2](https://t/2)]\n- Null pointer on login [[sc-10](https://t/10)]"
        );
    }

    #[test]
    fn lone_leaf_drops_its_key() {
        let single = tree(json!({"fixed": {"bugs": "Crash"}}));
        assert_eq!(render(&single).as_str(), "## [Fixed]\n\n- Crash");
    }

    #[test]
    fn sibling_categories_are_separated_by_blank_lines() {
        let merged = tree(json!({
            "added": {"api": "New endpoint"},
            "fixed": {"ui": {"forms": "Validation"}}
        }));
        let expected = "## [Added]\n\n- New endpoint\n\n## [Fixed]\n\n### Ui\n\n#### Forms\n\n- Validation";
        assert_eq!(render(&merged).as_str(), expected);
    }

    #[test]
    fn only_the_first_character_is_capitalized() {
        let merged = tree(json!({"security fixes": {"api keys": ["a", "b"]}}));
        assert_eq!(
            render(&merged).as_str(),
            "## [Security fixes]\n\n### Api keys\n\n- a\n- b"
        );
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn top_level_leaves_are_bullets() {
        let merged = tree(json!({"note": "Loose note"}));
        assert_eq!(render(&merged).as_str(), "- Loose note");
    }

    #[test]
    fn placeholder_entries_render_without_heading() {
        let merged = Node::Section(vec![(
            SectionKey::named("fixed"),
            Node::Section(vec![
                (SectionKey::named("bugs"), Node::List(vec![Node::leaf("a"), Node::leaf("b")])),
                (SectionKey::Placeholder(0), Node::leaf("c")),
            ]),
        )]);
        assert_eq!(
            render(&merged).as_str(),
            "## [Fixed]\n\n### Bugs\n\n- a\n- b\n\n- c"
        );
    }

    #[test]
    fn nested_list_items_render_inline() {
        let merged = tree(json!({"changed": [{"api": ["x"]}, "y"]}));
        assert_eq!(
            render(&merged).as_str(),
            "## [Changed]\n\n### Api\n\n- x\n\n- y"
        );
    }

    #[test]
    fn empty_tree_renders_empty_document() {
        assert!(render(&Node::empty_section()).is_empty());
    }

    #[test]
    fn render_at_other_depths_and_is_untrimmed() {
        let merged = tree(json!({"fixed": {"bugs": "a"}}));
        assert_eq!(render_at(&merged, 3), "### Fixed\n\n- a\n\n");
    }

    #[test]
    fn rendering_is_pure() {
        let merged = tree(json!({"a": {"b": ["x", "y"]}, "c": {"d": "z"}}));
        assert_eq!(render(&merged), render(&merged));
    }
}
