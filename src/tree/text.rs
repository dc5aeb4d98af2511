//! Text projection of a tree.
//!
//! The tree never stores rendered text; these walks derive it on demand
//! by concatenating token text in document order. Offsets are byte
//! offsets within the element's own component (the file for attached
//! elements, the detached subtree otherwise), which is what diagnostics
//! label against.

use serde_json::{json, Value};

use crate::tree::{ElementId, Tree};

impl Tree {
    /// Renders the full text under an element; see [`text_of`].
    pub fn text(&self, elem: impl Into<ElementId>) -> String {
        text_of(self, elem.into())
    }
}

/// Renders the full text under an element.
pub fn text_of(tree: &Tree, elem: ElementId) -> String {
    let mut out = String::new();
    push_text(tree, elem, &mut out);
    out
}

fn push_text(tree: &Tree, elem: ElementId, out: &mut String) {
    match elem {
        ElementId::Token(t) => out.push_str(tree.token_text(t)),
        ElementId::Node(n) => {
            for &child in tree.children(n) {
                push_text(tree, child, out);
            }
        }
    }
}

/// Rendered text length in bytes.
pub fn text_len(tree: &Tree, elem: ElementId) -> usize {
    match elem {
        ElementId::Token(t) => tree.token_text(t).len(),
        ElementId::Node(n) => tree
            .children(n)
            .iter()
            .map(|&child| text_len(tree, child))
            .sum(),
    }
}

/// Byte offset of `elem` within its component's rendered text.
pub fn offset_of(tree: &Tree, elem: ElementId) -> usize {
    let mut offset = 0;
    let mut current = elem;
    while let Some(parent) = tree.parent_of(current) {
        for &sibling in tree.children(parent) {
            if sibling == current {
                break;
            }
            offset += text_len(tree, sibling);
        }
        current = ElementId::Node(parent);
    }
    offset
}

/// Structural JSON dump of a subtree, for debugging and golden tests.
///
/// Tokens render as `{"token": kind, "text": ...}` and nodes as
/// `{"kind": ..., "children": [...]}`; trivia tokens are included, so the
/// dump round-trips the exact child structure.
pub fn dump(tree: &Tree, elem: ElementId) -> Value {
    match elem {
        ElementId::Token(t) => json!({
            "token": tree.token_kind(t),
            "text": tree.token_text(t),
        }),
        ElementId::Node(n) => json!({
            "kind": tree.kind(n),
            "children": tree
                .children(n)
                .iter()
                .map(|&child| dump(tree, child))
                .collect::<Vec<_>>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeKind, TokenKind};
    use crate::tree::TreeBuilder;

    fn small_tree() -> Tree {
        let mut builder = TreeBuilder::new();
        builder.start_node(NodeKind::ExpressionStatement);
        builder.start_node(NodeKind::ReferenceExpression);
        builder.token(TokenKind::Identifier, "foo");
        builder.finish_node();
        builder.synth(TokenKind::Semicolon);
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn renders_in_document_order() {
        let tree = small_tree();
        let root = tree.root().unwrap();
        assert_eq!(text_of(&tree, root.into()), "foo;");
        assert_eq!(text_len(&tree, root.into()), 4);
    }

    #[test]
    fn offsets_are_relative_to_the_component() {
        let tree = small_tree();
        let root = tree.root().unwrap();
        let semicolon = tree.children(root)[1];
        assert_eq!(offset_of(&tree, semicolon), 3);
        assert_eq!(offset_of(&tree, root.into()), 0);
    }

    #[test]
    fn dump_reflects_structure() {
        let tree = small_tree();
        let root = tree.root().unwrap();
        let value = dump(&tree, root.into());
        assert_eq!(value["kind"], "ExpressionStatement");
        assert_eq!(value["children"][1]["text"], ";");
    }
}
