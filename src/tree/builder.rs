//! Parser-facing tree construction.
//!
//! The external parser drives a `TreeBuilder` event-style: open a node,
//! emit tokens and nested nodes, close it. The builder trusts its input —
//! grammar correctness of parser output is the parser's contract, the
//! tree only preserves it from then on.

use crate::syntax::{NodeKind, TokenKind};
use crate::tree::{ElementId, Tree};

/// Event-driven builder producing a [`Tree`] with its root installed.
///
/// # Examples
///
/// ```rust
/// use arbor::syntax::{NodeKind, TokenKind};
/// use arbor::tree::TreeBuilder;
///
/// let mut builder = TreeBuilder::new();
/// builder.start_node(NodeKind::File);
/// builder.start_node(NodeKind::ImportList);
/// builder.finish_node();
/// builder.finish_node();
/// let tree = builder.finish();
/// assert!(tree.root().is_some());
/// ```
pub struct TreeBuilder {
    tree: Tree,
    stack: Vec<(NodeKind, Vec<ElementId>)>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Creates a builder over a fresh tree.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            stack: Vec::new(),
        }
    }

    /// Opens a composite node; children follow until `finish_node`.
    pub fn start_node(&mut self, kind: NodeKind) {
        self.stack.push((kind, Vec::new()));
    }

    /// Emits a token into the currently open node.
    pub fn token(&mut self, kind: TokenKind, text: &str) {
        let id = self.tree.create_token(kind, text);
        let (_, children) = self
            .stack
            .last_mut()
            .expect("token emitted outside any open node");
        children.push(id.into());
    }

    /// Emits a fixed-spelling token from its canonical text.
    pub fn synth(&mut self, kind: TokenKind) {
        let text = kind
            .canonical_text()
            .expect("synth requires a fixed-spelling token kind");
        self.token(kind, text);
    }

    /// Closes the innermost open node.
    pub fn finish_node(&mut self) {
        let (kind, children) = self.stack.pop().expect("finish_node without start_node");
        let id = self.tree.create_node(kind, children);
        match self.stack.last_mut() {
            Some((_, parent_children)) => parent_children.push(id.into()),
            None => self.tree.set_root(id),
        }
    }

    /// Finishes construction. Panics if any node is still open.
    pub fn finish(self) -> Tree {
        assert!(
            self.stack.is_empty(),
            "unbalanced builder: {} node(s) still open",
            self.stack.len()
        );
        self.tree
    }
}
