//! Arena storage for nodes and tokens.
//!
//! Handles are plain indices into the tree's arenas; the parent link is a
//! handle too, never an owning pointer, so cycles are unrepresentable and
//! detaching a subtree is an index update. Freed slots go to a free list
//! and are reused by later creations.

use std::sync::atomic::AtomicU64;

use serde::Serialize;

use crate::syntax::{NodeKind, TokenKind};
use crate::tree::intern::Symbol;

/// Handle to a composite node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub(crate) u32);

/// Handle to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenId(pub(crate) u32);

/// Handle to either a node or a token; what a child slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementId {
    Node(NodeId),
    Token(TokenId),
}

impl ElementId {
    /// Returns the node handle if this element is a node.
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::Token(_) => None,
        }
    }

    /// Returns the token handle if this element is a token.
    pub fn token(self) -> Option<TokenId> {
        match self {
            Self::Token(id) => Some(id),
            Self::Node(_) => None,
        }
    }
}

impl From<NodeId> for ElementId {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<TokenId> for ElementId {
    fn from(id: TokenId) -> Self {
        Self::Token(id)
    }
}

/// Stored data of a composite node.
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<ElementId>,
    /// Mutation stamp; equals the tree's modification count as of the
    /// last edit under this node. Derived-data caches key on it.
    pub(crate) stamp: u64,
    /// Packed derived-data cache, `(stamp + 1) << 16 | payload`.
    /// Zero means empty. Interior-mutable so concurrent readers can fill
    /// it; writers invalidate by bumping `stamp`.
    pub(crate) cache: AtomicU64,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            stamp: 0,
            cache: AtomicU64::new(0),
        }
    }
}

/// Stored data of a token.
pub(crate) struct TokenData {
    pub(crate) kind: TokenKind,
    pub(crate) text: Symbol,
    pub(crate) parent: Option<NodeId>,
}
