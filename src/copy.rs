//! The copy/context binder: detached duplicates that stay interpretable.
//!
//! A structural deep copy has no parent link and shares nothing with the
//! original but interned text. For members whose meaning depends on the
//! enclosing generic scope — fields and methods referencing a class's
//! type parameters — the binder records the originating scope's
//! type-parameter list alongside the copy. A consumer resolving names
//! inside the detached copy then sees the same generic parameters as the
//! original did in place, without the whole enclosing declaration coming
//! along. Omitting this context silently breaks later name resolution,
//! which is why the binding happens here and not in callers.

use crate::roles;
use crate::syntax::{NodeKind, Role};
use crate::tree::{ElementId, NodeId, Tree};

impl Tree {
    /// Deep-copies `elem` with context binding; see [`copy`].
    pub fn copy(&mut self, elem: impl Into<ElementId>) -> ElementId {
        copy(self, elem.into())
    }

    /// Deep-copies `elem` with an explicit generic scope recorded.
    pub fn copy_with_context(
        &mut self,
        elem: impl Into<ElementId>,
        scope: Option<NodeId>,
    ) -> ElementId {
        copy_with_context(self, elem.into(), scope)
    }
}

/// Deep-copies `elem`, binding generic context for the kinds that need
/// it. The copy is detached and belongs to the same tree/arena.
pub fn copy(tree: &mut Tree, elem: ElementId) -> ElementId {
    let scope = originating_scope(tree, elem);
    copy_with_context(tree, elem, scope)
}

/// Deep-copies `elem` with an explicit generic scope (a type-parameter
/// list node) recorded on the copy, overriding the inferred one.
pub fn copy_with_context(
    tree: &mut Tree,
    elem: ElementId,
    scope: Option<NodeId>,
) -> ElementId {
    let duplicate = copy_subtree(tree, elem);
    if let (Some(node), Some(scope)) = (duplicate.node(), scope) {
        if needs_context(tree.kind(node)) {
            tree.copy_contexts.insert(node, scope);
        }
    }
    duplicate
}

/// Kinds whose independent interpretation depends on enclosing generic
/// scope.
fn needs_context(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::Field | NodeKind::Method)
}

/// The type-parameter list of the nearest enclosing class, if any.
fn originating_scope(tree: &Tree, elem: ElementId) -> Option<NodeId> {
    tree.ancestors(elem)
        .find(|&n| tree.kind(n) == NodeKind::Class)
        .and_then(|class| roles::child_by_role(tree, class, Role::TypeParameterList))
        .and_then(ElementId::node)
}

/// Plain structural deep copy, no context binding. Token text is shared
/// through the interner; everything else is fresh.
pub(crate) fn copy_subtree(tree: &mut Tree, elem: ElementId) -> ElementId {
    match elem {
        ElementId::Token(t) => {
            let kind = tree.token_kind(t);
            let text = tree.token_text(t).to_owned();
            tree.create_token(kind, &text).into()
        }
        ElementId::Node(n) => {
            let kind = tree.kind(n);
            let children: Vec<ElementId> = tree.children(n).to_vec();
            let copied: Vec<ElementId> = children
                .into_iter()
                .map(|child| copy_subtree(tree, child))
                .collect();
            tree.create_node(kind, copied).into()
        }
    }
}

// ============================================================================
// GENERIC SCOPE QUERIES
// ============================================================================

/// Type-parameter lists visible from `elem`, innermost first.
///
/// Walks enclosing methods and classes; at the top of a detached
/// component, continues through the context recorded by the binder, so a
/// detached copy sees the scopes of its origin.
pub fn type_parameter_scopes(tree: &Tree, elem: ElementId) -> Vec<NodeId> {
    let mut scopes = Vec::new();
    let mut current = elem;
    loop {
        if let Some(node) = current.node() {
            if matches!(tree.kind(node), NodeKind::Method | NodeKind::Class) {
                if let Some(list) = roles::child_by_role(tree, node, Role::TypeParameterList)
                    .and_then(ElementId::node)
                {
                    scopes.push(list);
                }
            }
            if let Some(bound) = tree.bound_context(node) {
                scopes.push(bound);
            }
        }
        match tree.parent_of(current) {
            Some(parent) => current = ElementId::Node(parent),
            None => break,
        }
    }
    scopes
}

/// Resolves a type-parameter name from `elem`'s position, innermost
/// scope first. Returns the `TypeParameter` node that declares it.
pub fn resolve_type_parameter(tree: &Tree, elem: ElementId, name: &str) -> Option<NodeId> {
    for scope in type_parameter_scopes(tree, elem) {
        for param in roles::children_by_role(tree, scope, Role::TypeParameter) {
            let Some(param) = param.node() else {
                continue;
            };
            let declared = roles::child_by_role(tree, param, Role::Name)
                .and_then(ElementId::token)
                .map(|t| tree.token_text(t));
            if declared == Some(name) {
                return Some(param);
            }
        }
    }
    None
}
