//! Normalization of incoming subtrees and canonicalization of degenerate
//! forms, run before the raw splice.
//!
//! Two families live here: rewrites applied to the *incoming* detached
//! subtree so it fits its destination (constructor names follow the
//! enclosing class, context-forbidden modifiers are stripped), and
//! rewrites applied to an *existing* child so the parent can admit a
//! richer sibling (a lone positional annotation value becomes an explicit
//! `value=` pair before a second pair arrives).

use crate::roles;
use crate::syntax::{ClassFlavor, NodeKind, Role, TokenKind};
use crate::tree::{ElementId, NodeId, Tree};

/// True for methods declared without a return type — constructors.
pub(crate) fn is_constructor(tree: &Tree, method: NodeId) -> bool {
    tree.kind(method) == NodeKind::Method
        && roles::child_by_role(tree, method, Role::Type).is_none()
}

/// Rewrites an incoming class-body member to fit the destination class.
pub(crate) fn normalize_incoming_member(tree: &mut Tree, class: NodeId, member: ElementId) {
    let Some(node) = member.node() else {
        return;
    };
    match tree.kind(node) {
        NodeKind::Method => {
            if is_constructor(tree, node) {
                rename_constructor(tree, class, node);
            }
            strip_context_modifiers(tree, class, node, &[TokenKind::PublicKw, TokenKind::AbstractKw]);
        }
        NodeKind::Field => {
            strip_context_modifiers(
                tree,
                class,
                node,
                &[TokenKind::PublicKw, TokenKind::StaticKw, TokenKind::FinalKw],
            );
        }
        _ => {}
    }
}

/// A constructor's declared name always matches its enclosing class;
/// an incoming constructor is renamed to the destination's current name.
fn rename_constructor(tree: &mut Tree, class: NodeId, method: NodeId) {
    let Some(class_name) = roles::child_by_role(tree, class, Role::Name)
        .and_then(ElementId::token)
        .map(|t| tree.token_text(t).to_owned())
    else {
        return;
    };
    let Some(old_name) = roles::child_by_role(tree, method, Role::Name) else {
        return;
    };
    let Some(old_token) = old_name.token() else {
        return;
    };
    if tree.token_text(old_token) == class_name {
        return;
    }
    let Some(idx) = tree.index_of(method, old_name) else {
        return;
    };
    let fresh = tree.create_token(TokenKind::Identifier, &class_name);
    let detached = tree.detach_at(method, idx);
    tree.splice_in(method, idx, &[fresh.into()]);
    tree.free_subtree(detached);
}

/// Strips modifiers the destination context disallows (interface members
/// carry no redundant `public`/`abstract`/`static`/`final`).
fn strip_context_modifiers(
    tree: &mut Tree,
    class: NodeId,
    member: NodeId,
    disallowed: &[TokenKind],
) {
    if tree.class_flavor(class) != ClassFlavor::Interface {
        return;
    }
    let Some(list) = roles::child_by_role(tree, member, Role::ModifierList)
        .and_then(ElementId::node)
    else {
        return;
    };
    let mut stripped_any = false;
    loop {
        let stripped = tree.significant_children(list).find(|&(_, c)| {
            tree.elem_token_kind(c)
                .is_some_and(|kind| disallowed.contains(&kind))
        });
        let Some((idx, _)) = stripped else {
            break;
        };
        let removed = tree.detach_at(list, idx);
        tree.free_subtree(removed);
        stripped_any = true;
    }
    if stripped_any {
        super::repair::run(tree, [super::repair::RepairAction::SpaceOutModifiers(list)]);
    }
}

/// Canonicalizes a lone positional annotation value into an explicit
/// `value=` name/value pair, so a second pair can join it.
///
/// `@A(1)` stores a bare expression (or a pair without a name); once a
/// named pair is being added the positional form is re-synthesized in the
/// richer shape and replaced in place.
pub(crate) fn canonicalize_annotation_params(tree: &mut Tree, list: NodeId) {
    debug_assert_eq!(tree.kind(list), NodeKind::AnnotationParamList);
    let args = roles::children_by_role(tree, list, Role::Argument);
    let [lone] = args.as_slice() else {
        return;
    };
    let lone = *lone;

    let needs_name = match tree.elem_node_kind(lone) {
        Some(NodeKind::NameValuePair) => {
            roles::child_by_role(tree, lone.node().unwrap(), Role::Name).is_none()
        }
        Some(kind) if kind.is_expression() => true,
        _ => false,
    };
    if !needs_name {
        return;
    }

    let idx = tree
        .index_of(list, lone)
        .expect("argument listed but not a child");
    let name = tree.create_token(TokenKind::Identifier, "value");
    let eq = tree.synth_token(TokenKind::Eq);

    match tree.elem_node_kind(lone) {
        Some(NodeKind::NameValuePair) => {
            let pair = lone.node().unwrap();
            tree.splice_in(pair, 0, &[name.into(), eq.into()]);
        }
        _ => {
            let value = tree.detach_at(list, idx);
            let pair = tree.create_node(
                NodeKind::NameValuePair,
                vec![name.into(), eq.into(), value],
            );
            tree.splice_in(list, idx, &[pair.into()]);
        }
    }
}
