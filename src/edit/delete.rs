//! The delete path of the invariant repairer.
//!
//! Pre-delete fixups run against stable neighbors, then the raw detach,
//! then normalization of what the removal left behind. Deleting a
//! load-bearing child with no defined fixup is a caller bug and is
//! refused; a handful of roles instead trigger defined fixups — a method
//! body collapses to a semicolon, a sole declarator takes its statement
//! with it, a chained declaration re-attaches its shared prefix.

use crate::copy;
use crate::errors::{report, ArborError, ErrorKind};
use crate::roles;
use crate::syntax::{NodeKind, Role, TokenKind};
use crate::tree::{ElementId, NodeId, Tree};

use super::policy::bracket_policy;
use super::repair::{self, RepairAction};

/// Deletes `child` from `parent`, repairing invariants.
pub(crate) fn delete(tree: &mut Tree, parent: NodeId, child: ElementId) -> Result<(), ArborError> {
    let parent_kind = tree.kind(parent);
    let Some(idx) = tree.index_of(parent, child) else {
        return Err(report(tree, ErrorKind::NotAChild { parent_kind }, parent.into()));
    };
    let role = roles::role_at(tree, parent, idx);

    if let Some(role) = role {
        if is_load_bearing(tree, parent, role) {
            return Err(report(
                tree,
                ErrorKind::LoadBearingChild {
                    role: Some(role),
                    parent_kind,
                },
                child,
            ));
        }

        // Roles with a defined replacement or cascade fixup.
        match (parent_kind, role) {
            (NodeKind::Method, Role::Body) => {
                return Ok(replace_body_with_semicolon(tree, parent, child));
            }
            (NodeKind::ExpressionStatement, Role::Expression)
            | (NodeKind::BlockStatement, Role::Body)
            | (NodeKind::ClassInitializer, Role::Body)
            | (NodeKind::NameValuePair, Role::Value) => {
                // The construct cannot stand without this part; deleting
                // it cascades to the construct itself.
                if let Some(grandparent) = tree.parent(parent) {
                    return delete(tree, grandparent, parent.into());
                }
            }
            (NodeKind::DeclarationStatement, Role::Declarator) => {
                let declarators = roles::children_by_role(tree, parent, Role::Declarator);
                if declarators.len() == 1 {
                    // Sole declarator: the statement goes with it.
                    if let Some(grandparent) = tree.parent(parent) {
                        return delete(tree, grandparent, parent.into());
                    }
                } else if declarators.first() == Some(&child) {
                    reattach_shared_prefix(tree, child, declarators[1]);
                }
            }
            _ => {}
        }
    }

    // Listed children surrender one adjacent separator first — the
    // following one preferred, the preceding one as fallback — while the
    // neighbors are still stable.
    repair::run(
        tree,
        [RepairAction::RemoveAdjacentSeparator { parent, child }],
    );

    let idx = tree
        .index_of(parent, child)
        .expect("child still present after separator removal");
    let removed = tree.detach_at(parent, idx);
    tree.free_subtree(removed);

    let mut post = vec![
        RepairAction::TidyWhitespace(parent),
        RepairAction::DropBracketsIfEmpty(parent),
        RepairAction::RemoveListKeywordIfEmpty(parent),
    ];
    if parent_kind == NodeKind::ModifierList {
        post.push(RepairAction::SpaceOutModifiers(parent));
    }
    post.push(RepairAction::Verify(parent));
    repair::run(tree, post);
    Ok(())
}

/// Children whose absence leaves the construct unrepairable: refused.
fn is_load_bearing(tree: &Tree, parent: NodeId, role: Role) -> bool {
    let parent_kind = tree.kind(parent);
    match role {
        // Required structure with no minimal filler.
        Role::ParameterList | Role::ModifierList | Role::Name | Role::Keyword => true,
        Role::Callee | Role::ArgumentList => parent_kind == NodeKind::CallExpression,
        Role::Condition => true,
        Role::OperationSign | Role::LeftOperand | Role::RightOperand => true,
        Role::Array => true,
        // Brackets are repairer-owned; callers never delete them.
        Role::LParen | Role::RParen | Role::LBrace | Role::RBrace | Role::LAngle
        | Role::RAngle => bracket_policy(parent_kind).is_some(),
        // The enum delimiter is load-bearing while members follow it.
        Role::ConstantListDelimiter => {
            !roles::children_by_role(tree, parent, Role::Member).is_empty()
        }
        _ => false,
    }
}

/// Replaces a method body with the minimal valid filler — a bare
/// semicolon — rather than leaving the declaration incomplete.
fn replace_body_with_semicolon(tree: &mut Tree, method: NodeId, body: ElementId) {
    let idx = tree
        .index_of(method, body)
        .expect("body is a child of the method");
    let removed = tree.detach_at(method, idx);
    tree.free_subtree(removed);
    // The body usually follows a space; the semicolon hugs the header.
    let mut at = idx;
    if at > 0
        && tree
            .elem_token_kind(tree.children(method)[at - 1])
            .is_some_and(|k| k == TokenKind::Whitespace)
    {
        let ws = tree.detach_at(method, at - 1);
        tree.free_subtree(ws);
        at -= 1;
    }
    let semi = tree.synth_token(TokenKind::Semicolon);
    tree.splice_in(method, at, &[semi.into()]);
    repair::run(tree, [RepairAction::Verify(method)]);
}

/// When the first declarator of `T a, b, c;` goes away, the shared
/// modifier/type prefix is copied onto the new first declarator so it
/// stands alone as a full declaration.
fn reattach_shared_prefix(tree: &mut Tree, first: ElementId, next: ElementId) {
    let (Some(first), Some(next)) = (first.node(), next.node()) else {
        return;
    };
    if roles::child_by_role(tree, next, Role::Type).is_some() {
        return;
    }
    let mut prefix: Vec<ElementId> = Vec::new();
    if let Some(modifiers) = roles::child_by_role(tree, first, Role::ModifierList) {
        let copied = copy::copy_subtree(tree, modifiers);
        let nonempty = copied
            .node()
            .is_some_and(|n| tree.significant_children(n).next().is_some());
        prefix.push(copied);
        if nonempty {
            let ws = tree.create_token(TokenKind::Whitespace, " ");
            prefix.push(ws.into());
        }
    }
    if let Some(ty) = roles::child_by_role(tree, first, Role::Type) {
        prefix.push(copy::copy_subtree(tree, ty));
        let ws = tree.create_token(TokenKind::Whitespace, " ");
        prefix.push(ws.into());
    }
    if prefix.is_empty() {
        return;
    }
    tree.splice_in(next, 0, &prefix);
}
