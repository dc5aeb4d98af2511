//! Role classification for statement-shaped parents.

use crate::syntax::{NodeKind, Role, TokenKind};
use crate::tree::{ElementId, NodeId, Tree};

/// Classifies the child at `idx` of a statement-shaped `parent`.
pub(crate) fn role_at(
    tree: &Tree,
    parent: NodeId,
    idx: usize,
    child: ElementId,
) -> Option<Role> {
    let node_kind = tree.elem_node_kind(child);
    let token_kind = tree.elem_token_kind(child);

    match tree.kind(parent) {
        NodeKind::CodeBlock => match node_kind {
            Some(kind) if kind.is_statement() => Some(Role::Statement),
            _ => match token_kind? {
                TokenKind::LBrace => Some(Role::LBrace),
                TokenKind::RBrace => Some(Role::RBrace),
                _ => None,
            },
        },

        NodeKind::BlockStatement => match node_kind? {
            NodeKind::CodeBlock => Some(Role::Body),
            _ => None,
        },

        NodeKind::DeclarationStatement => match node_kind {
            Some(NodeKind::LocalVariable) => Some(Role::Declarator),
            _ => match token_kind? {
                TokenKind::Comma => Some(Role::Comma),
                TokenKind::Semicolon => Some(Role::Semicolon),
                _ => None,
            },
        },

        NodeKind::ExpressionStatement => match node_kind {
            Some(kind) if kind.is_expression() => Some(Role::Expression),
            _ => match token_kind? {
                TokenKind::Semicolon => Some(Role::Semicolon),
                _ => None,
            },
        },

        NodeKind::IfStatement => {
            if let Some(kind) = node_kind {
                if kind.is_expression() {
                    return Some(Role::Condition);
                }
                if kind.is_statement() {
                    // First statement child is the then-branch, the next
                    // one the else-branch; position decides the role.
                    let position = tree
                        .significant_children(parent)
                        .filter(|&(_, c)| {
                            tree.elem_node_kind(c).is_some_and(NodeKind::is_statement)
                        })
                        .position(|(i, _)| i == idx)?;
                    return match position {
                        0 => Some(Role::ThenBranch),
                        1 => Some(Role::ElseBranch),
                        _ => None,
                    };
                }
                return None;
            }
            match token_kind? {
                TokenKind::IfKw => Some(Role::Keyword),
                TokenKind::ElseKw => Some(Role::ElseKeyword),
                TokenKind::LParen => Some(Role::LParen),
                TokenKind::RParen => Some(Role::RParen),
                _ => None,
            }
        }

        NodeKind::ReturnStatement => match node_kind {
            Some(kind) if kind.is_expression() => Some(Role::ReturnValue),
            _ => match token_kind? {
                TokenKind::ReturnKw => Some(Role::Keyword),
                TokenKind::Semicolon => Some(Role::Semicolon),
                _ => None,
            },
        },

        _ => None,
    }
}
