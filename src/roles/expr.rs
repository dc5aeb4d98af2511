//! Role classification for expression-shaped parents and type elements.
//!
//! Several kinds here assign roles by position among same-kind siblings:
//! the first expression under a binary node is the left operand and the
//! last the right; the first expression under an array access is the
//! array, everything after it an index.

use crate::syntax::{NodeKind, Role, TokenKind};
use crate::tree::{ElementId, NodeId, Tree};

/// Classifies the child at `idx` of an expression-shaped `parent`.
pub(crate) fn role_at(
    tree: &Tree,
    parent: NodeId,
    idx: usize,
    child: ElementId,
) -> Option<Role> {
    let node_kind = tree.elem_node_kind(child);
    let token_kind = tree.elem_token_kind(child);

    match tree.kind(parent) {
        NodeKind::TypeElement => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Reference),
            Some(NodeKind::TypeElement) => Some(Role::Type),
            _ => match token_kind? {
                TokenKind::PrimitiveType => Some(Role::Keyword),
                TokenKind::LBracket => Some(Role::LBracket),
                TokenKind::RBracket => Some(Role::RBracket),
                _ => None,
            },
        },

        NodeKind::CodeReference => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Qualifier),
            Some(NodeKind::ReferenceParameterList) => Some(Role::ReferenceParameterList),
            _ => match token_kind? {
                TokenKind::Identifier => Some(Role::Name),
                TokenKind::Dot => Some(Role::Dot),
                _ => None,
            },
        },

        NodeKind::LiteralExpression => match token_kind {
            Some(kind) if kind.is_literal_value() => Some(Role::Value),
            _ => None,
        },

        NodeKind::ReferenceExpression => match node_kind {
            Some(kind) if kind.is_expression() => Some(Role::Qualifier),
            Some(NodeKind::ReferenceParameterList) => Some(Role::ReferenceParameterList),
            _ => match token_kind? {
                TokenKind::Identifier => Some(Role::Name),
                TokenKind::Dot => Some(Role::Dot),
                _ => None,
            },
        },

        NodeKind::BinaryExpression | NodeKind::AssignmentExpression => {
            if node_kind.is_some_and(NodeKind::is_expression) {
                return match expression_position(tree, parent, idx)? {
                    ExprPosition::First => Some(Role::LeftOperand),
                    ExprPosition::Last => Some(Role::RightOperand),
                    ExprPosition::Middle => None,
                };
            }
            match token_kind? {
                kind if kind.is_operation_sign() || kind == TokenKind::Eq => {
                    Some(Role::OperationSign)
                }
                _ => None,
            }
        }

        NodeKind::ArrayAccessExpression => {
            if node_kind.is_some_and(NodeKind::is_expression) {
                return match expression_position(tree, parent, idx)? {
                    ExprPosition::First => Some(Role::Array),
                    _ => Some(Role::Index),
                };
            }
            match token_kind? {
                TokenKind::LBracket => Some(Role::LBracket),
                TokenKind::RBracket => Some(Role::RBracket),
                _ => None,
            }
        }

        NodeKind::CallExpression => match node_kind? {
            NodeKind::ReferenceExpression => Some(Role::Callee),
            NodeKind::ExpressionList => Some(Role::ArgumentList),
            _ => None,
        },

        NodeKind::NewExpression => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Reference),
            Some(NodeKind::ExpressionList) => Some(Role::ArgumentList),
            _ => match token_kind? {
                TokenKind::NewKw => Some(Role::Keyword),
                _ => None,
            },
        },

        NodeKind::ParenthesizedExpression => match node_kind {
            Some(kind) if kind.is_expression() => Some(Role::Expression),
            _ => match token_kind? {
                TokenKind::LParen => Some(Role::LParen),
                TokenKind::RParen => Some(Role::RParen),
                _ => None,
            },
        },

        _ => None,
    }
}

enum ExprPosition {
    First,
    Middle,
    Last,
}

/// Position of the child at `idx` among its parent's expression-kind
/// children. A lone expression counts as `First`.
fn expression_position(tree: &Tree, parent: NodeId, idx: usize) -> Option<ExprPosition> {
    let expr_indices: Vec<usize> = tree
        .significant_children(parent)
        .filter(|&(_, c)| tree.elem_node_kind(c).is_some_and(NodeKind::is_expression))
        .map(|(i, _)| i)
        .collect();
    let position = expr_indices.iter().position(|&i| i == idx)?;
    if position == 0 {
        Some(ExprPosition::First)
    } else if position == expr_indices.len() - 1 {
        Some(ExprPosition::Last)
    } else {
        Some(ExprPosition::Middle)
    }
}
