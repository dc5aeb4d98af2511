//! Role classification for list-shaped parents.
//!
//! These parents share one shape — optional bookends, listed children,
//! separating commas — but differ in which kinds count as listed and
//! which tokens bookend them. That knowledge is centralized in the edit
//! policies; role classification here only names the parts.

use crate::syntax::{NodeKind, Role, TokenKind};
use crate::tree::{ElementId, NodeId, Tree};

/// Classifies the child at `idx` of a list-shaped `parent`.
pub(crate) fn role_at(
    tree: &Tree,
    parent: NodeId,
    _idx: usize,
    child: ElementId,
) -> Option<Role> {
    let node_kind = tree.elem_node_kind(child);
    let token_kind = tree.elem_token_kind(child);

    match tree.kind(parent) {
        NodeKind::ParameterList => match node_kind {
            Some(NodeKind::Parameter) => Some(Role::Parameter),
            _ => paren_or_comma(token_kind),
        },

        NodeKind::ExpressionList => match node_kind {
            Some(kind) if kind.is_expression() => Some(Role::Argument),
            _ => paren_or_comma(token_kind),
        },

        NodeKind::AnnotationParamList => match node_kind {
            Some(NodeKind::NameValuePair) => Some(Role::Argument),
            // A not-yet-canonicalized positional value.
            Some(kind) if kind.is_expression() => Some(Role::Argument),
            _ => paren_or_comma(token_kind),
        },

        NodeKind::TypeParameterList => match node_kind {
            Some(NodeKind::TypeParameter) => Some(Role::TypeParameter),
            _ => angle_or_comma(token_kind),
        },

        NodeKind::ReferenceParameterList => match node_kind {
            Some(NodeKind::TypeElement) => Some(Role::Type),
            _ => angle_or_comma(token_kind),
        },

        NodeKind::ExtendsList | NodeKind::ImplementsList | NodeKind::ThrowsList => {
            match node_kind {
                Some(NodeKind::CodeReference) => Some(Role::Reference),
                _ => match token_kind? {
                    TokenKind::ExtendsKw | TokenKind::ImplementsKw | TokenKind::ThrowsKw => {
                        Some(Role::Keyword)
                    }
                    TokenKind::Comma => Some(Role::Comma),
                    _ => None,
                },
            }
        }

        NodeKind::ArrayInitializer => match node_kind {
            Some(kind) if kind.is_expression() => Some(Role::Element),
            _ => match token_kind? {
                TokenKind::LBrace => Some(Role::LBrace),
                TokenKind::RBrace => Some(Role::RBrace),
                TokenKind::Comma => Some(Role::Comma),
                _ => None,
            },
        },

        _ => None,
    }
}

fn paren_or_comma(token_kind: Option<TokenKind>) -> Option<Role> {
    match token_kind? {
        TokenKind::LParen => Some(Role::LParen),
        TokenKind::RParen => Some(Role::RParen),
        TokenKind::Comma => Some(Role::Comma),
        _ => None,
    }
}

fn angle_or_comma(token_kind: Option<TokenKind>) -> Option<Role> {
    match token_kind? {
        TokenKind::Lt => Some(Role::LAngle),
        TokenKind::Gt => Some(Role::RAngle),
        TokenKind::Comma => Some(Role::Comma),
        _ => None,
    }
}
