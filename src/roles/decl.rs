//! Role classification for declaration-shaped parents.

use crate::syntax::{ClassFlavor, NodeKind, Role, TokenKind};
use crate::tree::{ElementId, NodeId, Tree};

/// Classifies the child at `idx` of a declaration-shaped `parent`.
pub(crate) fn role_at(
    tree: &Tree,
    parent: NodeId,
    idx: usize,
    child: ElementId,
) -> Option<Role> {
    let node_kind = tree.elem_node_kind(child);
    let token_kind = tree.elem_token_kind(child);

    match tree.kind(parent) {
        NodeKind::File => match node_kind? {
            NodeKind::PackageStatement => Some(Role::PackageStatement),
            NodeKind::ImportList => Some(Role::ImportList),
            NodeKind::Class => Some(Role::Member),
            _ => None,
        },

        NodeKind::PackageStatement => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Reference),
            _ => match token_kind? {
                TokenKind::PackageKw => Some(Role::Keyword),
                TokenKind::Semicolon => Some(Role::Semicolon),
                _ => None,
            },
        },

        NodeKind::ImportList => match node_kind? {
            NodeKind::ImportStatement => Some(Role::Import),
            _ => None,
        },

        NodeKind::ImportStatement => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Reference),
            _ => match token_kind? {
                TokenKind::ImportKw => Some(Role::Keyword),
                TokenKind::StaticKw => Some(Role::StaticKeyword),
                TokenKind::Semicolon => Some(Role::Semicolon),
                _ => None,
            },
        },

        NodeKind::Class => class_role_at(tree, parent, idx, child),

        NodeKind::EnumConstant => match node_kind {
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::ExpressionList) => Some(Role::ArgumentList),
            _ => match token_kind? {
                TokenKind::Identifier => Some(Role::Name),
                _ => None,
            },
        },

        NodeKind::Field | NodeKind::LocalVariable => match node_kind {
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::TypeElement) => Some(Role::Type),
            Some(kind) if kind.is_expression() => Some(Role::Initializer),
            _ => match token_kind? {
                TokenKind::Identifier => Some(Role::Name),
                TokenKind::Eq => Some(Role::Eq),
                TokenKind::Semicolon => Some(Role::Semicolon),
                _ => None,
            },
        },

        NodeKind::Method => match node_kind {
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::TypeParameterList) => Some(Role::TypeParameterList),
            Some(NodeKind::TypeElement) => Some(Role::Type),
            Some(NodeKind::ParameterList) => Some(Role::ParameterList),
            Some(NodeKind::ThrowsList) => Some(Role::ThrowsList),
            Some(NodeKind::CodeBlock) => Some(Role::Body),
            _ => match token_kind? {
                TokenKind::Identifier => Some(Role::Name),
                TokenKind::Semicolon => Some(Role::Semicolon),
                _ => None,
            },
        },

        NodeKind::ClassInitializer => match node_kind {
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::CodeBlock) => Some(Role::Body),
            _ => None,
        },

        NodeKind::ModifierList => match node_kind {
            Some(NodeKind::Annotation) => Some(Role::Annotation),
            _ => match token_kind {
                Some(kind) if kind.is_modifier() => Some(Role::Modifier),
                _ => None,
            },
        },

        NodeKind::Annotation => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Reference),
            Some(NodeKind::AnnotationParamList) => Some(Role::ParameterList),
            _ => match token_kind? {
                TokenKind::At => Some(Role::At),
                _ => None,
            },
        },

        NodeKind::NameValuePair => match node_kind {
            Some(kind) if kind.is_expression() => Some(Role::Value),
            _ => match token_kind? {
                TokenKind::Identifier => Some(Role::Name),
                TokenKind::Eq => Some(Role::Eq),
                _ => None,
            },
        },

        NodeKind::Parameter => match node_kind {
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::TypeElement) => Some(Role::Type),
            _ => match token_kind? {
                TokenKind::Identifier => Some(Role::Name),
                _ => None,
            },
        },

        NodeKind::TypeParameter => match node_kind {
            Some(NodeKind::ExtendsList) => Some(Role::ExtendsList),
            _ => match token_kind? {
                TokenKind::Identifier => Some(Role::Name),
                _ => None,
            },
        },

        _ => None,
    }
}

/// Class bodies carry the richest micro-grammar: header parts, the brace
/// pair, members, and — for enums — a constants zone terminated by the
/// constant-list delimiter.
fn class_role_at(tree: &Tree, parent: NodeId, idx: usize, child: ElementId) -> Option<Role> {
    if let Some(node_kind) = tree.elem_node_kind(child) {
        return match node_kind {
            NodeKind::ModifierList => Some(Role::ModifierList),
            NodeKind::TypeParameterList => Some(Role::TypeParameterList),
            NodeKind::ExtendsList => Some(Role::ExtendsList),
            NodeKind::ImplementsList => Some(Role::ImplementsList),
            NodeKind::EnumConstant => Some(Role::EnumConstant),
            kind if kind.is_member() => Some(Role::Member),
            _ => None,
        };
    }
    match tree.elem_token_kind(child)? {
        TokenKind::ClassKw | TokenKind::InterfaceKw | TokenKind::EnumKw => Some(Role::Keyword),
        TokenKind::Identifier => {
            // Only the declaration name identifier is named; it is the
            // first identifier token directly under the class.
            let first_ident = tree.significant_children(parent).find(|&(_, c)| {
                tree.elem_token_kind(c) == Some(TokenKind::Identifier)
            });
            match first_ident {
                Some((name_idx, _)) if name_idx == idx => Some(Role::Name),
                _ => None,
            }
        }
        TokenKind::LBrace => Some(Role::LBrace),
        TokenKind::RBrace => Some(Role::RBrace),
        TokenKind::Comma => Some(Role::Comma),
        TokenKind::Semicolon => {
            // In an enum body, the first semicolon between the braces is
            // the constant-list delimiter; stray semicolons are unnamed.
            if tree.class_flavor(parent) != ClassFlavor::Enum {
                return None;
            }
            let lbrace = crate::roles::role_index(tree, parent, Role::LBrace)?;
            let first_semi = tree
                .significant_children(parent)
                .find(|&(i, c)| {
                    i > lbrace && tree.elem_token_kind(c) == Some(TokenKind::Semicolon)
                })
                .map(|(i, _)| i)?;
            (first_semi == idx).then_some(Role::ConstantListDelimiter)
        }
        _ => None,
    }
}
