//! Separator and bracket policies, per parent kind.
//!
//! A separator policy says which children of a parent count as "listed"
//! and which token separates them; the invariant is exactly one separator
//! between adjacent listed children and none outside their span. A
//! bracket policy names the bookend pair and whether it survives the list
//! emptying out (most pairs do; angle-bracket lists drop theirs).

use crate::syntax::{ClassFlavor, NodeKind, Role, TokenKind};
use crate::tree::{ElementId, NodeId, Tree};

/// Separator rule for one parent kind.
pub(crate) struct SeparatorPolicy {
    pub separator: TokenKind,
    listed: fn(&Tree, ElementId) -> bool,
}

impl SeparatorPolicy {
    /// True if `elem` counts as listed content under this policy.
    pub(crate) fn is_listed(&self, tree: &Tree, elem: ElementId) -> bool {
        (self.listed)(tree, elem)
    }
}

fn listed_parameter(tree: &Tree, elem: ElementId) -> bool {
    tree.elem_node_kind(elem) == Some(NodeKind::Parameter)
}

fn listed_expression(tree: &Tree, elem: ElementId) -> bool {
    tree.elem_node_kind(elem).is_some_and(NodeKind::is_expression)
}

fn listed_annotation_arg(tree: &Tree, elem: ElementId) -> bool {
    match tree.elem_node_kind(elem) {
        Some(NodeKind::NameValuePair) => true,
        Some(kind) => kind.is_expression(),
        None => false,
    }
}

fn listed_type_parameter(tree: &Tree, elem: ElementId) -> bool {
    tree.elem_node_kind(elem) == Some(NodeKind::TypeParameter)
}

fn listed_type_element(tree: &Tree, elem: ElementId) -> bool {
    tree.elem_node_kind(elem) == Some(NodeKind::TypeElement)
}

fn listed_reference(tree: &Tree, elem: ElementId) -> bool {
    tree.elem_node_kind(elem) == Some(NodeKind::CodeReference)
}

fn listed_declarator(tree: &Tree, elem: ElementId) -> bool {
    tree.elem_node_kind(elem) == Some(NodeKind::LocalVariable)
}

fn listed_enum_constant(tree: &Tree, elem: ElementId) -> bool {
    tree.elem_node_kind(elem) == Some(NodeKind::EnumConstant)
}

/// The separator policy of `parent`, if its kind declares one.
///
/// Enum bodies are the one flavor-dependent case: a plain class body has
/// no separator policy, an enum body comma-separates its constants.
pub(crate) fn separator_policy(tree: &Tree, parent: NodeId) -> Option<SeparatorPolicy> {
    let listed: fn(&Tree, ElementId) -> bool = match tree.kind(parent) {
        NodeKind::ParameterList => listed_parameter,
        NodeKind::ExpressionList | NodeKind::ArrayInitializer => listed_expression,
        NodeKind::AnnotationParamList => listed_annotation_arg,
        NodeKind::TypeParameterList => listed_type_parameter,
        NodeKind::ReferenceParameterList => listed_type_element,
        NodeKind::ExtendsList | NodeKind::ImplementsList | NodeKind::ThrowsList => {
            listed_reference
        }
        NodeKind::DeclarationStatement => listed_declarator,
        NodeKind::Class if tree.class_flavor(parent) == ClassFlavor::Enum => {
            listed_enum_constant
        }
        _ => return None,
    };
    Some(SeparatorPolicy {
        separator: TokenKind::Comma,
        listed,
    })
}

/// Bracket rule for one parent kind.
pub(crate) struct BracketPolicy {
    pub open: TokenKind,
    pub close: TokenKind,
    pub open_role: Role,
    pub close_role: Role,
    /// Whether the pair is removed when the last listed child goes.
    pub drop_when_empty: bool,
}

/// The bracket policy of a parent kind, if it declares one.
pub(crate) fn bracket_policy(kind: NodeKind) -> Option<BracketPolicy> {
    let policy = match kind {
        NodeKind::ParameterList | NodeKind::ExpressionList | NodeKind::AnnotationParamList => {
            BracketPolicy {
                open: TokenKind::LParen,
                close: TokenKind::RParen,
                open_role: Role::LParen,
                close_role: Role::RParen,
                drop_when_empty: false,
            }
        }
        NodeKind::TypeParameterList | NodeKind::ReferenceParameterList => BracketPolicy {
            open: TokenKind::Lt,
            close: TokenKind::Gt,
            open_role: Role::LAngle,
            close_role: Role::RAngle,
            drop_when_empty: true,
        },
        NodeKind::CodeBlock | NodeKind::ArrayInitializer | NodeKind::Class => BracketPolicy {
            open: TokenKind::LBrace,
            close: TokenKind::RBrace,
            open_role: Role::LBrace,
            close_role: Role::RBrace,
            drop_when_empty: false,
        },
        _ => return None,
    };
    Some(policy)
}

/// The leading keyword of a reference list kind, synthesized with the
/// first reference and removed with the last.
pub(crate) fn list_keyword(kind: NodeKind) -> Option<TokenKind> {
    match kind {
        NodeKind::ExtendsList => Some(TokenKind::ExtendsKw),
        NodeKind::ImplementsList => Some(TokenKind::ImplementsKw),
        NodeKind::ThrowsList => Some(TokenKind::ThrowsKw),
        _ => None,
    }
}
