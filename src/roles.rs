//! The role table: which child plays which grammatical part.
//!
//! `role_of` classifies an existing parent→child edge; `child_by_role`
//! and `children_by_role` are the inverse queries. Both directions are
//! pure functions of the parent's kind and current children, so they are
//! safe during read and mutation phases alike. The inverse law —
//! `role_of(p, c) == Some(r)` implies `c` is among `children_by_role(p,
//! r)` — holds by construction, because the inverse queries are scans
//! over `role_of` itself.
//!
//! Per-kind classification lives in the submodules, grouped the way the
//! grammar groups: declarations, statements, expressions, lists.

pub mod decl;
pub mod expr;
pub mod lists;
pub mod stmt;

use crate::syntax::{NodeKind, Role};
use crate::tree::{ElementId, NodeId, Tree};

/// The role `child` plays inside `parent`, or `None`.
///
/// `None` is the normal answer for trivia, for stray elements the
/// grammar tolerates but does not name, and for elements that are not
/// children of `parent` at all. Callers must handle absence; optional
/// grammar parts (a missing `else` branch) are not errors.
pub fn role_of(tree: &Tree, parent: NodeId, child: ElementId) -> Option<Role> {
    let idx = tree.index_of(parent, child)?;
    role_at(tree, parent, idx)
}

/// Role of the child at position `idx` of `parent`.
pub(crate) fn role_at(tree: &Tree, parent: NodeId, idx: usize) -> Option<Role> {
    let child = *tree.children(parent).get(idx)?;
    if tree.is_trivia(child) {
        return None;
    }
    match tree.kind(parent) {
        NodeKind::File
        | NodeKind::PackageStatement
        | NodeKind::ImportList
        | NodeKind::ImportStatement
        | NodeKind::Class
        | NodeKind::EnumConstant
        | NodeKind::Field
        | NodeKind::Method
        | NodeKind::ClassInitializer
        | NodeKind::ModifierList
        | NodeKind::Annotation
        | NodeKind::NameValuePair
        | NodeKind::Parameter
        | NodeKind::LocalVariable
        | NodeKind::TypeParameter => decl::role_at(tree, parent, idx, child),

        NodeKind::CodeBlock
        | NodeKind::BlockStatement
        | NodeKind::DeclarationStatement
        | NodeKind::ExpressionStatement
        | NodeKind::IfStatement
        | NodeKind::ReturnStatement => stmt::role_at(tree, parent, idx, child),

        NodeKind::TypeElement
        | NodeKind::CodeReference
        | NodeKind::LiteralExpression
        | NodeKind::ReferenceExpression
        | NodeKind::BinaryExpression
        | NodeKind::AssignmentExpression
        | NodeKind::ArrayAccessExpression
        | NodeKind::CallExpression
        | NodeKind::NewExpression
        | NodeKind::ParenthesizedExpression => expr::role_at(tree, parent, idx, child),

        NodeKind::ParameterList
        | NodeKind::ExpressionList
        | NodeKind::AnnotationParamList
        | NodeKind::TypeParameterList
        | NodeKind::ReferenceParameterList
        | NodeKind::ExtendsList
        | NodeKind::ImplementsList
        | NodeKind::ThrowsList
        | NodeKind::ArrayInitializer => lists::role_at(tree, parent, idx, child),
    }
}

/// The unique child in `role`, or the first match for repeated roles.
pub fn child_by_role(tree: &Tree, parent: NodeId, role: Role) -> Option<ElementId> {
    role_index(tree, parent, role).map(|idx| tree.children(parent)[idx])
}

/// All children in `role`, in document order.
pub fn children_by_role(tree: &Tree, parent: NodeId, role: Role) -> Vec<ElementId> {
    (0..tree.children(parent).len())
        .filter(|&idx| role_at(tree, parent, idx) == Some(role))
        .map(|idx| tree.children(parent)[idx])
        .collect()
}

/// Child position of the first match for `role`.
pub(crate) fn role_index(tree: &Tree, parent: NodeId, role: Role) -> Option<usize> {
    (0..tree.children(parent).len()).find(|&idx| role_at(tree, parent, idx) == Some(role))
}

/// Whether `role` admits at most one child under a parent of this kind.
///
/// Cardinality is a property of the (parent kind, role) pair: a
/// `Reference` is unique under an annotation but repeated under the
/// extends/implements/throws lists, and a `Type` is unique everywhere
/// except as a type argument.
pub(crate) fn is_unique_in(role: Role, parent_kind: NodeKind) -> bool {
    match role {
        Role::Modifier
        | Role::Annotation
        | Role::Parameter
        | Role::Argument
        | Role::TypeParameter
        | Role::Member
        | Role::EnumConstant
        | Role::Import
        | Role::Declarator
        | Role::Statement
        | Role::Element
        | Role::Comma
        | Role::Index => false,
        Role::Reference => !matches!(
            parent_kind,
            NodeKind::ExtendsList | NodeKind::ImplementsList | NodeKind::ThrowsList
        ),
        Role::Type => parent_kind != NodeKind::ReferenceParameterList,
        _ => true,
    }
}

impl Tree {
    /// The role `child` plays inside `parent`; see [`role_of`].
    pub fn role_of(&self, parent: NodeId, child: impl Into<ElementId>) -> Option<Role> {
        role_of(self, parent, child.into())
    }

    /// The unique (or first) child in `role`; see [`child_by_role`].
    pub fn child_by_role(&self, parent: NodeId, role: Role) -> Option<ElementId> {
        child_by_role(self, parent, role)
    }

    /// All children in `role`, in document order.
    pub fn children_by_role(&self, parent: NodeId, role: Role) -> Vec<ElementId> {
        children_by_role(self, parent, role)
    }
}

/// The role an element *would* take if inserted under `parent` now.
///
/// This is the admissibility question the insert path asks before
/// splicing: `None` for a non-trivia element means the parent's grammar
/// has no slot for it. Position-sensitive roles classify against the
/// current occupancy (an expression offered to a binary node becomes the
/// left operand if none exists, else the right).
pub(crate) fn classify_incoming(tree: &Tree, parent: NodeId, elem: ElementId) -> Option<Role> {
    use crate::syntax::TokenKind;

    if tree.is_trivia(elem) {
        return None;
    }
    // Separator tokens are admissible wherever a separator policy rules:
    // parser-grade runs arrive with their commas in place.
    if let Some(policy) = crate::edit::policy::separator_policy(tree, parent) {
        if tree.elem_token_kind(elem) == Some(policy.separator) {
            return Some(Role::Comma);
        }
    }
    let node_kind = tree.elem_node_kind(elem);
    let token_kind = tree.elem_token_kind(elem);
    let is_expr = node_kind.is_some_and(NodeKind::is_expression);
    let is_stmt = node_kind.is_some_and(NodeKind::is_statement);

    match tree.kind(parent) {
        NodeKind::File => match node_kind {
            Some(NodeKind::PackageStatement) => Some(Role::PackageStatement),
            Some(NodeKind::ImportList) => Some(Role::ImportList),
            Some(NodeKind::Class) => Some(Role::Member),
            _ => None,
        },
        NodeKind::ImportList => match node_kind {
            Some(NodeKind::ImportStatement) => Some(Role::Import),
            _ => None,
        },
        NodeKind::PackageStatement | NodeKind::ImportStatement => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Reference),
            _ => None,
        },
        NodeKind::Class => match node_kind {
            Some(kind) if kind.is_member() => Some(Role::Member),
            Some(NodeKind::EnumConstant) => Some(Role::EnumConstant),
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::TypeParameterList) => Some(Role::TypeParameterList),
            Some(NodeKind::ExtendsList) => Some(Role::ExtendsList),
            Some(NodeKind::ImplementsList) => Some(Role::ImplementsList),
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
                _ => None,
            },
        },
        NodeKind::EnumConstant => match node_kind {
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::ExpressionList) => Some(Role::ArgumentList),
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
                _ => None,
            },
        },
        NodeKind::Field | NodeKind::LocalVariable => match node_kind {
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::TypeElement) => Some(Role::Type),
            Some(_) if is_expr => Some(Role::Initializer),
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
                Some(TokenKind::Eq) => Some(Role::Eq),
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
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
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
            _ => None,
        },
        NodeKind::NameValuePair => match node_kind {
            Some(_) if is_expr => Some(Role::Value),
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
                Some(TokenKind::Eq) => Some(Role::Eq),
                _ => None,
            },
        },
        NodeKind::Parameter => match node_kind {
            Some(NodeKind::ModifierList) => Some(Role::ModifierList),
            Some(NodeKind::TypeElement) => Some(Role::Type),
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
                _ => None,
            },
        },
        NodeKind::TypeParameter => match node_kind {
            Some(NodeKind::ExtendsList) => Some(Role::ExtendsList),
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
                _ => None,
            },
        },
        NodeKind::CodeBlock => {
            if is_stmt {
                Some(Role::Statement)
            } else {
                None
            }
        }
        NodeKind::BlockStatement => match node_kind {
            Some(NodeKind::CodeBlock) => Some(Role::Body),
            _ => None,
        },
        NodeKind::DeclarationStatement => match node_kind {
            Some(NodeKind::LocalVariable) => Some(Role::Declarator),
            _ => None,
        },
        NodeKind::ExpressionStatement => {
            if is_expr {
                Some(Role::Expression)
            } else {
                None
            }
        }
        NodeKind::IfStatement => {
            if is_expr {
                Some(Role::Condition)
            } else if is_stmt {
                // First statement slot is the then-branch.
                if crate::roles::child_by_role(tree, parent, Role::ThenBranch).is_none() {
                    Some(Role::ThenBranch)
                } else {
                    Some(Role::ElseBranch)
                }
            } else {
                None
            }
        }
        NodeKind::ReturnStatement => {
            if is_expr {
                Some(Role::ReturnValue)
            } else {
                None
            }
        }
        NodeKind::TypeElement => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Reference),
            Some(NodeKind::TypeElement) => Some(Role::Type),
            _ => match token_kind {
                Some(TokenKind::PrimitiveType) => Some(Role::Keyword),
                _ => None,
            },
        },
        NodeKind::CodeReference => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Qualifier),
            Some(NodeKind::ReferenceParameterList) => Some(Role::ReferenceParameterList),
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
                _ => None,
            },
        },
        NodeKind::LiteralExpression => match token_kind {
            Some(kind) if kind.is_literal_value() => Some(Role::Value),
            _ => None,
        },
        NodeKind::ReferenceExpression => match node_kind {
            Some(_) if is_expr => Some(Role::Qualifier),
            Some(NodeKind::ReferenceParameterList) => Some(Role::ReferenceParameterList),
            _ => match token_kind {
                Some(TokenKind::Identifier) => Some(Role::Name),
                _ => None,
            },
        },
        NodeKind::BinaryExpression | NodeKind::AssignmentExpression => {
            if is_expr {
                if child_by_role(tree, parent, Role::LeftOperand).is_none() {
                    Some(Role::LeftOperand)
                } else {
                    Some(Role::RightOperand)
                }
            } else {
                match token_kind {
                    Some(kind) if kind.is_operation_sign() || kind == TokenKind::Eq => {
                        Some(Role::OperationSign)
                    }
                    _ => None,
                }
            }
        }
        NodeKind::ArrayAccessExpression => {
            if is_expr {
                if child_by_role(tree, parent, Role::Array).is_none() {
                    Some(Role::Array)
                } else {
                    Some(Role::Index)
                }
            } else {
                None
            }
        }
        NodeKind::CallExpression => match node_kind {
            Some(NodeKind::ReferenceExpression) => Some(Role::Callee),
            Some(NodeKind::ExpressionList) => Some(Role::ArgumentList),
            _ => None,
        },
        NodeKind::NewExpression => match node_kind {
            Some(NodeKind::CodeReference) => Some(Role::Reference),
            Some(NodeKind::ExpressionList) => Some(Role::ArgumentList),
            _ => None,
        },
        NodeKind::ParenthesizedExpression => {
            if is_expr {
                Some(Role::Expression)
            } else {
                None
            }
        }
        NodeKind::ParameterList => match node_kind {
            Some(NodeKind::Parameter) => Some(Role::Parameter),
            _ => None,
        },
        NodeKind::ExpressionList => {
            if is_expr {
                Some(Role::Argument)
            } else {
                None
            }
        }
        NodeKind::AnnotationParamList => match node_kind {
            Some(NodeKind::NameValuePair) => Some(Role::Argument),
            // A bare expression is admitted as the single positional
            // value; canonicalization wraps it on the way in.
            Some(_) if is_expr => Some(Role::Argument),
            _ => None,
        },
        NodeKind::TypeParameterList => match node_kind {
            Some(NodeKind::TypeParameter) => Some(Role::TypeParameter),
            _ => None,
        },
        NodeKind::ReferenceParameterList => match node_kind {
            Some(NodeKind::TypeElement) => Some(Role::Type),
            _ => None,
        },
        NodeKind::ExtendsList | NodeKind::ImplementsList | NodeKind::ThrowsList => {
            match node_kind {
                Some(NodeKind::CodeReference) => Some(Role::Reference),
                _ => None,
            }
        }
        NodeKind::ArrayInitializer => {
            if is_expr {
                Some(Role::Element)
            } else {
                None
            }
        }
    }
}
