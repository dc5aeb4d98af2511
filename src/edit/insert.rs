//! The insert path of the invariant repairer.
//!
//! Steps run in a fixed order: preconditions and role classification
//! (no mutation yet, so a refusal leaves the parent untouched), bracket
//! and keyword ensures, canonicalization of degenerate forms,
//! normalization of the incoming subtree, anchor resolution, the raw
//! splice, separator repair, and finally post-condition verification.

use crate::errors::{report, ArborError, ErrorKind};
use crate::roles;
use crate::syntax::{ClassFlavor, NodeKind, Role};
use crate::tree::{text, ElementId, NodeId, Tree};

use super::anchor::{default_index, Anchor};
use super::normalize;
use super::policy::bracket_policy;
use super::repair::{self, RepairAction};

/// Inserts a detached sibling run under `parent`, repairing invariants.
///
/// Returns the first attached element — identity-stable, so callers can
/// chain further edits from it.
pub(crate) fn insert(
    tree: &mut Tree,
    parent: NodeId,
    new: &[ElementId],
    anchor: Option<Anchor>,
) -> Result<ElementId, ArborError> {
    let parent_kind = tree.kind(parent);

    // ---- preconditions; nothing mutates until all of them pass ----

    let Some(&first) = new.first() else {
        return Err(report(
            tree,
            ErrorKind::EmptyInsertion { parent_kind },
            parent.into(),
        ));
    };
    if !tree.is_attached(parent.into()) {
        return Err(report(
            tree,
            ErrorKind::DetachedParent { parent_kind },
            parent.into(),
        ));
    }
    for &elem in new {
        if tree.parent_of(elem).is_some() {
            return Err(report(
                tree,
                ErrorKind::AlreadyAttached {
                    element: text::text_of(tree, elem),
                },
                elem,
            ));
        }
    }
    if let Some(anchor) = anchor {
        if tree.index_of(parent, anchor.reference).is_none() {
            return Err(report(tree, ErrorKind::NotAChild { parent_kind }, parent.into()));
        }
    }

    let run_roles = classify_run(tree, parent, new)?;

    // ---- pre-splice repairs ----

    let inserting_member = run_roles.contains(&Role::Member);
    let inserting_constant = run_roles.contains(&Role::EnumConstant);
    let inserting_listed = roles_require_brackets(&run_roles, parent_kind);

    if inserting_listed {
        repair::ensure_brackets(tree, parent);
    }
    if run_roles.contains(&Role::Reference) {
        repair::run(tree, [RepairAction::EnsureListKeyword(parent)]);
    }
    if parent_kind == NodeKind::Class
        && tree.class_flavor(parent) == ClassFlavor::Enum
        && (inserting_member
            || !roles::children_by_role(tree, parent, Role::Member).is_empty())
    {
        repair::ensure_constant_delimiter(tree, parent);
    }
    if parent_kind == NodeKind::Method && run_roles.contains(&Role::Body) {
        repair::run(tree, [RepairAction::DeleteTrailingSemicolon(parent)]);
    }
    if parent_kind == NodeKind::IfStatement && run_roles.contains(&Role::ElseBranch) {
        repair::run(tree, [RepairAction::EnsureElseKeyword(parent)]);
    }
    if parent_kind == NodeKind::AnnotationParamList && run_roles.contains(&Role::Argument) {
        normalize::canonicalize_annotation_params(tree, parent);
    }
    if parent_kind == NodeKind::Class && (inserting_member || inserting_constant) {
        for &elem in new {
            normalize::normalize_incoming_member(tree, parent, elem);
        }
    }

    // ---- anchor resolution and the raw splice ----

    let index = anchor
        .and_then(|a| a.resolve(tree, parent))
        .unwrap_or_else(|| default_index(tree, parent, new));
    tree.splice_in(parent, index, new);

    // ---- post-splice repairs ----

    let mut post = vec![RepairAction::SeparatorAroundRun {
        parent,
        first,
        last: *new.last().expect("run is non-empty"),
    }];
    if parent_kind == NodeKind::ModifierList {
        post.push(RepairAction::SpaceOutModifiers(parent));
    }
    post.push(RepairAction::Verify(parent));
    repair::run(tree, post);

    Ok(first)
}

/// Classifies every non-trivia element of the run and rejects unique-role
/// conflicts — against existing children and within the run itself.
pub(crate) fn classify_run(
    tree: &Tree,
    parent: NodeId,
    new: &[ElementId],
) -> Result<Vec<Role>, ArborError> {
    let parent_kind = tree.kind(parent);
    let mut claimed: Vec<Role> = Vec::new();
    for &elem in new {
        if tree.is_trivia(elem) {
            continue;
        }
        let Some(mut role) = roles::classify_incoming(tree, parent, elem) else {
            return Err(report(
                tree,
                ErrorKind::NoAdmissibleRole {
                    parent_kind,
                    element: text::text_of(tree, elem),
                },
                elem,
            ));
        };
        if roles::is_unique_in(role, parent_kind) {
            // Position-sensitive roles shift along the run: the second
            // expression offered to a binary node is the right operand.
            if claimed.contains(&role) {
                match promote(parent_kind, role) {
                    Some(next) if !claimed.contains(&next) => role = next,
                    _ => {
                        return Err(role_conflict(tree, parent, role, elem));
                    }
                }
            }
            if let Some(existing) = roles::child_by_role(tree, parent, role) {
                return Err(report(
                    tree,
                    ErrorKind::RoleConflict {
                        role,
                        parent_kind,
                        occupant: text::text_of(tree, existing),
                    },
                    existing,
                ));
            }
            claimed.push(role);
        } else if !claimed.contains(&role) {
            claimed.push(role);
        }
    }

    // A method body and a trailing semicolon are mutually exclusive; the
    // body wins (the ensure step removes the semicolon), but a semicolon
    // must not be inserted next to an existing body.
    if parent_kind == NodeKind::Method
        && claimed.contains(&Role::Semicolon)
        && roles::child_by_role(tree, parent, Role::Body).is_some()
    {
        return Err(role_conflict(tree, parent, Role::Semicolon, new[0]));
    }

    Ok(claimed)
}

fn role_conflict(tree: &Tree, parent: NodeId, role: Role, at: ElementId) -> ArborError {
    let occupant = roles::child_by_role(tree, parent, role)
        .map(|e| text::text_of(tree, e))
        .unwrap_or_else(|| "another incoming element".into());
    report(
        tree,
        ErrorKind::RoleConflict {
            role,
            parent_kind: tree.kind(parent),
            occupant,
        },
        at,
    )
}

/// Successor of a position-sensitive unique role along an insert run.
fn promote(parent_kind: NodeKind, role: Role) -> Option<Role> {
    match (parent_kind, role) {
        (
            NodeKind::BinaryExpression | NodeKind::AssignmentExpression,
            Role::LeftOperand,
        ) => Some(Role::RightOperand),
        (NodeKind::ArrayAccessExpression, Role::Array) => Some(Role::Index),
        (NodeKind::IfStatement, Role::ThenBranch) => Some(Role::ElseBranch),
        _ => None,
    }
}

/// Whether the classified run carries content that requires the parent's
/// brackets to exist before anchoring.
fn roles_require_brackets(roles: &[Role], parent_kind: NodeKind) -> bool {
    if bracket_policy(parent_kind).is_none() {
        return false;
    }
    roles.iter().any(|role| {
        matches!(
            role,
            Role::Parameter
                | Role::Argument
                | Role::TypeParameter
                | Role::Type
                | Role::Element
                | Role::Statement
                | Role::Member
                | Role::EnumConstant
                | Role::Comma
        )
    })
}
