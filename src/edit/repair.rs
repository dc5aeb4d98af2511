//! The invariant repairer: worklist actions around the raw splice.
//!
//! Cascading repair is modeled as an explicit queue of pending actions
//! processed to a fixed point rather than recursion through the public
//! API, so the ordering of kind-specific fixups stays auditable and each
//! action is testable in isolation. Every queue ends with a `Verify` of
//! the mutated parent: a post-condition failure there is corruption and
//! panics, it is never repaired over.

use std::collections::VecDeque;

use crate::errors::invariant_corruption;
use crate::roles;
use crate::syntax::{ClassFlavor, NodeKind, Role, TokenKind};
use crate::tree::{ElementId, NodeId, Tree};

use super::policy::{bracket_policy, list_keyword, separator_policy};

/// One pending repair step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RepairAction {
    /// Synthesize missing bookend tokens for a bracketed parent.
    EnsureBrackets(NodeId),
    /// Synthesize the leading keyword of a reference list.
    EnsureListKeyword(NodeId),
    /// Remove the leading keyword once a reference list is empty.
    RemoveListKeywordIfEmpty(NodeId),
    /// Synthesize the enum constant-list delimiter.
    EnsureConstantDelimiter(NodeId),
    /// Restore the separator invariant around a freshly spliced run.
    SeparatorAroundRun {
        parent: NodeId,
        first: ElementId,
        last: ElementId,
    },
    /// Remove one separator adjacent to a child about to be deleted;
    /// the following separator is preferred, the preceding one is the
    /// fallback.
    RemoveAdjacentSeparator { parent: NodeId, child: ElementId },
    /// Drop the bookends of a drop-when-empty parent with no content.
    DropBracketsIfEmpty(NodeId),
    /// Remove the trailing semicolon of a method gaining a body.
    DeleteTrailingSemicolon(NodeId),
    /// Re-space a modifier list so keywords stay lexically separate.
    SpaceOutModifiers(NodeId),
    /// Synthesize the `else` keyword ahead of an incoming else branch.
    EnsureElseKeyword(NodeId),
    /// Collapse whitespace artifacts a structural edit left behind.
    TidyWhitespace(NodeId),
    /// Check the mutated parent's post-conditions; panics on failure.
    Verify(NodeId),
}

/// Processes a repair queue to completion.
pub(crate) fn run(tree: &mut Tree, actions: impl IntoIterator<Item = RepairAction>) {
    let mut queue: VecDeque<RepairAction> = actions.into_iter().collect();
    while let Some(action) = queue.pop_front() {
        apply(tree, action, &mut queue);
    }
}

fn apply(tree: &mut Tree, action: RepairAction, queue: &mut VecDeque<RepairAction>) {
    match action {
        RepairAction::EnsureBrackets(parent) => ensure_brackets(tree, parent),
        RepairAction::EnsureListKeyword(parent) => ensure_list_keyword(tree, parent),
        RepairAction::RemoveListKeywordIfEmpty(parent) => {
            remove_list_keyword_if_empty(tree, parent);
        }
        RepairAction::EnsureConstantDelimiter(parent) => {
            ensure_constant_delimiter(tree, parent);
        }
        RepairAction::SeparatorAroundRun {
            parent,
            first,
            last,
        } => separator_around_run(tree, parent, first, last),
        RepairAction::RemoveAdjacentSeparator { parent, child } => {
            remove_adjacent_separator(tree, parent, child);
        }
        RepairAction::DropBracketsIfEmpty(parent) => {
            if drop_brackets_if_empty(tree, parent) {
                queue.push_back(RepairAction::TidyWhitespace(parent));
            }
        }
        RepairAction::DeleteTrailingSemicolon(parent) => {
            delete_trailing_semicolon(tree, parent);
        }
        RepairAction::SpaceOutModifiers(parent) => space_out_modifiers(tree, parent),
        RepairAction::EnsureElseKeyword(parent) => ensure_else_keyword(tree, parent),
        RepairAction::TidyWhitespace(parent) => tidy_whitespace(tree, parent),
        RepairAction::Verify(parent) => verify(tree, parent),
    }
}

// ============================================================================
// BRACKETS, KEYWORDS, DELIMITERS
// ============================================================================

/// Synthesizes whichever bookend tokens are missing. The open bracket of
/// a class body goes after the header (end of children); every other
/// bracketed kind opens at the front. Close brackets go at the very end.
pub(crate) fn ensure_brackets(tree: &mut Tree, parent: NodeId) {
    let Some(policy) = bracket_policy(tree.kind(parent)) else {
        return;
    };
    if roles::role_index(tree, parent, policy.open_role).is_none() {
        let open_at = match tree.kind(parent) {
            NodeKind::Class => tree.children(parent).len(),
            _ => 0,
        };
        let open = tree.synth_token(policy.open);
        tree.splice_in(parent, open_at, &[open.into()]);
    }
    if roles::role_index(tree, parent, policy.close_role).is_none() {
        let close = tree.synth_token(policy.close);
        let end = tree.children(parent).len();
        tree.splice_in(parent, end, &[close.into()]);
    }
}

fn ensure_list_keyword(tree: &mut Tree, parent: NodeId) {
    let Some(keyword) = list_keyword(tree.kind(parent)) else {
        return;
    };
    if roles::role_index(tree, parent, Role::Keyword).is_some() {
        return;
    }
    let kw = tree.synth_token(keyword);
    let ws = tree.create_token(TokenKind::Whitespace, " ");
    tree.splice_in(parent, 0, &[kw.into(), ws.into()]);
}

fn remove_list_keyword_if_empty(tree: &mut Tree, parent: NodeId) {
    if list_keyword(tree.kind(parent)).is_none() {
        return;
    }
    if !roles::children_by_role(tree, parent, Role::Reference).is_empty() {
        return;
    }
    if let Some(idx) = roles::role_index(tree, parent, Role::Keyword) {
        let kw = tree.detach_at(parent, idx);
        tree.free_subtree(kw);
    }
    // Whatever remains is whitespace; an empty list renders as nothing.
    while !tree.children(parent).is_empty() {
        let removed = tree.detach_at(parent, 0);
        tree.free_subtree(removed);
    }
}

/// Synthesizes the enum constant-list delimiter — the `;` separating the
/// constants zone from ordinary members — after the last constant, or
/// right after the opening brace when no constants exist.
pub(crate) fn ensure_constant_delimiter(tree: &mut Tree, class: NodeId) {
    if tree.kind(class) != NodeKind::Class || tree.class_flavor(class) != ClassFlavor::Enum {
        return;
    }
    if roles::role_index(tree, class, Role::ConstantListDelimiter).is_some() {
        return;
    }
    ensure_brackets(tree, class);
    let constants = roles::children_by_role(tree, class, Role::EnumConstant);
    let at = match constants.last() {
        Some(&last) => tree.index_of(class, last).map(|idx| idx + 1),
        None => roles::role_index(tree, class, Role::LBrace).map(|idx| idx + 1),
    };
    let Some(at) = at else {
        return;
    };
    let semi = tree.synth_token(TokenKind::Semicolon);
    tree.splice_in(class, at, &[semi.into()]);
}

// ============================================================================
// SEPARATORS
// ============================================================================

enum Scan {
    /// A listed sibling with no separator between.
    Listed,
    /// A separator token was reached first, or nothing listed on this
    /// side; no separator needed here.
    Nothing,
}

fn scan_run_side<'a>(
    tree: &Tree,
    policy: &super::policy::SeparatorPolicy,
    siblings: impl Iterator<Item = &'a ElementId>,
) -> Scan {
    for &child in siblings {
        if tree.is_trivia(child) {
            continue;
        }
        if tree.elem_token_kind(child) == Some(policy.separator) {
            return Scan::Nothing;
        }
        if policy.is_listed(tree, child) {
            return Scan::Listed;
        }
        // Brackets, keywords, delimiters, and other unlisted siblings
        // end the scan; there is nothing to separate from across them.
        return Scan::Nothing;
    }
    Scan::Nothing
}

/// Restores the separator invariant around a freshly inserted run.
///
/// Scan forward for the next listed sibling: found with no separator in
/// between means one separator goes right after the run. Otherwise scan
/// backward symmetrically and insert before the run. At most one
/// separator per edit; insertion prefers the forward side, deletion
/// prefers the following separator, and the asymmetry is deliberate.
fn separator_around_run(tree: &mut Tree, parent: NodeId, first: ElementId, last: ElementId) {
    let Some(policy) = separator_policy(tree, parent) else {
        return;
    };
    let (Some(start), Some(end)) = (tree.index_of(parent, first), tree.index_of(parent, last))
    else {
        return;
    };
    let run_has_listed = tree.children(parent)[start..=end]
        .iter()
        .any(|&c| policy.is_listed(tree, c));
    if !run_has_listed {
        return;
    }

    let forward = scan_run_side(tree, &policy, tree.children(parent)[end + 1..].iter());
    if let Scan::Listed = forward {
        let run = separator_run(tree, policy.separator);
        tree.splice_in(parent, end + 1, &run);
        return;
    }
    let backward = scan_run_side(tree, &policy, tree.children(parent)[..start].iter().rev());
    if let Scan::Listed = backward {
        let run = separator_run(tree, policy.separator);
        tree.splice_in(parent, start, &run);
    }
}

/// A synthesized separator plus the single space that conventionally
/// follows it. The separator count is what the invariant measures; the
/// space is incidental trivia.
fn separator_run(tree: &mut Tree, separator: TokenKind) -> [ElementId; 2] {
    let comma = tree.synth_token(separator);
    let ws = tree.create_token(TokenKind::Whitespace, " ");
    [comma.into(), ws.into()]
}

/// Removes exactly one separator adjacent to `child`: the following one
/// when present, else the preceding one. Runs before the detach so the
/// scan has stable neighbors.
fn remove_adjacent_separator(tree: &mut Tree, parent: NodeId, child: ElementId) {
    let Some(policy) = separator_policy(tree, parent) else {
        return;
    };
    if !policy.is_listed(tree, child) {
        return;
    }
    let Some(idx) = tree.index_of(parent, child) else {
        return;
    };
    let following = tree
        .next_significant(parent, idx)
        .filter(|&(_, c)| tree.elem_token_kind(c) == Some(policy.separator));
    let target = following.or_else(|| {
        tree.prev_significant(parent, idx)
            .filter(|&(_, c)| tree.elem_token_kind(c) == Some(policy.separator))
    });
    if let Some((sep_idx, _)) = target {
        let sep = tree.detach_at(parent, sep_idx);
        tree.free_subtree(sep);
    }
}

// ============================================================================
// EMPTYING AND TRAILING-TOKEN FIXUPS
// ============================================================================

/// Drops the bookends of a drop-when-empty parent whose listed content is
/// gone (generic angle brackets). Returns true if anything was removed.
fn drop_brackets_if_empty(tree: &mut Tree, parent: NodeId) -> bool {
    let Some(policy) = bracket_policy(tree.kind(parent)) else {
        return false;
    };
    if !policy.drop_when_empty {
        return false;
    }
    let has_listed = match separator_policy(tree, parent) {
        Some(sep) => tree
            .children(parent)
            .iter()
            .any(|&c| sep.is_listed(tree, c)),
        None => false,
    };
    if has_listed {
        return false;
    }
    let mut removed = false;
    for role in [policy.open_role, policy.close_role] {
        if let Some(idx) = roles::role_index(tree, parent, role) {
            let bracket = tree.detach_at(parent, idx);
            tree.free_subtree(bracket);
            removed = true;
        }
    }
    removed
}

/// Keeps a modifier list lexically well-formed: exactly one space
/// between entries, none at the edges, and — because the list renders
/// flush against what follows it — one space after the list in its
/// parent while the list is non-empty.
fn space_out_modifiers(tree: &mut Tree, list: NodeId) {
    if tree.kind(list) != NodeKind::ModifierList {
        return;
    }
    // Interior: strip whitespace, then re-space between entries.
    let mut idx = 0;
    while idx < tree.children(list).len() {
        if tree.elem_token_kind(tree.children(list)[idx]) == Some(TokenKind::Whitespace) {
            let ws = tree.detach_at(list, idx);
            tree.free_subtree(ws);
        } else {
            idx += 1;
        }
    }
    let mut idx = 1;
    while idx < tree.children(list).len() {
        let ws = tree.create_token(TokenKind::Whitespace, " ");
        tree.splice_in(list, idx, &[ws.into()]);
        idx += 2;
    }
    // Exterior: the gap between the list and the declaration proper.
    let Some(parent) = tree.parent(list) else {
        return;
    };
    let Some(at) = tree.index_of(parent, ElementId::Node(list)) else {
        return;
    };
    let nonempty = !tree.children(list).is_empty();
    let next_is_ws = tree
        .children(parent)
        .get(at + 1)
        .is_some_and(|&c| tree.elem_token_kind(c) == Some(TokenKind::Whitespace));
    if nonempty && !next_is_ws {
        let ws = tree.create_token(TokenKind::Whitespace, " ");
        tree.splice_in(parent, at + 1, &[ws.into()]);
    } else if !nonempty && next_is_ws {
        let ws = tree.detach_at(parent, at + 1);
        tree.free_subtree(ws);
    }
}

/// An incoming else branch needs its keyword; synthesized at the end of
/// the statement, ahead of where the branch will land.
fn ensure_else_keyword(tree: &mut Tree, statement: NodeId) {
    if tree.kind(statement) != NodeKind::IfStatement {
        return;
    }
    if roles::role_index(tree, statement, Role::ElseKeyword).is_some() {
        return;
    }
    let lead = tree.create_token(TokenKind::Whitespace, " ");
    let kw = tree.synth_token(TokenKind::ElseKw);
    let trail = tree.create_token(TokenKind::Whitespace, " ");
    let end = tree.children(statement).len();
    tree.splice_in(statement, end, &[lead.into(), kw.into(), trail.into()]);
}

fn delete_trailing_semicolon(tree: &mut Tree, method: NodeId) {
    if tree.kind(method) != NodeKind::Method {
        return;
    }
    if let Some(idx) = roles::role_index(tree, method, Role::Semicolon) {
        let semi = tree.detach_at(method, idx);
        tree.free_subtree(semi);
    }
}

/// Collapses whitespace artifacts: doubled runs left by a removal, and —
/// for paren/angle lists, where layout is horizontal — padding stuck to
/// the bookends.
fn tidy_whitespace(tree: &mut Tree, parent: NodeId) {
    let trim_bracket_padding = matches!(
        tree.kind(parent),
        NodeKind::ParameterList
            | NodeKind::ExpressionList
            | NodeKind::AnnotationParamList
            | NodeKind::TypeParameterList
            | NodeKind::ReferenceParameterList
    );
    let policy = bracket_policy(tree.kind(parent));
    let trim_leading = matches!(
        tree.kind(parent),
        NodeKind::DeclarationStatement | NodeKind::ModifierList
    );

    let mut idx = 0;
    while idx < tree.children(parent).len() {
        let child = tree.children(parent)[idx];
        let is_ws = tree.elem_token_kind(child) == Some(TokenKind::Whitespace);
        if !is_ws {
            idx += 1;
            continue;
        }
        let leading = trim_leading && idx == 0;
        let prev_ws = idx > 0
            && tree
                .elem_token_kind(tree.children(parent)[idx - 1])
                .is_some_and(|k| k == TokenKind::Whitespace);
        let after_open = trim_bracket_padding
            && idx > 0
            && policy.as_ref().is_some_and(|p| {
                tree.elem_token_kind(tree.children(parent)[idx - 1]) == Some(p.open)
            });
        let before_close = trim_bracket_padding
            && idx + 1 < tree.children(parent).len()
            && policy.as_ref().is_some_and(|p| {
                tree.elem_token_kind(tree.children(parent)[idx + 1]) == Some(p.close)
            });
        if leading || prev_ws || after_open || before_close {
            let ws = tree.detach_at(parent, idx);
            tree.free_subtree(ws);
        } else {
            idx += 1;
        }
    }
}

// ============================================================================
// POST-CONDITION VERIFICATION
// ============================================================================

/// Checks the mutated parent's invariants; any failure is corruption and
/// panics. Checks are local to `parent` — the invalidation scope of a
/// mutation — not a whole-tree walk.
pub(crate) fn verify(tree: &Tree, parent: NodeId) {
    let kind = tree.kind(parent);

    // Child back-references.
    for &child in tree.children(parent) {
        if tree.parent_of(child) != Some(parent) {
            invariant_corruption(tree, parent, "child parent link does not point back");
        }
    }

    // Unique-role uniqueness.
    let mut seen: Vec<Role> = Vec::new();
    for (idx, _) in tree.significant_children(parent) {
        if let Some(role) = roles::role_at(tree, parent, idx) {
            if roles::is_unique_in(role, kind) {
                if seen.contains(&role) {
                    invariant_corruption(
                        tree,
                        parent,
                        &format!("duplicate child for unique role {role:?}"),
                    );
                }
                seen.push(role);
            }
        }
    }

    verify_separators(tree, parent);
    verify_brackets(tree, parent);
    verify_kind_ordering(tree, parent);
}

fn verify_separators(tree: &Tree, parent: NodeId) {
    let Some(policy) = separator_policy(tree, parent) else {
        return;
    };
    let mut listed = 0usize;
    let mut separators = 0usize;
    for (idx, child) in tree.significant_children(parent) {
        if policy.is_listed(tree, child) {
            listed += 1;
        } else if tree.elem_token_kind(child) == Some(policy.separator) {
            separators += 1;
            // A separator must sit between two listed children.
            let prev_listed = tree
                .prev_significant(parent, idx)
                .is_some_and(|(_, c)| policy.is_listed(tree, c));
            let next_listed = tree
                .next_significant(parent, idx)
                .is_some_and(|(_, c)| policy.is_listed(tree, c));
            if !prev_listed || !next_listed {
                invariant_corruption(tree, parent, "separator outside the listed span");
            }
        }
    }
    if separators != listed.saturating_sub(1) {
        invariant_corruption(
            tree,
            parent,
            &format!("{listed} listed children but {separators} separators"),
        );
    }
}

fn verify_brackets(tree: &Tree, parent: NodeId) {
    let Some(policy) = bracket_policy(tree.kind(parent)) else {
        return;
    };
    let opens = count_tokens(tree, parent, policy.open);
    let closes = count_tokens(tree, parent, policy.close);

    // Which content requires the brackets: members and constants for a
    // class body, statements for a code block, listed children for lists.
    let requires_brackets = match tree.kind(parent) {
        NodeKind::Class => {
            !roles::children_by_role(tree, parent, Role::Member).is_empty()
                || !roles::children_by_role(tree, parent, Role::EnumConstant).is_empty()
        }
        NodeKind::CodeBlock => {
            !roles::children_by_role(tree, parent, Role::Statement).is_empty()
        }
        _ => match separator_policy(tree, parent) {
            Some(sep) => tree
                .children(parent)
                .iter()
                .any(|&c| sep.is_listed(tree, c)),
            None => false,
        },
    };

    match (opens, closes) {
        (1, 1) => {}
        (0, 0) => {
            if requires_brackets {
                invariant_corruption(tree, parent, "bracketed content without brackets");
            }
        }
        _ => invariant_corruption(
            tree,
            parent,
            &format!("expected one bracket pair, found {opens} open / {closes} close"),
        ),
    }
}

fn count_tokens(tree: &Tree, parent: NodeId, kind: TokenKind) -> usize {
    tree.children(parent)
        .iter()
        .filter(|&&c| tree.elem_token_kind(c) == Some(kind))
        .count()
}

fn verify_kind_ordering(tree: &Tree, parent: NodeId) {
    match tree.kind(parent) {
        NodeKind::ModifierList => {
            let mut last_rank = 0u8;
            for (_, child) in tree.significant_children(parent) {
                if let Some(rank) = tree
                    .elem_token_kind(child)
                    .and_then(TokenKind::modifier_rank)
                {
                    if rank < last_rank {
                        invariant_corruption(tree, parent, "modifier keywords out of rank order");
                    }
                    last_rank = rank;
                }
            }
        }
        NodeKind::Class if tree.class_flavor(parent) == ClassFlavor::Enum => {
            let delim = roles::role_index(tree, parent, Role::ConstantListDelimiter);
            let constants: Vec<usize> = (0..tree.children(parent).len())
                .filter(|&i| roles::role_at(tree, parent, i) == Some(Role::EnumConstant))
                .collect();
            let members: Vec<usize> = (0..tree.children(parent).len())
                .filter(|&i| roles::role_at(tree, parent, i) == Some(Role::Member))
                .collect();
            match delim {
                Some(delim) => {
                    if constants.iter().any(|&i| i > delim) {
                        invariant_corruption(tree, parent, "enum constant after the delimiter");
                    }
                    if members.iter().any(|&i| i < delim) {
                        invariant_corruption(tree, parent, "member before the constant delimiter");
                    }
                }
                None => {
                    if !members.is_empty() && !constants.is_empty() {
                        invariant_corruption(
                            tree,
                            parent,
                            "enum with members but no constant-list delimiter",
                        );
                    }
                }
            }
        }
        NodeKind::Method => {
            let body = roles::role_index(tree, parent, Role::Body);
            let semi = roles::role_index(tree, parent, Role::Semicolon);
            if body.is_some() && semi.is_some() {
                invariant_corruption(tree, parent, "method with both a body and a semicolon");
            }
        }
        _ => {}
    }
}
