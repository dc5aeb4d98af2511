//! Anchor resolution: where an insert lands when the caller does not say.
//!
//! Every parent kind defines a default insertion point for new children.
//! List-like parents append before their closing bracket; class bodies
//! consult the pluggable member-ordering policy; import lists delegate to
//! the pluggable import-ordering policy; modifier lists place keywords by
//! canonical rank. Resolution is a pure query — when the answer depends
//! on brackets that do not exist yet, the repairer creates them *before*
//! resolution runs, so the sentinel case stays internal to the edit
//! engine.

use crate::roles;
use crate::syntax::{ClassFlavor, NodeKind, Role, TokenKind};
use crate::tree::{text, ElementId, NodeId, Tree};

/// An insertion point: a reference sibling plus a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub reference: ElementId,
    pub side: Side,
}

/// Which side of the reference the new elements land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

impl Anchor {
    /// Anchors before `reference`.
    pub fn before(reference: impl Into<ElementId>) -> Self {
        Self {
            reference: reference.into(),
            side: Side::Before,
        }
    }

    /// Anchors after `reference`.
    pub fn after(reference: impl Into<ElementId>) -> Self {
        Self {
            reference: reference.into(),
            side: Side::After,
        }
    }

    /// Child index this anchor denotes within `parent`.
    pub(crate) fn resolve(&self, tree: &Tree, parent: NodeId) -> Option<usize> {
        let idx = tree.index_of(parent, self.reference)?;
        Some(match self.side {
            Side::Before => idx,
            Side::After => idx + 1,
        })
    }
}

// ============================================================================
// PLUGGABLE ORDERING POLICIES
// ============================================================================

/// Strategy choosing a conventional position for a new class-body member.
pub trait MemberOrderPolicy: Send + Sync {
    /// A preferred anchor for `incoming` inside `class`, or `None` to
    /// fall back to "before the closing brace."
    fn preferred_anchor(&self, tree: &Tree, class: NodeId, incoming: ElementId)
        -> Option<Anchor>;
}

/// Strategy choosing a position for a new import statement.
pub trait ImportOrderPolicy: Send + Sync {
    /// A preferred anchor for `incoming` inside `list`, or `None` to
    /// append at the end.
    fn preferred_anchor(&self, tree: &Tree, list: NodeId, incoming: ElementId)
        -> Option<Anchor>;
}

/// The ordering strategies a tree consults; replaceable per tree.
pub struct EditPolicies {
    pub(crate) member_order: Box<dyn MemberOrderPolicy>,
    pub(crate) import_order: Box<dyn ImportOrderPolicy>,
}

impl Default for EditPolicies {
    fn default() -> Self {
        Self {
            member_order: Box::new(ConventionalMemberOrder),
            import_order: Box::new(AlphabeticalImportOrder),
        }
    }
}

/// Default member ordering: fields, then initializers, then
/// constructors, then methods, then inner classes. A new member goes
/// after the last member of its own rank group, or where its group
/// would begin.
pub struct ConventionalMemberOrder;

fn member_rank(tree: &Tree, member: ElementId) -> Option<u8> {
    let node = member.node()?;
    let rank = match tree.kind(node) {
        NodeKind::Field => 0,
        NodeKind::ClassInitializer => 1,
        NodeKind::Method if super::normalize::is_constructor(tree, node) => 2,
        NodeKind::Method => 3,
        NodeKind::Class => 4,
        _ => return None,
    };
    Some(rank)
}

impl MemberOrderPolicy for ConventionalMemberOrder {
    fn preferred_anchor(
        &self,
        tree: &Tree,
        class: NodeId,
        incoming: ElementId,
    ) -> Option<Anchor> {
        let rank = member_rank(tree, incoming)?;
        let members = roles::children_by_role(tree, class, Role::Member);
        // After the last member of the same or a lower rank group.
        let predecessor = members
            .iter()
            .rev()
            .find(|&&m| member_rank(tree, m).is_some_and(|r| r <= rank));
        if let Some(&member) = predecessor {
            return Some(Anchor::after(member));
        }
        // Before the first member of a higher rank group.
        members.first().map(|&m| Anchor::before(m))
    }
}

/// Default import ordering: alphabetical by rendered reference text.
pub struct AlphabeticalImportOrder;

impl ImportOrderPolicy for AlphabeticalImportOrder {
    fn preferred_anchor(
        &self,
        tree: &Tree,
        list: NodeId,
        incoming: ElementId,
    ) -> Option<Anchor> {
        let incoming_key = import_sort_key(tree, incoming)?;
        for import in roles::children_by_role(tree, list, Role::Import) {
            let key = import_sort_key(tree, import)?;
            if incoming_key < key {
                return Some(Anchor::before(import));
            }
        }
        None
    }
}

fn import_sort_key(tree: &Tree, import: ElementId) -> Option<String> {
    let node = import.node()?;
    let reference = roles::child_by_role(tree, node, Role::Reference)?;
    Some(text::text_of(tree, reference))
}

// ============================================================================
// DEFAULT ANCHOR RESOLUTION
// ============================================================================

/// Default insertion index for `incoming` under `parent`.
///
/// Pre-condition: any brackets, list keywords, and constant-list
/// delimiters the position depends on already exist (the insert path
/// ensures them first). The fallback for every kind is "append at the
/// end."
pub(crate) fn default_index(tree: &Tree, parent: NodeId, incoming: &[ElementId]) -> usize {
    let end = tree.children(parent).len();
    let first_significant = incoming.iter().copied().find(|&e| !tree.is_trivia(e));
    match tree.kind(parent) {
        // Bracketed lists append before the closing bracket.
        NodeKind::ParameterList
        | NodeKind::ExpressionList
        | NodeKind::AnnotationParamList
        | NodeKind::TypeParameterList
        | NodeKind::ReferenceParameterList
        | NodeKind::ArrayInitializer => close_bracket_index(tree, parent).unwrap_or(end),

        NodeKind::CodeBlock => roles::role_index(tree, parent, Role::RBrace).unwrap_or(end),

        NodeKind::DeclarationStatement => {
            roles::role_index(tree, parent, Role::Semicolon).unwrap_or(end)
        }

        NodeKind::Class => {
            let Some(incoming) = first_significant else {
                return end;
            };
            class_member_index(tree, parent, incoming)
        }

        NodeKind::ImportList => {
            let Some(incoming) = first_significant else {
                return end;
            };
            tree.policies
                .import_order
                .preferred_anchor(tree, parent, incoming)
                .and_then(|anchor| anchor.resolve(tree, parent))
                .unwrap_or(end)
        }

        NodeKind::ModifierList => {
            let Some(incoming) = first_significant else {
                return end;
            };
            modifier_index(tree, parent, incoming)
        }

        NodeKind::File => {
            let Some(incoming) = first_significant else {
                return end;
            };
            match tree.elem_node_kind(incoming) {
                Some(NodeKind::PackageStatement) => 0,
                Some(NodeKind::ImportList) => {
                    match roles::role_index(tree, parent, Role::PackageStatement) {
                        Some(idx) => idx + 1,
                        None => 0,
                    }
                }
                _ => end,
            }
        }

        _ => end,
    }
}

fn close_bracket_index(tree: &Tree, parent: NodeId) -> Option<usize> {
    let policy = super::policy::bracket_policy(tree.kind(parent))?;
    roles::role_index(tree, parent, policy.close_role)
}

/// Default position for a member or enum constant inside a class body.
fn class_member_index(tree: &Tree, class: NodeId, incoming: ElementId) -> usize {
    let end = tree.children(class).len();
    let rbrace = roles::role_index(tree, class, Role::RBrace).unwrap_or(end);

    if tree.elem_node_kind(incoming) == Some(NodeKind::EnumConstant) {
        // Constants stay in their zone, before the delimiter.
        let constants = roles::children_by_role(tree, class, Role::EnumConstant);
        if let Some(&last) = constants.last() {
            let idx = tree.index_of(class, last).unwrap_or(rbrace);
            return idx + 1;
        }
        if let Some(delim) = roles::role_index(tree, class, Role::ConstantListDelimiter) {
            return delim;
        }
        return roles::role_index(tree, class, Role::LBrace)
            .map(|idx| idx + 1)
            .unwrap_or(rbrace);
    }

    // Ordinary members: an enum body places them after the constant-list
    // delimiter; otherwise consult the member-ordering policy.
    if tree.class_flavor(class) == ClassFlavor::Enum {
        if let Some(delim) = roles::role_index(tree, class, Role::ConstantListDelimiter) {
            if let Some(anchor) = tree
                .policies
                .member_order
                .preferred_anchor(tree, class, incoming)
            {
                if let Some(idx) = anchor.resolve(tree, class) {
                    if idx > delim {
                        return idx;
                    }
                }
            }
            return rbrace;
        }
        return rbrace;
    }

    tree.policies
        .member_order
        .preferred_anchor(tree, class, incoming)
        .and_then(|anchor| anchor.resolve(tree, class))
        .unwrap_or(rbrace)
}

/// Rank position for a modifier keyword or annotation.
///
/// Annotations go before all keywords; a keyword goes after the last
/// keyword of the same or a lower rank.
fn modifier_index(tree: &Tree, list: NodeId, incoming: ElementId) -> usize {
    let end = tree.children(list).len();
    if tree.elem_node_kind(incoming) == Some(NodeKind::Annotation) {
        // After the last annotation, before the first keyword.
        let first_keyword = tree
            .significant_children(list)
            .find(|&(_, c)| tree.elem_token_kind(c).is_some_and(TokenKind::is_modifier));
        return first_keyword.map(|(i, _)| i).unwrap_or(end);
    }
    let Some(rank) = tree
        .elem_token_kind(incoming)
        .and_then(TokenKind::modifier_rank)
    else {
        return end;
    };
    let mut index = end;
    for (i, child) in tree.significant_children(list) {
        if let Some(existing) = tree.elem_token_kind(child).and_then(TokenKind::modifier_rank) {
            if existing > rank {
                index = i;
                break;
            }
        }
    }
    index
}
