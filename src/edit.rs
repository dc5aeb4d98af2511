//! The structural edit engine: insert, delete, replace.
//!
//! One generic algorithm per operation, composed with per-kind policy
//! tables (`policy`), anchor resolution (`anchor`), incoming-subtree
//! normalization (`normalize`), and the worklist repairer (`repair`).
//! The role table classifies; the repairer is the only component that
//! mutates.

pub mod anchor;
pub mod delete;
pub mod insert;
pub mod normalize;
pub mod policy;
pub mod repair;

pub use anchor::{Anchor, ImportOrderPolicy, MemberOrderPolicy, Side};

use crate::errors::{report, ArborError, ErrorKind};
use crate::tree::{text, ElementId, NodeId, Tree};

impl Tree {
    /// Inserts a detached sibling run under `parent`.
    ///
    /// With no anchor, the parent kind's default policy picks the
    /// position: list parents append before their closing bracket,
    /// class bodies consult the member-ordering policy, and so on.
    /// Separators, brackets, and derived tokens are repaired around the
    /// splice. Returns the first attached element.
    pub fn insert(
        &mut self,
        parent: NodeId,
        new: &[ElementId],
        anchor: Option<Anchor>,
    ) -> Result<ElementId, ArborError> {
        insert::insert(self, parent, new, anchor)
    }

    /// Deletes `child` from `parent`, running the kind's pre-delete
    /// fixups (separator removal, cascades, minimal-filler replacement)
    /// and post-delete normalization.
    pub fn delete(&mut self, parent: NodeId, child: impl Into<ElementId>) -> Result<(), ArborError> {
        delete::delete(self, parent, child.into())
    }

    /// Replaces `old` with a detached run in the same slot, skipping the
    /// separator repair an insert-plus-delete would duplicate.
    pub fn replace(
        &mut self,
        parent: NodeId,
        old: impl Into<ElementId>,
        new: &[ElementId],
    ) -> Result<ElementId, ArborError> {
        replace(self, parent, old.into(), new)
    }
}

/// Same-slot replacement: detach the old child, admit the new run at its
/// position, free the old subtree.
fn replace(
    tree: &mut Tree,
    parent: NodeId,
    old: ElementId,
    new: &[ElementId],
) -> Result<ElementId, ArborError> {
    let parent_kind = tree.kind(parent);
    let Some(&first) = new.first() else {
        return Err(report(
            tree,
            ErrorKind::EmptyInsertion { parent_kind },
            parent.into(),
        ));
    };
    let Some(idx) = tree.index_of(parent, old) else {
        return Err(report(tree, ErrorKind::NotAChild { parent_kind }, parent.into()));
    };
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

    // Classification must not see the child being replaced, so detach
    // first and roll back on refusal.
    let detached = tree.detach_at(parent, idx);
    match insert::classify_run(tree, parent, new) {
        Ok(_) => {}
        Err(error) => {
            tree.splice_in(parent, idx, &[detached]);
            return Err(error);
        }
    }

    tree.splice_in(parent, idx, new);
    tree.free_subtree(detached);
    repair::run(
        tree,
        [
            repair::RepairAction::SeparatorAroundRun {
                parent,
                first,
                last: *new.last().expect("run is non-empty"),
            },
            repair::RepairAction::Verify(parent),
        ],
    );
    Ok(first)
}
