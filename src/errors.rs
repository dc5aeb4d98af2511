//! Arbor error handling — unified, encapsulated API.
//!
//! Every recoverable failure of the edit engine is an [`ArborError`]:
//! an [`ErrorKind`] describing what was refused, plus rendered-source
//! diagnostics so a host can show *where* in the current text the refusal
//! points. There are exactly two recoverable categories — a role conflict
//! and a violated structural precondition — and both leave the tree
//! untouched. Detected corruption is never an error value: it panics
//! through [`invariant_corruption`], because a tree that failed its
//! post-conditions must not reach another reader.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::{NodeKind, Role};
use crate::tree::{text, ElementId, NodeId, Tree};

/// The single recoverable error type of the edit engine.
#[derive(Debug)]
pub struct ArborError {
    /// What went wrong (variant-specific data).
    pub kind: ErrorKind,
    /// Where it happened, against the tree's rendered text.
    pub source_info: SourceInfo,
    /// How to help.
    pub diagnostic_info: DiagnosticInfo,
}

/// All refusal types as a clean enum — no duplicate fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// An insert would create a second child for a unique role.
    #[error("Role conflict: {parent_kind:?} already has a child in role {role:?} ('{occupant}')")]
    RoleConflict {
        role: Role,
        parent_kind: NodeKind,
        occupant: String,
    },
    /// The target parent is not attached to the tree.
    #[error("Structural precondition: target {parent_kind:?} is not attached to the tree")]
    DetachedParent { parent_kind: NodeKind },
    /// An incoming element already has a parent.
    #[error("Structural precondition: incoming element '{element}' is already attached")]
    AlreadyAttached { element: String },
    /// The named child does not belong to the named parent.
    #[error("Structural precondition: element is not a child of the {parent_kind:?}")]
    NotAChild { parent_kind: NodeKind },
    /// An insert or replace was given an empty run.
    #[error("Structural precondition: nothing to insert into the {parent_kind:?}")]
    EmptyInsertion { parent_kind: NodeKind },
    /// The parent's grammar has no slot for the incoming element.
    #[error("Structural precondition: {parent_kind:?} has no grammatical slot for '{element}'")]
    NoAdmissibleRole {
        parent_kind: NodeKind,
        element: String,
    },
    /// Deleting a load-bearing child with no defined fixup.
    #[error("Structural precondition: load-bearing {role:?} child of {parent_kind:?} cannot be deleted")]
    LoadBearingChild {
        role: Option<Role>,
        parent_kind: NodeKind,
    },
}

impl ErrorKind {
    /// The error category, for host-side recovery decisions and tests.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RoleConflict { .. } => ErrorCategory::RoleConflict,
            Self::DetachedParent { .. }
            | Self::AlreadyAttached { .. }
            | Self::NotAChild { .. }
            | Self::EmptyInsertion { .. }
            | Self::NoAdmissibleRole { .. }
            | Self::LoadBearingChild { .. } => ErrorCategory::StructuralPrecondition,
        }
    }

    /// Error code suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::RoleConflict { .. } => "role_conflict",
            Self::DetachedParent { .. } => "detached_parent",
            Self::AlreadyAttached { .. } => "already_attached",
            Self::NotAChild { .. } => "not_a_child",
            Self::EmptyInsertion { .. } => "empty_insertion",
            Self::NoAdmissibleRole { .. } => "no_admissible_role",
            Self::LoadBearingChild { .. } => "load_bearing_child",
        }
    }
}

/// Recoverable error categories of the edit engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    RoleConflict,
    StructuralPrecondition,
}

/// Where the refusal points, against rendered source text.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
}

/// Diagnostic enhancement data.
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

impl std::error::Error for ArborError {}

impl fmt::Display for ArborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Diagnostic for ArborError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

impl ArborError {
    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::RoleConflict { .. } => "role already filled here".into(),
            ErrorKind::DetachedParent { .. } => "detached target".into(),
            ErrorKind::AlreadyAttached { .. } => "already attached".into(),
            ErrorKind::NotAChild { .. } => "not a child of this node".into(),
            ErrorKind::EmptyInsertion { .. } => "empty insertion".into(),
            ErrorKind::NoAdmissibleRole { .. } => "no slot for this element".into(),
            ErrorKind::LoadBearingChild { .. } => "load-bearing child".into(),
        }
    }
}

/// Builds an [`ArborError`] pointing at `at` within its component's
/// rendered text. All edit-engine refusals go through here so every error
/// carries a usable source label.
pub(crate) fn report(tree: &Tree, kind: ErrorKind, at: ElementId) -> ArborError {
    let top = tree.top_of(at);
    let rendered = text::text_of(tree, top);
    let offset = text::offset_of(tree, at);
    let len = text::text_len(tree, at).max(1);
    let error_code = format!("arbor::edit::{}", kind.code_suffix());
    let help = help_for(&kind);
    ArborError {
        kind,
        source_info: SourceInfo {
            source: Arc::new(NamedSource::new("tree", rendered)),
            primary_span: (offset..offset + len).into(),
        },
        diagnostic_info: DiagnosticInfo { help, error_code },
    }
}

fn help_for(kind: &ErrorKind) -> Option<String> {
    match kind {
        ErrorKind::RoleConflict { role, .. } => Some(format!(
            "delete or replace the existing {role:?} child first"
        )),
        ErrorKind::AlreadyAttached { .. } => {
            Some("detach via delete, or duplicate via copy, before inserting".into())
        }
        ErrorKind::LoadBearingChild { .. } => {
            Some("replace the child instead of deleting it".into())
        }
        _ => None,
    }
}

/// Fatal post-condition failure: a kind-specific repair rule produced a
/// tree that violates its own invariants. Never recovered — a corrupt
/// tree must not reach the next reader. The mutation aborts the process
/// (or the host's panic boundary) instead of returning.
pub(crate) fn invariant_corruption(tree: &Tree, parent: NodeId, detail: &str) -> ! {
    let kind = tree.kind(parent);
    let rendered = text::text_of(tree, tree.top_of(parent.into()));
    panic!(
        "invariant corruption in {kind:?} after mutation: {detail}\n  component text: {rendered:?}"
    );
}
