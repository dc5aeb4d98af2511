//! Convenience re-exports of the core vocabulary.

pub use crate::copy::{copy, copy_with_context, resolve_type_parameter, type_parameter_scopes};
pub use crate::edit::{Anchor, ImportOrderPolicy, MemberOrderPolicy, Side};
pub use crate::errors::{ArborError, ErrorCategory, ErrorKind};
pub use crate::roles::{child_by_role, children_by_role, role_of};
pub use crate::syntax::{ClassFlavor, NodeKind, Role, TokenKind};
pub use crate::tree::text::{dump, offset_of, text_len, text_of};
pub use crate::tree::{ElementId, NodeId, TokenId, Tree, TreeBuilder};
