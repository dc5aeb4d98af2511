//! Syntax vocabulary: node kinds, token kinds, and child roles.
//!
//! Everything here is a pure tag type. The tree (`crate::tree`) stores
//! them; the role tables (`crate::roles`) and the edit engine
//! (`crate::edit`) dispatch on them with exhaustive matches.

pub mod kind;
pub mod role;

pub use kind::{ClassFlavor, NodeKind, TokenKind};
pub use role::Role;
