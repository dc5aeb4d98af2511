//! Role labels for parent→child edges.
//!
//! A role names the grammatical part a child plays inside its parent,
//! independent of raw child position. The same `Role` value may be unique
//! in one parent kind and repeated in another (a `Reference` is unique
//! under an annotation but repeated under an extends-list); cardinality
//! is therefore resolved against the parent kind, in `roles::is_unique_in`.

use serde::{Deserialize, Serialize};

/// The grammatical part a child plays inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    // Named structural parts
    ModifierList,
    Name,
    Type,
    TypeParameterList,
    ReferenceParameterList,
    ExtendsList,
    ImplementsList,
    ThrowsList,
    ParameterList,
    ArgumentList,
    Body,
    Initializer,
    Qualifier,
    Value,
    Callee,
    Reference,
    PackageStatement,
    ImportList,
    Condition,
    ThenBranch,
    ElseBranch,
    ReturnValue,
    Expression,
    LeftOperand,
    RightOperand,
    OperationSign,
    Array,
    Index,
    ConstantListDelimiter,

    // Repeated structural parts
    Modifier,
    Annotation,
    Parameter,
    Argument,
    TypeParameter,
    Member,
    EnumConstant,
    Import,
    Declarator,
    Statement,
    Element,

    // Terminal parts
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LAngle,
    RAngle,
    Comma,
    Semicolon,
    Dot,
    Eq,
    At,
    Keyword,
    ElseKeyword,
    StaticKeyword,
}

impl Role {
    /// True for the separator/bookend token roles the repairer owns.
    ///
    /// Children in these roles are never supplied by callers; they are
    /// synthesized and removed by the invariant repairer only.
    pub fn is_synthetic(self) -> bool {
        matches!(
            self,
            Self::LBrace
                | Self::RBrace
                | Self::LParen
                | Self::RParen
                | Self::LAngle
                | Self::RAngle
                | Self::Comma
                | Self::ConstantListDelimiter
        )
    }
}
