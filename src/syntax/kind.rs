//! Node and token kind tags.
//!
//! The kind set is closed: every grammar production the editing core
//! understands is a `NodeKind` variant, every lexical unit a `TokenKind`
//! variant. The repair and role tables dispatch on these with exhaustive
//! matches, so adding a kind forces every table to take a position on it.

use serde::{Deserialize, Serialize};

/// Grammar production tag carried by every composite node.
///
/// One kind per construct of the Java-like surface grammar. Class,
/// interface, and enum declarations share the `Class` kind; the flavor is
/// derived from the declaration keyword token (see [`ClassFlavor`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    // File level
    File,
    PackageStatement,
    ImportList,
    ImportStatement,

    // Declarations
    Class,
    TypeParameterList,
    TypeParameter,
    ExtendsList,
    ImplementsList,
    ThrowsList,
    Field,
    Method,
    ClassInitializer,
    EnumConstant,
    ModifierList,
    Annotation,
    AnnotationParamList,
    NameValuePair,
    ParameterList,
    Parameter,

    // Statements
    CodeBlock,
    BlockStatement,
    DeclarationStatement,
    LocalVariable,
    ExpressionStatement,
    IfStatement,
    ReturnStatement,

    // Types and references
    TypeElement,
    CodeReference,
    ReferenceParameterList,

    // Expressions
    LiteralExpression,
    ReferenceExpression,
    BinaryExpression,
    AssignmentExpression,
    ArrayAccessExpression,
    CallExpression,
    NewExpression,
    ParenthesizedExpression,
    ExpressionList,
    ArrayInitializer,
}

impl NodeKind {
    /// True for kinds that denote an expression value.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Self::LiteralExpression
                | Self::ReferenceExpression
                | Self::BinaryExpression
                | Self::AssignmentExpression
                | Self::ArrayAccessExpression
                | Self::CallExpression
                | Self::NewExpression
                | Self::ParenthesizedExpression
                | Self::ArrayInitializer
        )
    }

    /// True for kinds usable in statement position inside a code block.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::BlockStatement
                | Self::DeclarationStatement
                | Self::ExpressionStatement
                | Self::IfStatement
                | Self::ReturnStatement
        )
    }

    /// True for kinds admissible as class-body members.
    ///
    /// Enum constants are deliberately excluded: they occupy their own
    /// zone of an enum body and follow different separator rules.
    pub fn is_member(self) -> bool {
        matches!(
            self,
            Self::Field | Self::Method | Self::ClassInitializer | Self::Class
        )
    }
}

/// Lexical unit tag carried by every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Comma,
    Semicolon,
    Dot,
    Eq,
    At,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,

    // Declaration keywords
    PackageKw,
    ImportKw,
    ClassKw,
    InterfaceKw,
    EnumKw,
    ExtendsKw,
    ImplementsKw,
    ThrowsKw,
    NewKw,
    IfKw,
    ElseKw,
    ReturnKw,

    // Modifier keywords
    PublicKw,
    ProtectedKw,
    PrivateKw,
    AbstractKw,
    DefaultKw,
    StaticKw,
    FinalKw,
    TransientKw,
    VolatileKw,
    SynchronizedKw,
    NativeKw,
    StrictfpKw,

    // Words and literals
    PrimitiveType,
    Identifier,
    IntLiteral,
    StringLiteral,
    BoolLiteral,

    // Trivia
    Whitespace,
    LineComment,
    BlockComment,
}

impl TokenKind {
    /// Every token kind, for table construction over the closed set.
    pub const ALL: [Self; 54] = [
        Self::LParen,
        Self::RParen,
        Self::LBrace,
        Self::RBrace,
        Self::LBracket,
        Self::RBracket,
        Self::Lt,
        Self::Gt,
        Self::Comma,
        Self::Semicolon,
        Self::Dot,
        Self::Eq,
        Self::At,
        Self::Plus,
        Self::Minus,
        Self::Star,
        Self::Slash,
        Self::Percent,
        Self::EqEq,
        Self::NotEq,
        Self::AndAnd,
        Self::OrOr,
        Self::PackageKw,
        Self::ImportKw,
        Self::ClassKw,
        Self::InterfaceKw,
        Self::EnumKw,
        Self::ExtendsKw,
        Self::ImplementsKw,
        Self::ThrowsKw,
        Self::NewKw,
        Self::IfKw,
        Self::ElseKw,
        Self::ReturnKw,
        Self::PublicKw,
        Self::ProtectedKw,
        Self::PrivateKw,
        Self::AbstractKw,
        Self::DefaultKw,
        Self::StaticKw,
        Self::FinalKw,
        Self::TransientKw,
        Self::VolatileKw,
        Self::SynchronizedKw,
        Self::NativeKw,
        Self::StrictfpKw,
        Self::PrimitiveType,
        Self::Identifier,
        Self::IntLiteral,
        Self::StringLiteral,
        Self::BoolLiteral,
        Self::Whitespace,
        Self::LineComment,
        Self::BlockComment,
    ];

    /// Trivia tokens carry no role and are skipped by structural scans.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment | Self::BlockComment)
    }

    /// True for the modifier keyword tokens admissible in a modifier list.
    pub fn is_modifier(self) -> bool {
        self.modifier_rank().is_some()
    }

    /// Canonical rank of a modifier keyword; modifier lists keep their
    /// keywords sorted by this rank (visibility first, `final` after the
    /// abstract/static group, the rest last).
    pub fn modifier_rank(self) -> Option<u8> {
        let rank = match self {
            Self::PublicKw | Self::ProtectedKw | Self::PrivateKw => 0,
            Self::AbstractKw | Self::DefaultKw | Self::StaticKw => 1,
            Self::FinalKw => 2,
            Self::TransientKw
            | Self::VolatileKw
            | Self::SynchronizedKw
            | Self::NativeKw
            | Self::StrictfpKw => 3,
            _ => return None,
        };
        Some(rank)
    }

    /// True for operator tokens usable as a binary operation sign.
    pub fn is_operation_sign(self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Percent
                | Self::EqEq
                | Self::NotEq
                | Self::AndAnd
                | Self::OrOr
                | Self::Lt
                | Self::Gt
        )
    }

    /// True for literal value tokens.
    pub fn is_literal_value(self) -> bool {
        matches!(self, Self::IntLiteral | Self::StringLiteral | Self::BoolLiteral)
    }

    /// The fixed spelling of this token kind, if it has one.
    ///
    /// Synthesized tokens (separators, brackets, keywords the repairer
    /// conjures) take their text from here; kinds with free text
    /// (identifiers, literals, trivia) return `None`.
    pub fn canonical_text(self) -> Option<&'static str> {
        let text = match self {
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Eq => "=",
            Self::At => "@",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::PackageKw => "package",
            Self::ImportKw => "import",
            Self::ClassKw => "class",
            Self::InterfaceKw => "interface",
            Self::EnumKw => "enum",
            Self::ExtendsKw => "extends",
            Self::ImplementsKw => "implements",
            Self::ThrowsKw => "throws",
            Self::NewKw => "new",
            Self::IfKw => "if",
            Self::ElseKw => "else",
            Self::ReturnKw => "return",
            Self::PublicKw => "public",
            Self::ProtectedKw => "protected",
            Self::PrivateKw => "private",
            Self::AbstractKw => "abstract",
            Self::DefaultKw => "default",
            Self::StaticKw => "static",
            Self::FinalKw => "final",
            Self::TransientKw => "transient",
            Self::VolatileKw => "volatile",
            Self::SynchronizedKw => "synchronized",
            Self::NativeKw => "native",
            Self::StrictfpKw => "strictfp",
            _ => return None,
        };
        Some(text)
    }
}

/// The declaration flavor of a `Class` node, derived from its keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassFlavor {
    Class,
    Interface,
    Enum,
}

impl ClassFlavor {
    /// Maps a declaration keyword token to its flavor.
    pub fn from_keyword(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::ClassKw => Some(Self::Class),
            TokenKind::InterfaceKw => Some(Self::Interface),
            TokenKind::EnumKw => Some(Self::Enum),
            _ => None,
        }
    }
}
