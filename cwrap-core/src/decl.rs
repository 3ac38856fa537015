//! The declaration interface consumed by the model builder.
//!
//! A front-end exposes its parsed tree through [`DeclNode`]; nothing
//! downstream touches the front-end's native representation.

use std::fmt;

/// The kind of a declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Root of a parsed header.
    TranslationUnit,
    Namespace,
    /// A `class`, `struct` or `union` declaration or definition.
    Class,
    Constructor,
    Destructor,
    Method,
    /// Anything else (fields, free functions, templates, typedefs, ...).
    Other,
}

impl DeclKind {
    /// Returns true for constructors, destructors and methods.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Constructor | Self::Destructor | Self::Method)
    }
}

/// Declared accessibility of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Protected,
    Private,
}

impl Access {
    /// Parse an access specifier spelling (`public`, `protected`, `private`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Protected => write!(f, "protected"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// A parameter of a callable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    /// Type spelling, emitted verbatim.
    pub ty: String,
    /// Parameter name; empty when the parameter is unnamed.
    pub name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Read-only view of one node in an external declaration tree.
///
/// Implementors are expected to be cheap handles (typically a reference into
/// an arena plus an index), hence the `Clone` bound.
pub trait DeclNode: Clone {
    /// The node's kind.
    fn kind(&self) -> DeclKind;

    /// Simple name; empty for anonymous scopes and the root.
    fn name(&self) -> &str;

    /// The semantic parent, if any.
    fn parent(&self) -> Option<Self>;

    /// Children in declaration order.
    fn children(&self) -> Vec<Self>;

    /// Declared accessibility for class members.
    fn access(&self) -> Option<Access>;

    /// Parameters in declaration order (empty for non-callables).
    fn params(&self) -> Vec<Param>;

    /// Result type spelling (empty for non-callables).
    fn result_type(&self) -> &str;
}
