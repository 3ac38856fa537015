//! Constructors, destructors and methods.

use cwrap_core::{DeclKind, DeclNode, Param, QualifiedName, qualified_name};

/// What kind of member function an [`Operation`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Constructor,
    Destructor,
    Method,
}

impl OperationKind {
    pub fn from_decl_kind(kind: DeclKind) -> Option<Self> {
        match kind {
            DeclKind::Constructor => Some(Self::Constructor),
            DeclKind::Destructor => Some(Self::Destructor),
            DeclKind::Method => Some(Self::Method),
            DeclKind::TranslationUnit
            | DeclKind::Namespace
            | DeclKind::Class
            | DeclKind::Other => None,
        }
    }
}

/// A public member function retained for wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    kind: OperationKind,
    name: String,
    qualified_name: QualifiedName,
    result_type: String,
    params: Vec<Param>,
}

impl Operation {
    pub fn new(
        kind: OperationKind,
        qualified_name: QualifiedName,
        result_type: impl Into<String>,
        params: Vec<Param>,
    ) -> Self {
        Self {
            kind,
            name: qualified_name.simple_name().to_string(),
            qualified_name,
            result_type: result_type.into(),
            params,
        }
    }

    /// Build an operation from a callable declaration node.
    ///
    /// Returns `None` if the node is not a constructor, destructor or method.
    pub fn from_decl<N: DeclNode>(decl: &N) -> Option<Self> {
        let kind = OperationKind::from_decl_kind(decl.kind())?;
        Some(Self {
            kind,
            name: decl.name().to_string(),
            qualified_name: qualified_name(decl),
            result_type: decl.result_type().to_string(),
            params: decl.params(),
        })
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// The original simple name (e.g., `getWidth`, `Widget`, `~Widget`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    /// The result type spelling, verbatim from the front-end.
    pub fn result_type(&self) -> &str {
        &self.result_type
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Whether this is an overloaded operator or conversion function.
    ///
    /// `operatorFoo` is an ordinary method; `operator==`, `operator()` and
    /// `operator bool` are not.
    pub fn is_operator(&self) -> bool {
        match self.name.strip_prefix("operator") {
            Some(rest) => !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'),
            None => false,
        }
    }
}
