//! Scope-qualified declaration names.

use std::fmt;

use crate::decl::DeclNode;

/// A declaration's scope path, outermost component first.
///
/// Computed once from the semantic-parent chain and stored by value, so
/// consumers never need a live link back into the declaration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    components: Vec<String>,
}

impl QualifiedName {
    /// The scope separator used when displaying a qualified name.
    pub const SEPARATOR: &'static str = "::";

    pub fn new(components: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `::`-separated path (e.g., "net::http").
    pub fn parse(path: &str) -> Self {
        Self::new(path.split(Self::SEPARATOR).filter(|c| !c.is_empty()))
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// The last component, or "" for an empty path.
    pub fn simple_name(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// A new path with `name` appended.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut components = self.components.clone();
        components.push(name.into());
        Self { components }
    }

    /// A new path with the last component replaced by `name`.
    pub fn with_simple_name(&self, name: impl Into<String>) -> Self {
        let mut components = self.components.clone();
        components.pop();
        components.push(name.into());
        Self { components }
    }

    /// Join the components with an arbitrary separator.
    pub fn join(&self, sep: &str) -> String {
        self.components.join(sep)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join(Self::SEPARATOR))
    }
}

/// Compute the qualified name of a declaration.
///
/// Walks the semantic-parent chain starting at `decl` itself and stops at
/// the first node without a name. An anonymous namespace therefore cuts the
/// path, and the nameless root never contributes a component.
pub fn qualified_name<N: DeclNode>(decl: &N) -> QualifiedName {
    let mut components = Vec::new();
    let mut current = Some(decl.clone());

    while let Some(node) = current {
        if node.name().is_empty() {
            break;
        }
        components.push(node.name().to_string());
        current = node.parent();
    }

    components.reverse();
    QualifiedName { components }
}
