//! Namespaces and the translation unit root.

use cwrap_core::{DeclKind, DeclNode, QualifiedName, qualified_name};
use indexmap::IndexMap;

use crate::{Class, UnresolvedScopeError};

/// Child namespaces and classes of a scope, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Members {
    namespaces: IndexMap<String, Namespace>,
    classes: IndexMap<String, Class>,
}

impl Members {
    /// Merge every namespace and class child of `decl`.
    fn merge_children<N: DeclNode>(&mut self, decl: &N) {
        for child in decl.children() {
            match child.kind() {
                DeclKind::Namespace => {
                    self.namespaces
                        .entry(child.name().to_string())
                        .or_insert_with(|| Namespace::new(qualified_name(&child)))
                        .merge(&child);
                }
                DeclKind::Class if child.name().is_empty() => {
                    tracing::trace!(scope = %qualified_name(decl), "skipping nameless class");
                }
                DeclKind::Class => {
                    let class = self
                        .classes
                        .entry(child.name().to_string())
                        .or_insert_with(|| Class::new(qualified_name(&child)));
                    let added = class.merge(&child);
                    tracing::debug!(class = %class.qualified_name(), added, "merged class");
                }
                DeclKind::TranslationUnit
                | DeclKind::Constructor
                | DeclKind::Destructor
                | DeclKind::Method
                | DeclKind::Other => {}
            }
        }
    }
}

/// A namespace and everything declared in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    qualified_name: QualifiedName,
    members: Members,
}

impl Namespace {
    pub fn new(qualified_name: QualifiedName) -> Self {
        Self {
            name: qualified_name.simple_name().to_string(),
            qualified_name,
            members: Members::default(),
        }
    }

    /// Simple name; empty for an anonymous namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    pub fn namespaces(&self) -> &IndexMap<String, Namespace> {
        &self.members.namespaces
    }

    pub fn classes(&self) -> &IndexMap<String, Class> {
        &self.members.classes
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.members.namespaces.get(name)
    }

    pub fn class(&self, name: &str) -> Option<&Class> {
        self.members.classes.get(name)
    }

    /// Merge the contents of one declaration of this namespace.
    pub fn merge<N: DeclNode>(&mut self, decl: &N) {
        self.members.merge_children(decl);
    }
}

/// The root of the model: everything declared at file scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationUnit {
    members: Members,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model from the root of a declaration tree.
    #[tracing::instrument(skip_all)]
    pub fn build<N: DeclNode>(root: &N) -> Self {
        let mut unit = Self::new();
        unit.merge(root);
        tracing::debug!(
            namespaces = unit.members.namespaces.len(),
            classes = unit.members.classes.len(),
            "built translation unit"
        );
        unit
    }

    pub fn merge<N: DeclNode>(&mut self, decl: &N) {
        self.members.merge_children(decl);
    }

    pub fn namespaces(&self) -> &IndexMap<String, Namespace> {
        &self.members.namespaces
    }

    pub fn classes(&self) -> &IndexMap<String, Class> {
        &self.members.classes
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.members.namespaces.get(name)
    }

    pub fn class(&self, name: &str) -> Option<&Class> {
        self.members.classes.get(name)
    }

    /// Resolve a requested namespace scope.
    ///
    /// A plain name is looked up among the top-level namespaces; a
    /// `::`-separated path (`outer::inner`) walks nested namespaces.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvedScopeError`] if any component is missing.
    pub fn resolve(&self, scope: &str) -> Result<&Namespace, UnresolvedScopeError> {
        let unresolved =
            || UnresolvedScopeError::new(scope, self.members.namespaces.keys().map(String::as_str));

        let path = QualifiedName::parse(scope);
        let mut components = path.components().iter();
        let first = components.next().ok_or_else(unresolved)?;

        let mut namespace = self.namespace(first).ok_or_else(unresolved)?;
        for component in components {
            namespace = namespace.namespace(component).ok_or_else(unresolved)?;
        }
        Ok(namespace)
    }
}

#[cfg(test)]
mod tests {
    use cwrap_frontend::DeclTree;

    use super::*;

    fn unit_with(paths: &[&[&str]]) -> TranslationUnit {
        let mut tree = DeclTree::new();
        for path in paths {
            let mut parent = tree.root_id();
            for component in path.iter() {
                parent = tree.namespace(parent, component);
            }
        }
        TranslationUnit::build(&tree.root())
    }

    #[test]
    fn test_resolve_top_level() {
        let unit = unit_with(&[&["geo"], &["ui"]]);
        let ns = unit.resolve("ui").expect("ui exists");
        assert_eq!(ns.name(), "ui");
    }

    #[test]
    fn test_resolve_nested_path() {
        let unit = unit_with(&[&["net", "http"]]);
        let ns = unit.resolve("net::http").expect("net::http exists");
        assert_eq!(ns.qualified_name().to_string(), "net::http");
    }

    #[test]
    fn test_resolve_missing_scope() {
        let unit = unit_with(&[&["geo"], &["ui"]]);
        let err = unit.resolve("gui").expect_err("gui is missing");
        assert_eq!(err.scope, "gui");
        assert_eq!(err.available, "geo, ui");
        assert_eq!(
            err.to_string(),
            "namespace 'gui' was not found in the parsed header"
        );
    }

    #[test]
    fn test_resolve_missing_nested_component() {
        let unit = unit_with(&[&["net", "http"]]);
        let err = unit.resolve("net::ftp").expect_err("net::ftp is missing");
        assert_eq!(err.scope, "net::ftp");
    }

    #[test]
    fn test_resolve_empty_scope() {
        let unit = TranslationUnit::new();
        let err = unit.resolve("").expect_err("empty scope");
        assert_eq!(err.available, "(none)");
    }
}
