//! Arena-backed declaration tree.
//!
//! Nodes are stored in a flat vector and refer to each other by [`NodeId`].
//! Parent links are plain indices, so the tree has no reference cycles.

use cwrap_core::{Access, DeclKind, DeclNode, Param};

/// Index of a node inside a [`DeclTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The payload of one declaration node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: DeclKind,
    pub name: String,
    pub access: Option<Access>,
    pub params: Vec<Param>,
    pub result_type: String,
}

impl NodeData {
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            access: None,
            params: Vec::new(),
            result_type: String::new(),
        }
    }

    /// Set the declared accessibility.
    pub fn access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    /// Add multiple parameters.
    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Set the result type spelling.
    pub fn result_type(mut self, ty: impl Into<String>) -> Self {
        self.result_type = ty.into();
        self
    }
}

#[derive(Debug, Clone)]
struct Entry {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed declaration tree rooted at a nameless translation unit.
#[derive(Debug, Clone)]
pub struct DeclTree {
    entries: Vec<Entry>,
}

impl DeclTree {
    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                data: NodeData::new(DeclKind::TranslationUnit, ""),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> Node<'_> {
        self.node(self.root_id())
    }

    /// Get a handle to a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        assert!(id.0 < self.entries.len(), "node id out of range");
        Node { tree: self, id }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Append a child node under `parent`.
    pub fn insert(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.entries[parent.0].children.push(id);
        id
    }

    pub fn namespace(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.insert(parent, NodeData::new(DeclKind::Namespace, name))
    }

    pub fn class(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.insert(parent, NodeData::new(DeclKind::Class, name))
    }

    /// Add a constructor to `class`; it takes the class's name.
    pub fn constructor(
        &mut self,
        class: NodeId,
        access: Access,
        params: impl IntoIterator<Item = Param>,
    ) -> NodeId {
        let name = self.entries[class.0].data.name.clone();
        let data = NodeData::new(DeclKind::Constructor, name)
            .access(access)
            .params(params)
            .result_type("void");
        self.insert(class, data)
    }

    /// Add a destructor to `class`; it is named `~` followed by the class's name.
    pub fn destructor(&mut self, class: NodeId, access: Access) -> NodeId {
        let name = format!("~{}", self.entries[class.0].data.name);
        let data = NodeData::new(DeclKind::Destructor, name)
            .access(access)
            .result_type("void");
        self.insert(class, data)
    }

    pub fn method(
        &mut self,
        class: NodeId,
        name: &str,
        access: Access,
        result_type: &str,
        params: impl IntoIterator<Item = Param>,
    ) -> NodeId {
        let data = NodeData::new(DeclKind::Method, name)
            .access(access)
            .params(params)
            .result_type(result_type);
        self.insert(class, data)
    }
}

impl Default for DeclTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A borrowed handle to one node of a [`DeclTree`].
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    tree: &'a DeclTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> &'a NodeData {
        &self.entry().data
    }

    fn entry(&self) -> &'a Entry {
        &self.tree.entries[self.id.0]
    }
}

impl DeclNode for Node<'_> {
    fn kind(&self) -> DeclKind {
        self.data().kind
    }

    fn name(&self) -> &str {
        &self.data().name
    }

    fn parent(&self) -> Option<Self> {
        self.entry().parent.map(|id| self.tree.node(id))
    }

    fn children(&self) -> Vec<Self> {
        self.entry()
            .children
            .iter()
            .map(|&id| self.tree.node(id))
            .collect()
    }

    fn access(&self) -> Option<Access> {
        self.data().access
    }

    fn params(&self) -> Vec<Param> {
        self.data().params.clone()
    }

    fn result_type(&self) -> &str {
        &self.data().result_type
    }
}

#[cfg(test)]
mod tests {
    use cwrap_core::qualified_name;

    use super::*;

    #[test]
    fn test_new_tree_has_nameless_root() {
        let tree = DeclTree::new();
        let root = tree.root();
        assert_eq!(root.kind(), DeclKind::TranslationUnit);
        assert_eq!(root.name(), "");
        assert!(root.parent().is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = DeclTree::new();
        let root = tree.root_id();
        tree.namespace(root, "b");
        tree.namespace(root, "a");
        tree.class(root, "C");

        let names: Vec<_> = tree
            .root()
            .children()
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, ["b", "a", "C"]);
    }

    #[test]
    fn test_constructor_and_destructor_names() {
        let mut tree = DeclTree::new();
        let root = tree.root_id();
        let class = tree.class(root, "Widget");
        let ctor = tree.constructor(class, Access::Public, [Param::new("int", "w")]);
        let dtor = tree.destructor(class, Access::Public);

        assert_eq!(tree.node(ctor).name(), "Widget");
        assert_eq!(tree.node(ctor).params(), [Param::new("int", "w")]);
        assert_eq!(tree.node(dtor).name(), "~Widget");
        assert_eq!(tree.node(dtor).result_type(), "void");
    }

    #[test]
    fn test_parent_links_drive_qualified_name() {
        let mut tree = DeclTree::new();
        let root = tree.root_id();
        let ns = tree.namespace(root, "geo");
        let class = tree.class(ns, "Point");
        let method = tree.method(class, "getX", Access::Public, "double", []);

        assert_eq!(
            qualified_name(&tree.node(method)).to_string(),
            "geo::Point::getX"
        );
    }
}
