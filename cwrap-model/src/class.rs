//! Classes and their retained operations.

use cwrap_core::{Access, DeclKind, DeclNode, QualifiedName};

use crate::{Operation, OperationKind};

/// A class built up from every declaration of it seen in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    name: String,
    qualified_name: QualifiedName,
    constructors: Vec<Operation>,
    destructors: Vec<Operation>,
    methods: Vec<Operation>,
}

impl Class {
    pub fn new(qualified_name: QualifiedName) -> Self {
        Self {
            name: qualified_name.simple_name().to_string(),
            qualified_name,
            constructors: Vec::new(),
            destructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    /// The C++ spelling of the class type (e.g., `ui::Widget`).
    pub fn spelling(&self) -> String {
        self.qualified_name.to_string()
    }

    pub fn constructors(&self) -> &[Operation] {
        &self.constructors
    }

    pub fn destructors(&self) -> &[Operation] {
        &self.destructors
    }

    pub fn methods(&self) -> &[Operation] {
        &self.methods
    }

    /// All operations: constructors, then destructors, then methods.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.constructors
            .iter()
            .chain(&self.destructors)
            .chain(&self.methods)
    }

    pub fn operation_count(&self) -> usize {
        self.constructors.len() + self.destructors.len() + self.methods.len()
    }

    /// Append an operation unless an identical one is already present.
    ///
    /// Returns true if the operation was added.
    pub fn add(&mut self, op: Operation) -> bool {
        let ops = match op.kind() {
            OperationKind::Constructor => &mut self.constructors,
            OperationKind::Destructor => &mut self.destructors,
            OperationKind::Method => &mut self.methods,
        };

        if ops.contains(&op) {
            return false;
        }
        ops.push(op);
        true
    }

    /// Merge the public operations of one declaration of this class.
    ///
    /// Non-public members and non-callable children are skipped.
    /// Returns the number of operations added.
    pub fn merge<N: DeclNode>(&mut self, decl: &N) -> usize {
        let mut added = 0;

        for child in decl.children() {
            let Some(op) = Operation::from_decl(&child) else {
                if child.kind() == DeclKind::Class {
                    tracing::trace!(class = %self.qualified_name, nested = child.name(), "skipping nested class");
                }
                continue;
            };

            if child.access() != Some(Access::Public) {
                tracing::trace!(operation = %op.qualified_name(), access = ?child.access(), "dropping non-public operation");
                continue;
            }

            if self.add(op) {
                added += 1;
            }
        }

        added
    }
}

#[cfg(test)]
mod tests {
    use cwrap_core::Param;

    use super::*;

    fn op(kind: OperationKind, name: &str, params: Vec<Param>) -> Operation {
        Operation::new(kind, QualifiedName::new(["ui", "Widget", name]), "void", params)
    }

    #[test]
    fn test_add_routes_by_kind() {
        let mut class = Class::new(QualifiedName::new(["ui", "Widget"]));
        class.add(op(OperationKind::Constructor, "Widget", Vec::new()));
        class.add(op(OperationKind::Destructor, "~Widget", Vec::new()));
        class.add(op(OperationKind::Method, "show", Vec::new()));

        assert_eq!(class.constructors().len(), 1);
        assert_eq!(class.destructors().len(), 1);
        assert_eq!(class.methods().len(), 1);
        assert_eq!(class.operation_count(), 3);
    }

    #[test]
    fn test_add_skips_duplicates_but_keeps_overloads() {
        let mut class = Class::new(QualifiedName::new(["ui", "Widget"]));
        assert!(class.add(op(OperationKind::Method, "resize", Vec::new())));
        assert!(!class.add(op(OperationKind::Method, "resize", Vec::new())));
        assert!(class.add(op(
            OperationKind::Method,
            "resize",
            vec![Param::new("int", "w")]
        )));
        assert_eq!(class.methods().len(), 2);
    }

    #[test]
    fn test_operations_order() {
        let mut class = Class::new(QualifiedName::new(["ui", "Widget"]));
        class.add(op(OperationKind::Method, "show", Vec::new()));
        class.add(op(OperationKind::Destructor, "~Widget", Vec::new()));
        class.add(op(OperationKind::Constructor, "Widget", Vec::new()));

        let names: Vec<_> = class.operations().map(Operation::name).collect();
        assert_eq!(names, ["Widget", "~Widget", "show"]);
    }

    #[test]
    fn test_spelling() {
        let class = Class::new(QualifiedName::new(["ui", "detail", "Widget"]));
        assert_eq!(class.name(), "Widget");
        assert_eq!(class.spelling(), "ui::detail::Widget");
    }
}
