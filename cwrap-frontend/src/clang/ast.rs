//! Lowering of clang's JSON AST dump into a [`DeclTree`].

use cwrap_core::{Access, DeclKind, Param};
use serde::Deserialize;
use serde_json::Value;

use crate::{DeclTree, Error, NodeData, NodeId, Result};

/// The subset of a clang JSON AST node the adapter reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClangNode {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tag_used: Option<String>,
    #[serde(default)]
    is_implicit: bool,
    #[serde(default)]
    explicitly_deleted: bool,
    #[serde(default)]
    access: Option<String>,
    #[serde(default, rename = "type")]
    ty: Option<Value>,
    #[serde(default)]
    inner: Vec<ClangNode>,
}

impl ClangNode {
    fn qual_type(&self) -> &str {
        self.ty
            .as_ref()
            .and_then(|ty| ty.get("qualType"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    fn access(&self) -> Option<Access> {
        self.access.as_deref().and_then(Access::parse)
    }

    fn decl_kind(&self) -> DeclKind {
        match self.kind.as_str() {
            "NamespaceDecl" => DeclKind::Namespace,
            "CXXRecordDecl" => DeclKind::Class,
            "CXXConstructorDecl" => DeclKind::Constructor,
            "CXXDestructorDecl" => DeclKind::Destructor,
            "CXXMethodDecl" | "CXXConversionDecl" => DeclKind::Method,
            _ => DeclKind::Other,
        }
    }

    /// Member access in effect before the first access specifier.
    fn default_member_access(&self) -> Access {
        match self.tag_used.as_deref() {
            Some("class") => Access::Private,
            _ => Access::Public,
        }
    }
}

impl DeclTree {
    /// Build a tree from the output of `clang -Xclang -ast-dump=json`.
    ///
    /// # Errors
    ///
    /// Fails if the input is not valid JSON or its root is not a
    /// `TranslationUnitDecl`.
    pub fn from_clang_json(json: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let root = ClangNode::deserialize(&mut de).map_err(Error::invalid_ast)?;
        de.end().map_err(Error::invalid_ast)?;

        if root.kind != "TranslationUnitDecl" {
            return Err(Box::new(Error::UnexpectedRoot { kind: root.kind }));
        }

        let mut tree = DeclTree::new();
        let root_id = tree.root_id();
        lower_scope(&mut tree, root_id, &root.inner, None);
        Ok(tree)
    }
}

fn lower_scope(tree: &mut DeclTree, parent: NodeId, nodes: &[ClangNode], access: Option<Access>) {
    let mut current = access;

    for node in nodes {
        // deleted members have nothing to forward to
        if node.is_implicit || node.explicitly_deleted {
            continue;
        }

        match node.kind.as_str() {
            "AccessSpecDecl" => {
                current = node.access().or(current);
                continue;
            }
            // `extern "C++" { ... }` doesn't introduce a scope
            "LinkageSpecDecl" => {
                lower_scope(tree, parent, &node.inner, current);
                continue;
            }
            _ => {}
        }

        let kind = node.decl_kind();
        let mut data = NodeData::new(kind, node.name.clone().unwrap_or_default());
        data.access = node.access().or(current);

        if kind.is_callable() {
            data.result_type = result_type(node.qual_type());
            data.params = node
                .inner
                .iter()
                .filter(|child| child.kind == "ParmVarDecl")
                .map(|p| Param::new(p.qual_type(), p.name.clone().unwrap_or_default()))
                .collect();
        }

        let id = tree.insert(parent, data);

        match kind {
            DeclKind::Namespace => lower_scope(tree, id, &node.inner, None),
            DeclKind::Class => {
                lower_scope(tree, id, &node.inner, Some(node.default_member_access()))
            }
            DeclKind::TranslationUnit
            | DeclKind::Constructor
            | DeclKind::Destructor
            | DeclKind::Method
            | DeclKind::Other => {}
        }
    }
}

/// Extract the result type from a function type spelling.
///
/// `"int (double, char) const"` yields `"int"`; a trailing return type
/// (`"auto () -> int"`) yields the type after the arrow. The parameter list
/// is the last parenthesized group, so result types containing parentheses
/// (`"std::function<void (int)> ()"`) survive intact, and a returned function
/// pointer (`"void (*(int))(double)"`) yields `"void (*)(double)"`.
fn result_type(function_type: &str) -> String {
    let spelling = function_type.trim();
    if !spelling.contains(')') {
        return spelling.to_string();
    }

    if let Some(rest) = spelling.strip_prefix("auto") {
        if rest.trim_start().starts_with('(') {
            if let Some((_, trailing)) = spelling.rsplit_once("->") {
                return trailing.trim().to_string();
            }
        }
    }

    let unqualified = strip_function_qualifiers(spelling);
    let Some(params_open) = last_group(unqualified) else {
        return unqualified.to_string();
    };
    let head = unqualified[..params_open].trim_end();

    // `R (*(P))(Q)`: the parameter list sits inside the declarator group
    if let Some(decl_open) = last_group(head) {
        let declarator = head[decl_open + 1..head.len() - 1].trim_end();
        if let Some(inner_open) = last_group(declarator) {
            return format!(
                "{}({}){}",
                &head[..decl_open],
                declarator[..inner_open].trim_end(),
                &unqualified[params_open..]
            );
        }
    }

    head.to_string()
}

/// Index of the `(` matching a `)` that ends `s`, if `s` ends with one.
fn last_group(s: &str) -> Option<usize> {
    if !s.ends_with(')') {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Drop cv/ref qualifiers and exception specifications after the parameter list.
fn strip_function_qualifiers(spelling: &str) -> &str {
    const KEYWORDS: [&str; 3] = ["const", "volatile", "noexcept"];

    let mut s = spelling.trim_end();
    loop {
        if let Some(rest) = s.strip_suffix('&') {
            s = rest.trim_end();
            continue;
        }

        if let Some(rest) = KEYWORDS.iter().find_map(|kw| s.strip_suffix(kw)) {
            if !rest.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
                s = rest.trim_end();
                continue;
            }
        }

        // `noexcept(expr)` and `throw(...)`
        if let Some(open) = last_group(s) {
            let before = s[..open].trim_end();
            if let Some(rest) = before
                .strip_suffix("noexcept")
                .or_else(|| before.strip_suffix("throw"))
            {
                s = rest.trim_end();
                continue;
            }
        }

        return s;
    }
}

#[cfg(test)]
mod tests {
    use cwrap_core::{DeclNode, qualified_name};

    use super::*;

    fn child_names(node: crate::Node<'_>) -> Vec<String> {
        node.children()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    const WIDGET_AST: &str = r#"{
      "id": "0x1",
      "kind": "TranslationUnitDecl",
      "inner": [
        { "id": "0x2", "kind": "TypedefDecl", "isImplicit": true, "name": "__int128_t" },
        {
          "id": "0x3",
          "kind": "NamespaceDecl",
          "name": "ui",
          "inner": [
            {
              "id": "0x4",
              "kind": "CXXRecordDecl",
              "name": "Widget",
              "tagUsed": "class",
              "completeDefinition": true,
              "inner": [
                { "id": "0x5", "kind": "CXXRecordDecl", "isImplicit": true, "name": "Widget", "tagUsed": "class" },
                { "id": "0x6", "kind": "FieldDecl", "name": "width_", "type": { "qualType": "int" } },
                { "id": "0x7", "kind": "AccessSpecDecl", "access": "public" },
                {
                  "id": "0x8",
                  "kind": "CXXConstructorDecl",
                  "name": "Widget",
                  "type": { "qualType": "void (int, int)" },
                  "inner": [
                    { "id": "0x9", "kind": "ParmVarDecl", "name": "width", "type": { "qualType": "int" } },
                    { "id": "0xa", "kind": "ParmVarDecl", "type": { "qualType": "int" } }
                  ]
                },
                { "id": "0xb", "kind": "CXXDestructorDecl", "name": "~Widget", "type": { "qualType": "void () noexcept" } },
                {
                  "id": "0xc",
                  "kind": "CXXMethodDecl",
                  "name": "getWidth",
                  "type": { "qualType": "int () const" },
                  "inner": [ { "id": "0xd", "kind": "CompoundStmt" } ]
                },
                { "id": "0xe", "kind": "AccessSpecDecl", "access": "private" },
                { "id": "0xf", "kind": "CXXMethodDecl", "name": "layout", "type": { "qualType": "void ()" } }
              ]
            }
          ]
        }
      ]
    }"#;

    #[test]
    fn test_lowers_namespaces_and_classes() {
        let tree = DeclTree::from_clang_json(WIDGET_AST).expect("valid AST");
        let root = tree.root();
        assert_eq!(child_names(root), ["ui"]);

        let ns = root.children()[0];
        assert_eq!(ns.kind(), DeclKind::Namespace);
        let class = ns.children()[0];
        assert_eq!(class.kind(), DeclKind::Class);
        assert_eq!(qualified_name(&class).to_string(), "ui::Widget");
    }

    #[test]
    fn test_skips_implicit_and_access_specs() {
        let tree = DeclTree::from_clang_json(WIDGET_AST).expect("valid AST");
        let class = tree.root().children()[0].children()[0];
        assert_eq!(
            child_names(class),
            ["width_", "Widget", "~Widget", "getWidth", "layout"]
        );
    }

    #[test]
    fn test_member_access_follows_specifiers() {
        let tree = DeclTree::from_clang_json(WIDGET_AST).expect("valid AST");
        let class = tree.root().children()[0].children()[0];
        let access: Vec<_> = class.children().iter().map(|c| c.access()).collect();
        assert_eq!(
            access,
            [
                Some(Access::Private),
                Some(Access::Public),
                Some(Access::Public),
                Some(Access::Public),
                Some(Access::Private),
            ]
        );
    }

    #[test]
    fn test_callable_signatures() {
        let tree = DeclTree::from_clang_json(WIDGET_AST).expect("valid AST");
        let members = tree.root().children()[0].children()[0].children();

        let ctor = members[1];
        assert_eq!(ctor.kind(), DeclKind::Constructor);
        assert_eq!(ctor.result_type(), "void");
        assert_eq!(
            ctor.params(),
            [Param::new("int", "width"), Param::new("int", "")]
        );

        let dtor = members[2];
        assert_eq!(dtor.kind(), DeclKind::Destructor);
        assert_eq!(dtor.result_type(), "void");

        let getter = members[3];
        assert_eq!(getter.result_type(), "int");
        assert!(getter.params().is_empty());
    }

    #[test]
    fn test_struct_members_default_to_public() {
        let json = r#"{
          "kind": "TranslationUnitDecl",
          "inner": [
            {
              "kind": "CXXRecordDecl",
              "name": "Point",
              "tagUsed": "struct",
              "inner": [
                { "kind": "CXXMethodDecl", "name": "norm", "type": { "qualType": "double ()" } }
              ]
            }
          ]
        }"#;
        let tree = DeclTree::from_clang_json(json).expect("valid AST");
        let method = tree.root().children()[0].children()[0];
        assert_eq!(method.access(), Some(Access::Public));
    }

    #[test]
    fn test_linkage_spec_is_transparent() {
        let json = r#"{
          "kind": "TranslationUnitDecl",
          "inner": [
            {
              "kind": "LinkageSpecDecl",
              "language": "C++",
              "inner": [ { "kind": "NamespaceDecl", "name": "core" } ]
            }
          ]
        }"#;
        let tree = DeclTree::from_clang_json(json).expect("valid AST");
        assert_eq!(child_names(tree.root()), ["core"]);
    }

    #[test]
    fn test_anonymous_namespace_has_empty_name() {
        let json = r#"{
          "kind": "TranslationUnitDecl",
          "inner": [ { "kind": "NamespaceDecl", "inner": [ { "kind": "CXXRecordDecl", "name": "Hidden", "tagUsed": "class" } ] } ]
        }"#;
        let tree = DeclTree::from_clang_json(json).expect("valid AST");
        let ns = tree.root().children()[0];
        assert_eq!(ns.name(), "");
        assert_eq!(qualified_name(&ns.children()[0]).to_string(), "Hidden");
    }

    #[test]
    fn test_skips_deleted_members() {
        let json = r#"{
          "kind": "TranslationUnitDecl",
          "inner": [
            {
              "kind": "CXXRecordDecl",
              "name": "Handle",
              "tagUsed": "struct",
              "inner": [
                {
                  "kind": "CXXConstructorDecl",
                  "name": "Handle",
                  "explicitlyDeleted": true,
                  "type": { "qualType": "void (const Handle &)" },
                  "inner": [ { "kind": "ParmVarDecl", "type": { "qualType": "const Handle &" } } ]
                },
                { "kind": "CXXMethodDecl", "name": "close", "type": { "qualType": "void ()" } }
              ]
            }
          ]
        }"#;
        let tree = DeclTree::from_clang_json(json).expect("valid AST");
        assert_eq!(child_names(tree.root().children()[0]), ["close"]);
    }

    #[test]
    fn test_templates_are_other() {
        let json = r#"{
          "kind": "TranslationUnitDecl",
          "inner": [ { "kind": "ClassTemplateDecl", "name": "Box" } ]
        }"#;
        let tree = DeclTree::from_clang_json(json).expect("valid AST");
        assert_eq!(tree.root().children()[0].kind(), DeclKind::Other);
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = DeclTree::from_clang_json("{ not json").expect_err("invalid JSON");
        assert!(matches!(*err, Error::InvalidAst { .. }));
    }

    #[test]
    fn test_rejects_unexpected_root() {
        let err = DeclTree::from_clang_json(r#"{ "kind": "NamespaceDecl" }"#)
            .expect_err("wrong root kind");
        assert!(matches!(*err, Error::UnexpectedRoot { .. }));
    }

    #[test]
    fn test_result_type() {
        assert_eq!(result_type("int (double, char) const"), "int");
        assert_eq!(result_type("void ()"), "void");
        assert_eq!(result_type("const std::string &()"), "const std::string &");
        assert_eq!(result_type("auto () -> int"), "int");
        assert_eq!(result_type("int"), "int");
    }

    #[test]
    fn test_result_type_with_parentheses() {
        assert_eq!(
            result_type("std::function<void (int)> ()"),
            "std::function<void (int)>"
        );
        assert_eq!(result_type("void (*(int))(double)"), "void (*)(double)");
        assert_eq!(result_type("decltype(x) ()"), "decltype(x)");
    }

    #[test]
    fn test_result_type_ignores_qualifiers() {
        assert_eq!(result_type("void () noexcept"), "void");
        assert_eq!(result_type("int (int) const &&"), "int");
        assert_eq!(result_type("bool () const noexcept(true)"), "bool");
        assert_eq!(result_type("void () throw()"), "void");
        assert_eq!(
            result_type("std::function<void (int)> () const &"),
            "std::function<void (int)>"
        );
    }
}
