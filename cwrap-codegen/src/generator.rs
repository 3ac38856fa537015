//! Emission of opaque structs and forwarding functions.

use std::collections::HashSet;

use cwrap_core::Rename;
use cwrap_model::{Class, Namespace, Operation, OperationKind};

use crate::{GeneratorConfig, Mode, Naming, builder::CodeBuilder};

/// Generates the C wrapper text for model classes.
///
/// For every class this emits one opaque struct holding the wrapped value,
/// followed by one `extern "C"` function per retained operation. Blocks are
/// separated by a blank line and appear in model order, so the same model
/// always yields the same bytes.
#[derive(Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
    naming: Naming,
}

/// Struct and function names already emitted during one generation run.
#[derive(Debug, Default)]
struct EmittedNames {
    seen: HashSet<String>,
}

impl EmittedNames {
    /// Reserve `name`, suffixing `_2`, `_3`, ... if it is taken.
    fn reserve(&mut self, name: String) -> String {
        if self.seen.insert(name.clone()) {
            return name;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}_{n}");
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            naming: Naming::default(),
        }
    }

    /// Use a custom rename hook for emitted identifiers.
    pub fn with_rename(mut self, rename: impl Rename + 'static) -> Self {
        self.naming = Naming::new(rename);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    /// Generate the classes of several namespaces, one output per namespace.
    ///
    /// Struct and function names stay unique across all of them.
    #[tracing::instrument(skip_all, fields(namespaces = namespaces.len()))]
    pub fn generate(&self, namespaces: &[&Namespace]) -> Vec<String> {
        let mut names = EmittedNames::default();
        namespaces
            .iter()
            .map(|ns| self.namespace_with(ns, &mut names))
            .collect()
    }

    /// Generate every class declared directly in `ns`.
    pub fn generate_namespace(&self, ns: &Namespace) -> String {
        self.namespace_with(ns, &mut EmittedNames::default())
    }

    /// Generate one class: its struct, then a block per operation.
    pub fn generate_class(&self, class: &Class) -> String {
        self.class_into(self.builder(), class, &mut EmittedNames::default())
            .build()
    }

    fn builder(&self) -> CodeBuilder {
        CodeBuilder::new(self.config.indent)
    }

    fn namespace_with(&self, ns: &Namespace, names: &mut EmittedNames) -> String {
        tracing::debug!(
            namespace = %ns.qualified_name(),
            classes = ns.classes().len(),
            "generating namespace"
        );
        let mut builder = self.builder();
        for (i, class) in ns.classes().values().enumerate() {
            builder = self.class_into(builder.when(i > 0, CodeBuilder::blank), class, names);
        }
        builder.build()
    }

    fn class_into(&self, builder: CodeBuilder, class: &Class, names: &mut EmittedNames) -> CodeBuilder {
        let struct_name = names.reserve(self.naming.struct_name(class));
        let planned: Vec<(&Operation, Option<String>)> = class
            .operations()
            .map(|op| {
                let name = (!op.is_operator()).then(|| names.reserve(self.naming.function_name(op)));
                (op, name)
            })
            .collect();

        self.struct_into(builder, class, &struct_name)
            .each(planned, |b, (op, name)| {
                let b = b.blank();
                match name {
                    Some(name) => self.function_into(b, class, &struct_name, op, &name),
                    None => {
                        tracing::debug!(operation = %op.qualified_name(), "eliding operator");
                        b.comment(&format!("{} is not wrapped", op.name()))
                    }
                }
            })
    }

    fn struct_into(&self, builder: CodeBuilder, class: &Class, name: &str) -> CodeBuilder {
        match self.config.mode {
            Mode::Declaration => builder.line(&format!("struct {name};")),
            Mode::Definition => builder.block_with_close(&format!("struct {name} {{"), "};", |b| {
                b.line(&format!(
                    "{} {};",
                    class.spelling(),
                    self.naming.member_name(class)
                ))
            }),
        }
    }

    fn function_into(
        &self,
        builder: CodeBuilder,
        class: &Class,
        struct_name: &str,
        op: &Operation,
        name: &str,
    ) -> CodeBuilder {
        let args: Vec<String> = op
            .params()
            .iter()
            .enumerate()
            .map(|(i, param)| self.naming.param_name(param, i))
            .collect();

        let mut self_name = self.naming.self_name(class);
        while args.contains(&self_name) {
            self_name.push('_');
        }

        let params = std::iter::once(format!("struct {struct_name}* {self_name}"))
            .chain(
                op.params()
                    .iter()
                    .zip(&args)
                    .map(|(param, arg)| format!("{} {arg}", param.ty)),
            )
            .collect::<Vec<_>>()
            .join(", ");

        let result_type = match op.kind() {
            OperationKind::Constructor | OperationKind::Destructor => "void",
            OperationKind::Method => op.result_type(),
        };
        let signature = format!("extern \"C\" {result_type} {name}({params})");

        match self.config.mode {
            Mode::Declaration => builder.line(&format!("{signature};")),
            Mode::Definition => {
                let target = format!("{self_name}->{}", self.naming.member_name(class));
                let args = args.join(", ");
                let body = match op.kind() {
                    OperationKind::Constructor => {
                        format!("new (&{target}) {}({args});", class.spelling())
                    }
                    OperationKind::Destructor => format!("{target}.{}();", op.name()),
                    OperationKind::Method => format!("return {target}.{}({args});", op.name()),
                };
                builder.block_with_close(&format!("{signature} {{"), "}", |b| b.line(&body))
            }
        }
    }
}
