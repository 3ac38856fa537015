//! Generate operation - header in, wrapper text out.

use std::path::PathBuf;

use cwrap_codegen::{Generator, GeneratorConfig};
use cwrap_frontend::{DeclTree, Diagnostic, FrontEnd, ParseOutput};
use cwrap_model::UnresolvedScopeError;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::reports::GenerateReport;

/// Inputs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// The header to parse.
    pub header: PathBuf,
    /// Namespaces to wrap, in output order.
    pub namespaces: Vec<String>,
    /// Extra arguments passed to the front-end verbatim.
    pub flags: Vec<String>,
    pub config: GeneratorConfig,
}

/// Why a run produced no output.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum Failure {
    #[error("the front-end reported {errors} error(s); no code was generated")]
    #[diagnostic(
        code(cwrap::parse_diagnostic),
        help("fix the errors listed above, or pass the missing flags after `--`")
    )]
    ParseDiagnostic { errors: usize },

    #[error("the front-end produced no declaration tree")]
    #[diagnostic(code(cwrap::no_tree))]
    NoTree,

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnresolvedScope(#[from] UnresolvedScopeError),
}

/// Terminal result of a run.
#[derive(Debug)]
pub enum Outcome {
    /// Generated text for every requested namespace, in requested order.
    Succeeded(Vec<String>),
    Failed(Failure),
}

/// Driver states; each carries what the previous state produced.
enum Driver {
    Parsing,
    Checking(ParseOutput),
    Generating(DeclTree),
    Done(Outcome),
}

impl Driver {
    fn advance<F: FrontEnd>(
        self,
        frontend: &F,
        options: &GenerateOptions,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> cwrap_frontend::Result<Self> {
        let next = match self {
            Driver::Parsing => Driver::Checking(frontend.parse(&options.header, &options.flags)?),
            Driver::Checking(parsed) => {
                let errors = parsed.error_count();
                diagnostics.extend(parsed.diagnostics);
                match parsed.tree {
                    _ if errors > 0 => Driver::Done(Outcome::Failed(Failure::ParseDiagnostic { errors })),
                    None => Driver::Done(Outcome::Failed(Failure::NoTree)),
                    Some(tree) => Driver::Generating(tree),
                }
            }
            Driver::Generating(tree) => Driver::Done(match generate_namespaces(&tree, options) {
                Ok(outputs) => Outcome::Succeeded(outputs),
                Err(e) => Outcome::Failed(e.into()),
            }),
            done @ Driver::Done(_) => done,
        };
        Ok(next)
    }
}

fn generate_namespaces(tree: &DeclTree, options: &GenerateOptions) -> Result<Vec<String>, UnresolvedScopeError> {
    let unit = cwrap_model::build(&tree.root(), &options.namespaces)?;
    let namespaces = options
        .namespaces
        .iter()
        .map(|scope| unit.resolve(scope))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Generator::new(options.config).generate(&namespaces))
}

/// Execute the generate operation.
///
/// Problems in the header end up in the report; only a front-end that could
/// not run at all is an error.
#[tracing::instrument(skip_all, fields(header = %options.header.display()))]
pub fn generate<F: FrontEnd>(frontend: &F, options: &GenerateOptions) -> cwrap_frontend::Result<GenerateReport> {
    let mut diagnostics = Vec::new();
    let mut driver = Driver::Parsing;

    let outcome = loop {
        driver = match driver.advance(frontend, options, &mut diagnostics)? {
            Driver::Done(outcome) => break outcome,
            next => next,
        };
    };

    match &outcome {
        Outcome::Succeeded(outputs) => tracing::debug!(namespaces = outputs.len(), "generation succeeded"),
        Outcome::Failed(failure) => tracing::debug!(%failure, "generation failed"),
    }

    Ok(GenerateReport {
        diagnostics,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use cwrap_codegen::Mode;
    use cwrap_core::Access;
    use cwrap_frontend::Severity;

    use super::*;

    struct FakeFrontEnd(fn() -> ParseOutput);

    impl FrontEnd for FakeFrontEnd {
        fn parse(&self, _header: &Path, _flags: &[String]) -> cwrap_frontend::Result<ParseOutput> {
            Ok((self.0)())
        }
    }

    fn two_namespaces() -> DeclTree {
        let mut tree = DeclTree::new();
        let root = tree.root_id();
        let ui = tree.namespace(root, "ui");
        let widget = tree.class(ui, "Widget");
        tree.method(widget, "show", Access::Public, "void", []);
        let io = tree.namespace(root, "io");
        let file = tree.class(io, "File");
        tree.method(file, "close", Access::Public, "void", []);
        tree
    }

    fn options(namespaces: &[&str]) -> GenerateOptions {
        GenerateOptions {
            header: PathBuf::from("widget.h"),
            namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
            flags: Vec::new(),
            config: GeneratorConfig::new(Mode::Declaration),
        }
    }

    #[test]
    fn test_success_keeps_requested_order() {
        let frontend = FakeFrontEnd(|| ParseOutput {
            diagnostics: Vec::new(),
            tree: Some(two_namespaces()),
        });

        let report = generate(&frontend, &options(&["io", "ui"])).unwrap();
        let Outcome::Succeeded(outputs) = &report.outcome else {
            panic!("expected success, got {:?}", report.outcome);
        };
        assert_eq!(outputs.len(), 2);
        assert!(outputs[0].starts_with("struct io_file;"));
        assert!(outputs[1].starts_with("struct ui_widget;"));
    }

    #[test]
    fn test_error_diagnostic_blocks_generation() {
        let frontend = FakeFrontEnd(|| ParseOutput {
            diagnostics: vec![
                Diagnostic::warning("unused parameter").at("widget.h", 3),
                Diagnostic::error("unknown type name 'Foo'").at("widget.h", 12),
            ],
            tree: Some(two_namespaces()),
        });

        let report = generate(&frontend, &options(&["ui"])).unwrap();
        assert!(matches!(
            report.outcome,
            Outcome::Failed(Failure::ParseDiagnostic { errors: 1 })
        ));
        assert_eq!(report.diagnostics.len(), 2);
    }

    #[test]
    fn test_fatal_diagnostic_blocks_generation() {
        let frontend = FakeFrontEnd(|| ParseOutput {
            diagnostics: vec![Diagnostic::new(Severity::Fatal, "'missing.h' file not found")],
            tree: None,
        });

        let report = generate(&frontend, &options(&["ui"])).unwrap();
        assert!(matches!(
            report.outcome,
            Outcome::Failed(Failure::ParseDiagnostic { errors: 1 })
        ));
    }

    #[test]
    fn test_warnings_do_not_block() {
        let frontend = FakeFrontEnd(|| ParseOutput {
            diagnostics: vec![Diagnostic::warning("deprecated").at("widget.h", 7)],
            tree: Some(two_namespaces()),
        });

        let report = generate(&frontend, &options(&["ui"])).unwrap();
        assert!(matches!(report.outcome, Outcome::Succeeded(_)));
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_missing_tree_fails() {
        let frontend = FakeFrontEnd(ParseOutput::default);

        let report = generate(&frontend, &options(&["ui"])).unwrap();
        assert!(matches!(report.outcome, Outcome::Failed(Failure::NoTree)));
    }

    #[test]
    fn test_unresolved_namespace_fails() {
        let frontend = FakeFrontEnd(|| ParseOutput {
            diagnostics: Vec::new(),
            tree: Some(two_namespaces()),
        });

        let report = generate(&frontend, &options(&["ui", "gfx"])).unwrap();
        let Outcome::Failed(Failure::UnresolvedScope(e)) = &report.outcome else {
            panic!("expected unresolved scope, got {:?}", report.outcome);
        };
        assert_eq!(e.scope, "gfx");
        assert_eq!(e.available, "ui, io");
    }

    #[test]
    fn test_first_missing_namespace_is_reported() {
        let frontend = FakeFrontEnd(|| ParseOutput {
            diagnostics: Vec::new(),
            tree: Some(two_namespaces()),
        });

        let report = generate(&frontend, &options(&["gfx", "ui", "net"])).unwrap();
        let Outcome::Failed(Failure::UnresolvedScope(e)) = &report.outcome else {
            panic!("expected unresolved scope, got {:?}", report.outcome);
        };
        assert_eq!(e.scope, "gfx");
    }
}
