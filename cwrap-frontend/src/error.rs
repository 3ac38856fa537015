use miette::Diagnostic;
use thiserror::Error;

/// Result type for front-end operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to run '{program}'")]
    #[diagnostic(
        code(cwrap::frontend::spawn),
        help("install clang or point --clang at a clang++ executable")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("front-end produced an invalid AST dump")]
    #[diagnostic(code(cwrap::frontend::invalid_ast))]
    InvalidAst {
        #[source]
        source: serde_json::Error,
    },

    #[error("AST root is a '{kind}', expected 'TranslationUnitDecl'")]
    #[diagnostic(code(cwrap::frontend::unexpected_root))]
    UnexpectedRoot { kind: String },
}

impl Error {
    pub(crate) fn spawn(program: impl Into<String>, source: std::io::Error) -> Box<Self> {
        Box::new(Self::Spawn {
            program: program.into(),
            source,
        })
    }

    pub(crate) fn invalid_ast(source: serde_json::Error) -> Box<Self> {
        Box::new(Self::InvalidAst { source })
    }
}
