use miette::Diagnostic;
use thiserror::Error;

/// A requested namespace scope does not exist in the built model.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("namespace '{scope}' was not found in the parsed header")]
#[diagnostic(
    code(cwrap::unresolved_scope),
    help("available top-level namespaces: {available}")
)]
pub struct UnresolvedScopeError {
    /// The scope as requested.
    pub scope: String,
    /// Comma-separated top-level namespace names, for the help line.
    pub available: String,
}

impl UnresolvedScopeError {
    pub fn new<'a>(scope: impl Into<String>, available: impl IntoIterator<Item = &'a str>) -> Self {
        let available: Vec<&str> = available.into_iter().filter(|n| !n.is_empty()).collect();
        Self {
            scope: scope.into(),
            available: if available.is_empty() {
                "(none)".to_string()
            } else {
                available.join(", ")
            },
        }
    }
}
