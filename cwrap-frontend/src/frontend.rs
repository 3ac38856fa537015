//! The front-end trait the driver depends on.

use std::path::Path;

use crate::{Diagnostic, DeclTree, Result};

/// What a front-end hands back after parsing one header.
#[derive(Debug, Default)]
pub struct ParseOutput {
    /// Diagnostics in the order the front-end reported them.
    pub diagnostics: Vec<Diagnostic>,
    /// The declaration tree, or `None` if the front-end produced none.
    pub tree: Option<DeclTree>,
}

impl ParseOutput {
    /// Check if any error or fatal diagnostics were reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Count the number of error or fatal diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }
}

/// A compiler front-end able to parse a C++ header.
///
/// # Errors
///
/// Implementations return an error only when the front-end itself could not
/// run. Problems in the header are reported as diagnostics.
pub trait FrontEnd {
    fn parse(&self, header: &Path, flags: &[String]) -> Result<ParseOutput>;
}
