//! Model construction entry point.

use cwrap_core::DeclNode;

use crate::{TranslationUnit, UnresolvedScopeError};

/// Build the model from a declaration tree and check the requested scopes.
///
/// Every requested scope is resolved right after the build, so a misspelled
/// namespace fails here instead of somewhere in code generation.
///
/// # Errors
///
/// Returns [`UnresolvedScopeError`] for the first requested scope that does
/// not exist.
pub fn build<N, S>(root: &N, requested_scopes: &[S]) -> Result<TranslationUnit, UnresolvedScopeError>
where
    N: DeclNode,
    S: AsRef<str>,
{
    let unit = TranslationUnit::build(root);
    for scope in requested_scopes {
        unit.resolve(scope.as_ref())?;
    }
    Ok(unit)
}
