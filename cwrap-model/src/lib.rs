//! Declaration model for the cwrap C wrapper generator.
//!
//! The model is an ownership tree built in a single pass over a parsed
//! header: a [`TranslationUnit`] owns its top-level [`Namespace`]s, each
//! namespace owns its child namespaces and [`Class`]es, and each class owns
//! the public [`Operation`]s found on it.
//!
//! Re-encountering a namespace or class merges into the existing entry
//! rather than replacing it, and every mapping iterates in first-seen order.

mod build;
mod class;
mod error;
mod namespace;
mod operation;

pub use build::build;
pub use class::Class;
pub use error::UnresolvedScopeError;
pub use namespace::{Namespace, TranslationUnit};
pub use operation::{Operation, OperationKind};
