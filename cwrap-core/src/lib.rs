//! Core utilities and types for the cwrap C wrapper generator.
//!
//! This crate provides the identifier transformation rules and the narrow
//! declaration interface shared by the front-end, model and code generator.

mod decl;
mod naming;
mod qualified;
mod rename;

// Declaration capability interface
pub use decl::{Access, DeclKind, DeclNode, Param};
// Identifier transformation
pub use naming::to_snake_case;
pub use qualified::{QualifiedName, qualified_name};
pub use rename::{Identity, Rename, apply};
