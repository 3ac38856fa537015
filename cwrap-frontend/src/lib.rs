//! Front-end boundary for the cwrap C wrapper generator.
//!
//! This crate owns everything that touches the external compiler:
//!
//! - [`DeclTree`] - an arena holding the parsed declaration tree, exposed
//!   through the [`DeclNode`](cwrap_core::DeclNode) interface
//! - [`ClangFrontEnd`] - runs clang and adapts its JSON AST dump
//! - [`Diagnostic`] - compiler diagnostics with severity and location

mod clang;
mod diagnostic;
mod error;
mod frontend;
mod tree;

pub use clang::{ClangFrontEnd, parse_diagnostics};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result};
pub use frontend::{FrontEnd, ParseOutput};
pub use tree::{DeclTree, Node, NodeData, NodeId};
