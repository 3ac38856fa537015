//! C wrapper code generation for the cwrap C wrapper generator.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indent)
//! - [`Generator`] - Turns model classes into opaque structs and
//!   `extern "C"` forwarding functions
//! - [`Naming`] - Identifier derivation for emitted names

pub mod builder;
mod config;
mod generator;
mod naming;

pub use config::{GeneratorConfig, Mode};
pub use generator::Generator;
pub use naming::Naming;
