//! Core operations.
//!
//! This module contains the business logic for cwrap,
//! separated from CLI argument parsing and output rendering.

pub mod generate;

pub use generate::{Failure, GenerateOptions, Outcome, generate};
