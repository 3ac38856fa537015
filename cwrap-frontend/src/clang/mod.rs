//! The clang front-end adapter.
//!
//! Runs clang with `-ast-dump=json`, turns the JSON dump into a [`DeclTree`]
//! and the textual stderr output into [`Diagnostic`]s.

mod ast;
mod diagnostics;

use std::{path::Path, process::Command};

pub use diagnostics::parse_diagnostics;

use crate::{DeclTree, Diagnostic, Error, FrontEnd, ParseOutput, Result, Severity};

/// Front-end backed by a clang executable.
#[derive(Debug, Clone)]
pub struct ClangFrontEnd {
    program: String,
}

impl ClangFrontEnd {
    /// The program used when none is configured.
    pub const DEFAULT_PROGRAM: &'static str = "clang++";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the clang command line for `header`.
    pub fn command(&self, header: &Path, flags: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args([
            "-x",
            "c++",
            "-fsyntax-only",
            "-fno-color-diagnostics",
            "-fno-caret-diagnostics",
            "-Xclang",
            "-ast-dump=json",
        ]);
        cmd.args(flags);
        cmd.arg(header);
        cmd
    }
}

impl Default for ClangFrontEnd {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl FrontEnd for ClangFrontEnd {
    #[tracing::instrument(skip_all, fields(header = %header.display()))]
    fn parse(&self, header: &Path, flags: &[String]) -> Result<ParseOutput> {
        tracing::debug!(program = %self.program, ?flags, "running front-end");

        let output = self
            .command(header, flags)
            .output()
            .map_err(|e| Error::spawn(&self.program, e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut diagnostics = parse_diagnostics(&stderr);

        let stdout = String::from_utf8_lossy(&output.stdout);
        let tree = if stdout.trim().is_empty() {
            None
        } else {
            match DeclTree::from_clang_json(&stdout) {
                Ok(tree) => Some(tree),
                Err(e) => {
                    diagnostics.push(Diagnostic::new(Severity::Fatal, e.to_string()));
                    None
                }
            }
        };

        tracing::debug!(
            status = ?output.status.code(),
            diagnostics = diagnostics.len(),
            nodes = ?tree.as_ref().map(DeclTree::len),
            "front-end finished"
        );

        Ok(ParseOutput { diagnostics, tree })
    }
}
