use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::Args;
use cwrap_codegen::{GeneratorConfig, Mode};
use cwrap_frontend::ClangFrontEnd;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

/// The only name transform currently accepted.
const IDENTITY_TRANSFORM: &str = "identity";

#[derive(Args)]
pub struct GenerateCommand {
    /// C++ header to wrap
    #[arg(short = 'i', long)]
    pub header: PathBuf,

    /// Namespace whose classes are wrapped (repeatable, output follows this order)
    #[arg(short = 'n', long = "namespace", required = true)]
    pub namespaces: Vec<String>,

    /// Name transform applied to emitted identifiers
    #[arg(short = 't', long)]
    pub transform: Option<String>,

    /// Emit full definitions or declarations only
    #[arg(short, long, default_value_t = Mode::Definition)]
    pub mode: Mode,

    /// Clang executable used to parse the header
    #[arg(long, default_value = ClangFrontEnd::DEFAULT_PROGRAM)]
    pub clang: String,

    /// Write generated code to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Arguments forwarded to clang (after `--`)
    #[arg(last = true)]
    pub flags: Vec<String>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        if let Some(transform) = self.transform.as_deref().filter(|t| *t != IDENTITY_TRANSFORM) {
            tracing::warn!(transform, "unsupported name transform, using identity");
        }

        let options = GenerateOptions {
            header: self.header.clone(),
            namespaces: self.namespaces.clone(),
            flags: self.flags.clone(),
            config: GeneratorConfig::new(self.mode),
        };

        let frontend = ClangFrontEnd::new(&self.clang);
        let report = ops::generate(&frontend, &options).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        match report.into_result() {
            Ok(text) => write_output(self.output.as_deref(), &text),
            Err(failure) => {
                eprintln!("{:?}", miette::Report::new(failure));
                std::process::exit(1);
            }
        }
    }
}

/// Write generated code to `path`, or to stdout when there is none.
fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .wrap_err_with(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .wrap_err("Failed to write generated code")
        }
    }
}
