mod generate;

use clap::Parser;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on front-end errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for cwrap_frontend::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "cwrap")]
#[command(version)]
#[command(about = "Generate C-linkage wrappers for the classes of a C++ header")]
pub(crate) struct Cli {
    #[command(flatten)]
    generate: GenerateCommand,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        self.generate.run()
    }
}
