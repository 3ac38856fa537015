//! Generate command report data structures.

use cwrap_frontend::Diagnostic;

use super::output::{Output, Report};
use crate::ops::{Failure, Outcome};

/// Report data from one generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Every diagnostic the front-end reported, in order.
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: Outcome,
}

impl GenerateReport {
    /// Whether the run produced output.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded(_))
    }

    /// Generated text of all namespaces, separated by a blank line.
    ///
    /// # Errors
    ///
    /// Returns the failure if the run produced no output.
    pub fn into_result(self) -> Result<String, Failure> {
        match self.outcome {
            Outcome::Succeeded(outputs) => Ok(outputs.join("\n")),
            Outcome::Failed(failure) => Err(failure),
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in &self.diagnostics {
            out.diagnostic(&diag.to_string());
        }

        let warnings = self
            .diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count();
        if self.is_success() && warnings > 0 {
            out.newline();
            out.status(&format!(
                "generated with {} warning{}",
                warnings,
                if warnings == 1 { "" } else { "s" }
            ));
        }
    }
}
