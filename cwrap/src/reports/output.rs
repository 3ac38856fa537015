//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    /// Render a front-end diagnostic line.
    fn diagnostic(&mut self, text: &str);

    /// Render a status message.
    fn status(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
///
/// Everything goes to stderr; stdout is reserved for generated code.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn diagnostic(&mut self, text: &str) {
        eprintln!("{}", text);
    }

    fn status(&mut self, text: &str) {
        eprintln!("{}", text);
    }

    fn newline(&mut self) {
        eprintln!();
    }
}
