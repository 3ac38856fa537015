//! Generator configuration.

use std::{fmt, str::FromStr};

use crate::builder::Indent;

/// Which form of each entity to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Forward-declared structs and function prototypes.
    Declaration,
    /// Struct definitions and function bodies.
    #[default]
    Definition,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "declaration" | "decl" => Ok(Self::Declaration),
            "definition" | "def" => Ok(Self::Definition),
            other => Err(format!(
                "unknown mode '{other}', expected 'declaration' or 'definition'"
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration => write!(f, "declaration"),
            Self::Definition => write!(f, "definition"),
        }
    }
}

/// Settings for a [`Generator`](crate::Generator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub mode: Mode,
    pub indent: Indent,
}

impl GeneratorConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            indent: Indent::default(),
        }
    }

    /// Set the indentation style.
    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}
