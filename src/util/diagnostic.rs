//! User-facing error reports.
//!
//! A [`Diagnostic`] is what a failed `generate` prints: the message, the plan
//! file it concerns, context lines, and numbered fixes to try.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// Suggestions shared by more than one command.
pub mod suggestions {
    /// No plan file in the working directory.
    pub const NO_PLAN: &str = "help: Run `makeplan init` to create a plan file";

    /// A plan step names a rule the registry does not have.
    pub const UNKNOWN_RULE: &str = "help: Run `makeplan rules` to see available rules";
}

const RED_BOLD: &str = "\x1b[1;31m";
const GREEN_BOLD: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

/// An error report with optional location, context and suggestions.
#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    pub message: String,
    /// `  = ...` lines under the message
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
    /// Plan file the error was found in
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..Diagnostic::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, with ANSI colors when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, label: &str| {
            if color {
                format!("{code}{label}{RESET}")
            } else {
                label.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", paint(RED_BOLD, "error"), self.message);

        if let Some(path) = &self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for line in &self.context {
            let _ = writeln!(out, "  = {line}");
        }

        if !self.suggestions.is_empty() {
            let _ = write!(out, "\n{}: consider:\n", paint(GREEN_BOLD, "help"));
            for (n, suggestion) in self.suggestions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {suggestion}", n + 1);
            }
        }

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
