//! Centralized status output.
//!
//! Rules announce themselves through the [`Shell`] as they are invoked; the
//! CLI uses the same shell for its own status lines. Output format is
//! `{status:>12} {message}` on stderr.
//!
//! # Design Principles
//!
//! 1. **Callers never format status prefixes** - Shell handles all formatting
//! 2. **JSON mode is mutually exclusive** - No human output when JSON mode is enabled
//! 3. **Capture mode** - A capturing shell records lines instead of printing them
//! 4. **JSON events follow the content** - They move to stderr when stdout carries a Makefile

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

/// Shell output mode - Human and Json are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable output with optional colors.
    Human {
        verbosity: Verbosity,
        color: ColorChoice,
    },
    /// Machine-readable JSON events only.
    Json,
}

impl Default for ShellMode {
    fn default() -> Self {
        ShellMode::Human {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
        }
    }
}

/// Output verbosity level (Human mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only
    Quiet,
    #[default]
    Normal,
    /// --verbose: status lines plus debug logging
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Created,
    Finished,

    // In-progress statuses (cyan)
    Generating,
    Writing,

    // Info status (blue)
    Info,

    // Warning status (yellow)
    Warning,

    // Error status (red)
    Error,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Created => "Created",
            Status::Finished => "Finished",
            Status::Generating => "Generating",
            Status::Writing => "Writing",
            Status::Info => "Info",
            Status::Warning => "Warning",
            Status::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Created | Status::Finished => "\x1b[1;32m",
            Status::Generating | Status::Writing => "\x1b[1;36m",
            Status::Info => "\x1b[1;34m",
            Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }

    /// Width for right alignment.
    fn width(&self) -> usize {
        12
    }
}

/// Status output sink shared by the CLI and rule invocations.
#[derive(Debug)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
    /// Recorded lines when capturing instead of printing
    captured: Option<Mutex<Vec<String>>>,
    /// Write JSON events to stderr instead of stdout
    json_on_stderr: bool,
}

impl Shell {
    /// Create a new shell with the given mode.
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match &mode {
            ShellMode::Json => false,
            ShellMode::Human { color, .. } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            },
        };

        Shell {
            mode,
            use_color,
            captured: None,
            json_on_stderr: false,
        }
    }

    /// Create a shell that records its output instead of printing it.
    ///
    /// Lines are stored uncolored; read them back with [`Shell::captured`].
    pub fn capture(mode: ShellMode) -> Self {
        Shell {
            mode,
            use_color: false,
            captured: Some(Mutex::new(Vec::new())),
            json_on_stderr: false,
        }
    }

    /// Create a shell from CLI flags with proper precedence.
    ///
    /// JSON mode takes precedence over quiet/verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice, json: bool) -> Self {
        let mode = if json {
            ShellMode::Json
        } else {
            let verbosity = if quiet {
                Verbosity::Quiet
            } else if verbose {
                Verbosity::Verbose
            } else {
                Verbosity::Normal
            };
            ShellMode::Human { verbosity, color }
        };

        Shell::new(mode)
    }

    /// Send JSON events to stderr, leaving stdout to the caller's content.
    pub fn json_to_stderr(mut self, enabled: bool) -> Self {
        self.json_on_stderr = enabled;
        self
    }

    pub fn json_on_stderr(&self) -> bool {
        self.json_on_stderr
    }

    pub fn mode(&self) -> &ShellMode {
        &self.mode
    }

    pub fn is_quiet(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Quiet,
                ..
            }
        )
    }

    pub fn is_verbose(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Verbose,
                ..
            }
        )
    }

    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// In quiet mode, only Error status is printed.
    /// In JSON mode, messages are silently ignored (use json_event for JSON output).
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_json() {
            return;
        }

        if self.is_quiet() && status != Status::Error {
            return;
        }

        let line = format!("{} {}", self.format_status(status), msg);
        self.write_line(line);
    }

    /// Announce a rule invocation.
    ///
    /// Human mode prints a `Generating` status line; JSON mode emits a
    /// `rule-invoked` event.
    pub fn describe(&self, rule: &str, description: impl Display) {
        if self.is_json() {
            let event = serde_json::json!({
                "reason": "rule-invoked",
                "rule": rule,
                "description": description.to_string(),
            });
            self.json_event(&event);
        } else {
            self.status(Status::Generating, description);
        }
    }

    pub fn note(&self, msg: impl Display) {
        self.status(Status::Info, msg);
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print an error message.
    ///
    /// In JSON mode, this outputs a JSON error event.
    pub fn error(&self, msg: impl Display) {
        if self.is_json() {
            let event = serde_json::json!({
                "reason": "error",
                "message": msg.to_string()
            });
            self.json_event(&event);
        } else {
            self.status(Status::Error, msg);
        }
    }

    /// Print a JSON event to stdout, or stderr if [`Shell::json_to_stderr`] is set.
    ///
    /// Only works in JSON mode; silently ignored in human mode.
    pub fn json_event(&self, event: &serde_json::Value) {
        if !self.is_json() {
            return;
        }

        let json_str = serde_json::to_string(event).unwrap_or_default();
        match &self.captured {
            Some(buffer) => {
                if let Ok(mut lines) = buffer.lock() {
                    lines.push(json_str);
                }
            }
            None if self.json_on_stderr => eprintln!("{}", json_str),
            None => {
                println!("{}", json_str);
                let _ = io::stdout().flush();
            }
        }
    }

    /// Lines recorded by a capturing shell, oldest first.
    pub fn captured(&self) -> Vec<String> {
        self.captured
            .as_ref()
            .and_then(|buffer| buffer.lock().ok().map(|lines| lines.clone()))
            .unwrap_or_default()
    }

    fn write_line(&self, line: String) {
        match &self.captured {
            Some(buffer) => {
                if let Ok(mut lines) = buffer.lock() {
                    lines.push(line);
                }
            }
            None => eprintln!("{}", line),
        }
    }

    /// Format a status prefix with optional color.
    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        let width = status.width();

        if self.use_color {
            let color = status.color_code();
            format!("{}{:>width$}\x1b[0m", color, text, width = width)
        } else {
            format!("{:>width$}", text, width = width)
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(ShellMode::default())
    }
}
