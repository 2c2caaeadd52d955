//! makeplan.toml plan file parsing and schema.
//!
//! A plan file lists variables to declare and rule steps to run, in order:
//!
//! ```toml
//! tools = ["rm"]
//!
//! [output]
//! path = "Makefile"
//!
//! [[variables]]
//! name = "CC"
//! value = "gcc"
//!
//! [[steps]]
//! rule = "compile"
//! default = true
//! [steps.args]
//! inputs = ["main.c"]
//! output = "main.o"
//! cc = { ref = "CC" }
//! ```
//!
//! Argument tables keep their written order, which becomes the supplied
//! order seen by typed-rule validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::expand::{expand, Consts, Segment, VarRef};
use crate::rule::typed::{ArgValue, Args};
use crate::util::config::OUTPUT_FILE;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error in the contents of a plan file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManifestError {
    #[error("failed to parse plan: {message}")]
    Parse { message: String },

    #[error("step {step} uses unknown rule `{rule}`")]
    UnknownRule {
        step: usize,
        rule: String,
        available: Vec<String>,
    },

    #[error("unknown tool `{tool}`")]
    UnknownTool { tool: String, available: Vec<String> },

    #[error("step {step} argument `{argument}`: {reason}")]
    UnsupportedValue {
        step: usize,
        argument: String,
        reason: String,
    },
}

impl ManifestError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            ManifestError::UnknownRule { available, .. } => diag
                .with_context(format!("available rules: {}", available.join(", ")))
                .with_suggestion(suggestions::UNKNOWN_RULE),
            ManifestError::UnknownTool { available, .. } => {
                diag.with_context(format!("available tools: {}", available.join(", ")))
            }
            ManifestError::UnsupportedValue { .. } => diag.with_suggestion(
                "Use a string, number, boolean, array, or `{ ref = \"NAME\" }`",
            ),
            ManifestError::Parse { .. } => diag,
        }
    }
}

/// The `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Where the Makefile is written, relative to the plan file
    pub path: Option<PathBuf>,
}

/// A variable value: a plain string or segments joined by `delim`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Plain(String),
    Segments(Vec<Segment>),
}

/// One `[[variables]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDecl {
    pub name: String,
    pub value: VariableValue,
    /// Delimiter for segment lists (default: a single space)
    #[serde(default)]
    pub delim: Option<String>,
}

impl VariableDecl {
    /// The value text as it appears after `NAME = `.
    pub fn value_text(&self) -> String {
        match &self.value {
            VariableValue::Plain(s) => s.clone(),
            VariableValue::Segments(segments) => expand(
                segments.iter().cloned(),
                self.delim.as_deref().unwrap_or(Consts::WS),
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStep {
    rule: String,
    #[serde(default)]
    default: bool,
    #[serde(default)]
    args: toml::Table,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlan {
    #[serde(default)]
    output: OutputSection,
    #[serde(default)]
    tools: Vec<String>,
    #[serde(default)]
    variables: Vec<VariableDecl>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

/// One rule invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub rule: String,
    /// Add the returned files to the `default` target
    pub default: bool,
    pub args: Args,
}

/// A parsed plan file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plan {
    pub output: OutputSection,
    /// Tool variables to declare before `variables` (`rm`, `echo`, ...)
    pub tools: Vec<String>,
    pub variables: Vec<VariableDecl>,
    pub steps: Vec<Step>,
}

impl Plan {
    /// Load a plan from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = crate::util::fs::read_to_string(path)?;

        Self::parse(&content)
            .with_context(|| format!("failed to load plan file: {}", path.display()))
    }

    /// Parse plan file content.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let raw: RawPlan = toml::from_str(content).map_err(|e| ManifestError::Parse {
            message: e.message().to_string(),
        })?;

        let steps = raw
            .steps
            .into_iter()
            .enumerate()
            .map(|(idx, step)| -> Result<Step, ManifestError> {
                let mut args = Args::new();
                for (key, value) in &step.args {
                    let value = to_arg_value(value).map_err(|reason| {
                        ManifestError::UnsupportedValue {
                            step: idx + 1,
                            argument: key.clone(),
                            reason,
                        }
                    })?;
                    args.insert(key.as_str(), value);
                }

                Ok(Step {
                    rule: step.rule,
                    default: step.default,
                    args,
                })
            })
            .collect::<Result<Vec<_>, ManifestError>>()?;

        Ok(Plan {
            output: raw.output,
            tools: raw.tools,
            variables: raw.variables,
            steps,
        })
    }

    /// Output path, falling back to `Makefile`.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(OUTPUT_FILE))
    }
}

/// Convert a TOML value into a rule argument.
///
/// A table is accepted only in the `{ ref = "NAME" }` form.
pub fn to_arg_value(value: &toml::Value) -> Result<ArgValue, String> {
    match value {
        toml::Value::String(s) => Ok(ArgValue::Str(s.clone())),
        toml::Value::Integer(n) => Ok(ArgValue::Int(*n)),
        toml::Value::Float(n) => Ok(ArgValue::Float(*n)),
        toml::Value::Boolean(b) => Ok(ArgValue::Bool(*b)),
        toml::Value::Array(items) => items
            .iter()
            .map(to_arg_value)
            .collect::<Result<Vec<_>, _>>()
            .map(ArgValue::List),
        toml::Value::Table(table) => match (table.len(), table.get("ref")) {
            (1, Some(toml::Value::String(name))) => Ok(ArgValue::Ref(VarRef::new(name.as_str()))),
            _ => Err("tables are only supported as `{ ref = \"NAME\" }`".to_string()),
        },
        toml::Value::Datetime(_) => Err("datetimes are not supported".to_string()),
    }
}
