//! Typed rule invocation errors and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::rule::typed::ArgType;
use crate::util::diagnostic::Diagnostic;

/// Error returned by a checked rule invocation.
///
/// None of these are retryable; they are fixed at the call site.
#[derive(Debug, Clone, PartialEq, Error, MietteDiagnostic)]
pub enum RuleError {
    #[error("missing argument '{argument}' in rule '{rule}'")]
    #[diagnostic(
        code(makeplan::rule::argument_missing),
        help("pass `{argument}` when invoking `{rule}`")
    )]
    ArgumentMissing { argument: String, rule: String },

    #[error("unknown argument '{argument}' of type {actual} in rule '{rule}'")]
    #[diagnostic(
        code(makeplan::rule::argument_unknown),
        help("remove `{argument}` or check its spelling")
    )]
    ArgumentUnknown {
        argument: String,
        actual: ArgType,
        rule: String,
    },

    #[error("argument '{argument}' has type {actual} but expected {expected} in rule '{rule}'")]
    #[diagnostic(code(makeplan::rule::argument_type_mismatch))]
    ArgumentTypeMismatch {
        argument: String,
        expected: ArgType,
        actual: ArgType,
        rule: String,
    },

    #[error("rule '{rule}' rejected its arguments: {reason}")]
    #[diagnostic(code(makeplan::rule::rejected))]
    Rejected { rule: String, reason: String },
}

impl RuleError {
    /// Human-readable explanation, suitable as CLI output.
    pub fn what(&self) -> String {
        self.to_string()
    }

    /// Name of the rule that produced the error.
    pub fn rule(&self) -> &str {
        match self {
            RuleError::ArgumentMissing { rule, .. }
            | RuleError::ArgumentUnknown { rule, .. }
            | RuleError::ArgumentTypeMismatch { rule, .. }
            | RuleError::Rejected { rule, .. } => rule,
        }
    }

    /// The offending argument, if the error concerns one.
    pub fn argument(&self) -> Option<&str> {
        match self {
            RuleError::ArgumentMissing { argument, .. }
            | RuleError::ArgumentUnknown { argument, .. }
            | RuleError::ArgumentTypeMismatch { argument, .. } => Some(argument),
            RuleError::Rejected { .. } => None,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.what());

        match self {
            RuleError::ArgumentMissing { argument, rule } => diag
                .with_suggestion(format!("Add `{}` to the arguments of `{}`", argument, rule))
                .with_suggestion(format!(
                    "Run `makeplan rules` to see the arguments `{}` accepts",
                    rule
                )),

            RuleError::ArgumentUnknown { argument, rule, .. } => diag
                .with_context(format!("`{}` does not declare `{}`", rule, argument))
                .with_suggestion(format!(
                    "Run `makeplan rules` to see the arguments `{}` accepts",
                    rule
                )),

            RuleError::ArgumentTypeMismatch {
                argument,
                expected,
                actual,
                ..
            } => diag
                .with_context(format!("expected: {}", expected))
                .with_context(format!("found: {}", actual))
                .with_suggestion(format!("Pass a {} value for `{}`", expected, argument)),

            RuleError::Rejected { .. } => diag,
        }
    }
}
