//! `makeplan generate` command

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::{GenerateArgs, GlobalArgs, MessageFormat};
use crate::commands::{current_config, make_shell};
use makeplan::core::manifest::ManifestError;
use makeplan::ops::generate::{generate, GenerateOptions};
use makeplan::rule::RuleError;
use makeplan::util::config::PLAN_FILE;
use makeplan::util::diagnostic::{self, suggestions, Diagnostic};
use makeplan::util::shell::{Shell, Status};

pub fn execute(args: GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let config = current_config();

    let json_events = args.message_format == MessageFormat::Json;
    let to_stdout = args.stdout;
    let new_shell = || make_shell(global, &config, json_events).json_to_stderr(to_stdout);

    // CLI > config > defaults
    let plan_path = args
        .plan
        .or(config.generate.plan.clone())
        .unwrap_or_else(|| PathBuf::from(PLAN_FILE));
    let output = args.output.or(config.generate.output.clone());
    let json = args.json || config.generate.json;

    if !plan_path.exists() {
        let diag = Diagnostic::error(format!("could not find `{}`", plan_path.display()))
            .with_suggestion(suggestions::NO_PLAN);
        report(&new_shell(), &diag);
        bail!("no plan file to generate from");
    }

    let opts = GenerateOptions {
        plan_path,
        output,
        to_stdout: args.stdout,
        json,
    };

    // The shell moves into the build context; keep one for our own output.
    let shell = new_shell();
    let result = match generate(&opts, new_shell()) {
        Ok(result) => result,
        Err(e) => {
            let diag = if let Some(rule_err) = e.downcast_ref::<RuleError>() {
                Some(rule_err.to_diagnostic().with_location(&opts.plan_path))
            } else {
                e.downcast_ref::<ManifestError>()
                    .map(|manifest_err| manifest_err.to_diagnostic().with_location(&opts.plan_path))
            };

            match diag {
                Some(diag) => {
                    report(&shell, &diag);
                    bail!("could not generate build file due to previous error");
                }
                None => return Err(e),
            }
        }
    };

    if args.stdout {
        print!("{}", result.content);
    }

    let target = result
        .written
        .as_ref()
        .map(|p| format!("`{}`", p.display()))
        .unwrap_or_else(|| "stdout".to_string());

    if shell.is_json() {
        shell.json_event(&serde_json::json!({
            "reason": "generated",
            "output": result.written,
            "variables": result.variables,
            "rules": result.rules,
        }));
    } else {
        shell.status(
            Status::Finished,
            format!(
                "{} ({} variables, {} rules)",
                target, result.variables, result.rules
            ),
        );
    }

    Ok(())
}

fn report(shell: &Shell, diag: &Diagnostic) {
    if shell.is_json() {
        shell.error(&diag.message);
    } else {
        diagnostic::emit(diag, shell.use_color());
    }
}
