//! Implementation of `makeplan generate`.
//!
//! Runs a plan file through the typed rule registry and writes the result.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::context::Context;
use crate::core::manifest::{ManifestError, Plan};
use crate::rule::registry::RuleRegistry;
use crate::rules::bins;
use crate::util::fs::write_string;
use crate::util::shell::{Shell, Status};

/// Options for generating a build file.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Plan file to read
    pub plan_path: PathBuf,

    /// Output file, overriding the plan's `[output] path`
    pub output: Option<PathBuf>,

    /// Return the result without writing it
    pub to_stdout: bool,

    /// Produce the JSON plan dump instead of a Makefile
    pub json: bool,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Rendered Makefile or JSON dump
    pub content: String,

    /// Where `content` was written, if it was
    pub written: Option<PathBuf>,

    pub variables: usize,
    pub rules: usize,
}

/// Fail before any rule runs if the plan names a rule or tool we don't know.
pub fn check_plan(plan: &Plan, registry: &RuleRegistry) -> Result<(), ManifestError> {
    for (idx, step) in plan.steps.iter().enumerate() {
        if registry.get(&step.rule).is_none() {
            return Err(ManifestError::UnknownRule {
                step: idx + 1,
                rule: step.rule.clone(),
                available: registry.names().map(str::to_string).collect(),
            });
        }
    }

    for tool in &plan.tools {
        if !bins::TOOLS.iter().any(|(name, _, _)| *name == tool.as_str()) {
            return Err(ManifestError::UnknownTool {
                tool: tool.clone(),
                available: bins::TOOLS.iter().map(|(name, _, _)| name.to_string()).collect(),
            });
        }
    }

    Ok(())
}

/// Run every step of `plan` into a fresh context.
///
/// Declares tools, then variables, then invokes the steps in order. The
/// first failing step aborts the run and its [`RuleError`](crate::rule::RuleError)
/// is returned inside the `anyhow` error.
pub fn build_context(plan: &Plan, registry: &RuleRegistry, shell: Shell) -> Result<Context> {
    check_plan(plan, registry)?;

    let mut ctx = Context::with_shell(shell);

    for tool in &plan.tools {
        bins::declare(&mut ctx, tool);
    }

    for var in &plan.variables {
        ctx.variable(var.name.as_str(), var.value_text());
    }

    for (idx, step) in plan.steps.iter().enumerate() {
        let rule = registry
            .get(&step.rule)
            .ok_or_else(|| anyhow::anyhow!("rule `{}` disappeared from the registry", step.rule))?;

        let info = rule
            .invoke(&mut ctx, &step.args)
            .with_context(|| format!("step {} (`{}`) failed", idx + 1, step.rule))?;

        if step.default {
            ctx.add_default(&info);
        }
    }

    Ok(ctx)
}

/// Resolve where the output goes.
///
/// An explicit path is used as given; the plan's `[output] path` is relative
/// to the plan file's directory.
pub fn output_path(plan: &Plan, plan_path: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let base = plan_path.parent().unwrap_or_else(|| Path::new(""));
            base.join(plan.output_path())
        }
    }
}

/// Generate a build file from the plan at `opts.plan_path`.
pub fn generate(opts: &GenerateOptions, shell: Shell) -> Result<GenerateResult> {
    let plan = Plan::load(&opts.plan_path)?;
    let registry = RuleRegistry::builtin();

    tracing::debug!(
        "loaded plan {} ({} variables, {} steps)",
        opts.plan_path.display(),
        plan.variables.len(),
        plan.steps.len()
    );

    let ctx = build_context(&plan, &registry, shell)?;

    let content = if opts.json {
        let mut json =
            serde_json::to_string_pretty(&ctx).context("failed to serialize build plan")?;
        json.push('\n');
        json
    } else {
        ctx.render_to_string()
    };

    let written = if opts.to_stdout {
        None
    } else {
        let path = output_path(&plan, &opts.plan_path, opts.output.as_deref());
        ctx.shell().status(Status::Writing, path.display());
        write_string(&path, &content)?;
        Some(path)
    };

    Ok(GenerateResult {
        content,
        written,
        variables: ctx.variables().len(),
        rules: ctx.rules().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleError;
    use crate::util::shell::ShellMode;
    use tempfile::TempDir;

    const PLAN: &str = r#"
tools = ["rm"]

[[variables]]
name = "CC"
value = "gcc"

[[variables]]
name = "CFLAGS"
value = "-O2 -Wall"

[[steps]]
rule = "compile_many"
[steps.args]
inputs = ["a.c", "b.c"]
outputs = ["a.o", "b.o"]
cc = { ref = "CC" }
cflags = { ref = "CFLAGS" }

[[steps]]
rule = "compile"
default = true
[steps.args]
inputs = ["a.o", "b.o"]
output = "app"
cc = { ref = "CC" }
linking = true

[[steps]]
rule = "clean"
[steps.args]
files = ["a.o", "b.o", "app"]
rm = { ref = "RM" }
rmflags = "-f"
"#;

    fn shell() -> Shell {
        Shell::capture(ShellMode::default())
    }

    #[test]
    fn test_build_context_renders_plan() {
        let plan = Plan::parse(PLAN).unwrap();
        let ctx = build_context(&plan, &RuleRegistry::builtin(), shell()).unwrap();

        let expected = concat!(
            "RM = rm\n",
            "CC = gcc\n",
            "CFLAGS = -O2 -Wall\n",
            "\n",
            ".PHONY: default\n",
            "default: app\n",
            "\n",
            "a.o: a.c\n",
            "\t$(CC) $(CFLAGS) -c a.c -o a.o\n",
            "b.o: b.c\n",
            "\t$(CC) $(CFLAGS) -c b.c -o b.o\n",
            "app: a.o b.o\n",
            "\t$(CC) a.o b.o -o app\n",
            ".PHONY: clean\n",
            "clean: \n",
            "\t$(RM) -f a.o b.o app\n",
            "\n",
        );
        assert_eq!(ctx.render_to_string(), expected);
        assert_eq!(ctx.shell().captured().len(), 3);
    }

    #[test]
    fn test_first_failure_stops_run() {
        let plan = Plan::parse(
            r#"
[[steps]]
rule = "phony"
args = { name = "all" }

[[steps]]
rule = "compile_c"
args = { inp = "a.c", outp = "a.o" }

[[steps]]
rule = "phony"
args = { name = "never" }
"#,
        )
        .unwrap();

        let err = build_context(&plan, &RuleRegistry::builtin(), shell()).unwrap_err();
        let rule_err = err.downcast_ref::<RuleError>().unwrap();
        assert_eq!(
            rule_err.what(),
            "missing argument 'cflags' in rule 'compile_c'"
        );
        assert!(err.to_string().contains("step 2"));
    }

    #[test]
    fn test_unknown_rule_checked_before_running() {
        let plan = Plan::parse(
            r#"
[[steps]]
rule = "phony"
args = { name = "all" }

[[steps]]
rule = "link"
"#,
        )
        .unwrap();

        let err = check_plan(&plan, &RuleRegistry::builtin()).unwrap_err();
        match err {
            ManifestError::UnknownRule {
                step,
                rule,
                available,
            } => {
                assert_eq!(step, 2);
                assert_eq!(rule, "link");
                assert!(available.contains(&"compile".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_tool() {
        let plan = Plan::parse("tools = [\"cp\"]").unwrap();
        let err = check_plan(&plan, &RuleRegistry::builtin()).unwrap_err();
        assert!(matches!(err, ManifestError::UnknownTool { ref tool, .. } if tool == "cp"));
    }

    #[test]
    fn test_generate_writes_next_to_plan() {
        let tmp = TempDir::new().unwrap();
        let plan_path = tmp.path().join("makeplan.toml");
        std::fs::write(&plan_path, PLAN).unwrap();

        let opts = GenerateOptions {
            plan_path: plan_path.clone(),
            ..GenerateOptions::default()
        };
        let result = generate(&opts, shell()).unwrap();

        let makefile = tmp.path().join("Makefile");
        assert_eq!(result.written.as_deref(), Some(makefile.as_path()));
        assert_eq!(std::fs::read_to_string(&makefile).unwrap(), result.content);
        assert_eq!(result.variables, 3);
        assert_eq!(result.rules, 4);
    }

    #[test]
    fn test_generate_json_to_stdout() {
        let tmp = TempDir::new().unwrap();
        let plan_path = tmp.path().join("makeplan.toml");
        std::fs::write(&plan_path, PLAN).unwrap();

        let opts = GenerateOptions {
            plan_path,
            to_stdout: true,
            json: true,
            ..GenerateOptions::default()
        };
        let result = generate(&opts, shell()).unwrap();

        assert!(result.written.is_none());
        assert!(!tmp.path().join("Makefile").exists());

        let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["vars"][1]["name"], "CC");
        assert_eq!(value["rules"][3]["name"], "clean");
        assert_eq!(value["defaults"][0]["files"][0], "app");
    }

    #[test]
    fn test_output_path_resolution() {
        let plan = Plan::parse("[output]\npath = \"out/GNUmakefile\"").unwrap();
        let plan_path = Path::new("proj/makeplan.toml");

        assert_eq!(
            output_path(&plan, plan_path, None),
            PathBuf::from("proj/out/GNUmakefile")
        );
        assert_eq!(
            output_path(&plan, plan_path, Some(Path::new("x.mk"))),
            PathBuf::from("x.mk")
        );
    }
}
