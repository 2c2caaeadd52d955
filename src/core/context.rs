//! The build plan accumulator.
//!
//! A [`Context`] collects variables, rule records and default artifacts while
//! rules run, then renders them as a Makefile. It is exclusively owned by one
//! caller for its whole lifetime and threaded through every rule by `&mut`.
//!
//! Neither variable nor rule names are deduplicated. Redefinitions are all
//! emitted in insertion order and make's last-definition-wins applies.

use std::io::{self, Write};

use serde::Serialize;

use crate::core::expand::{Consts, VarRef};
use crate::core::info::{DefaultInfo, Info};
use crate::core::record::{RuleRecord, Variable};
use crate::util::shell::Shell;

/// Variables, rule records and default targets of one build plan.
#[derive(Debug, Default, Serialize)]
pub struct Context {
    vars: Vec<Variable>,
    rules: Vec<RuleRecord>,
    defaults: Vec<DefaultInfo>,
    #[serde(skip)]
    shell: Shell,
}

impl Context {
    /// Create an empty context that reports to stderr.
    pub fn new() -> Self {
        Context::default()
    }

    /// Create an empty context that reports through `shell`.
    pub fn with_shell(shell: Shell) -> Self {
        Context {
            shell,
            ..Context::default()
        }
    }

    /// Register `NAME = value` and return a reference to it.
    pub fn variable(&mut self, name: impl Into<String>, value: impl Into<String>) -> VarRef {
        let var = Variable {
            name: name.into(),
            value: value.into(),
        };
        tracing::debug!("declared variable {} = {}", var.name, var.value);

        let reference = VarRef::new(var.name.clone());
        self.vars.push(var);
        reference
    }

    /// Append a rule record.
    pub fn add_rule(&mut self, rule: RuleRecord) {
        tracing::debug!(
            "added {} rule `{}` ({} deps, {} commands)",
            if rule.is_phony() { "phony" } else { "plain" },
            rule.name,
            rule.dependencies.len(),
            rule.commands.len()
        );
        self.rules.push(rule);
    }

    /// Aggregate `info`'s files into the synthetic `default` target.
    pub fn add_default(&mut self, info: &dyn Info) {
        tracing::debug!("marked {} file(s) as default", info.files().len());
        self.defaults.push(DefaultInfo::new(info.files().iter()));
    }

    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    pub fn rules(&self) -> &[RuleRecord] {
        &self.rules
    }

    pub fn defaults(&self) -> &[DefaultInfo] {
        &self.defaults
    }

    /// Status output used for rule descriptions.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// The synthetic `default` target: every default file in registration order.
    pub fn default_rule(&self) -> RuleRecord {
        let files = self
            .defaults
            .iter()
            .flat_map(|info| info.files().iter().cloned());
        RuleRecord::phony(Consts::DEFAULT, files, Vec::<String>::new())
    }

    /// Write the Makefile text.
    ///
    /// Order is fixed: variables, a blank line, the `default` target, then
    /// rule records in insertion order, then a trailing blank line. Rendering
    /// does not mutate the context, so repeated calls produce identical bytes.
    pub fn render<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for var in &self.vars {
            write!(writer, "{}{}", var.emit(), Consts::NL)?;
        }
        write!(writer, "{}", Consts::NL)?;

        write!(writer, "{}{}{}", self.default_rule().emit(), Consts::NL, Consts::NL)?;

        for rule in &self.rules {
            write!(writer, "{}{}", rule.emit(), Consts::NL)?;
        }

        write!(writer, "{}", Consts::NL)?;
        Ok(())
    }

    /// Render into a string.
    pub fn render_to_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::info::ArchiveInfo;
    use crate::util::shell::ShellMode;

    fn quiet_context() -> Context {
        Context::with_shell(Shell::capture(ShellMode::default()))
    }

    #[test]
    fn test_variable_returns_reference() {
        let mut ctx = quiet_context();
        let cc = ctx.variable("CC", "gcc");
        assert_eq!(cc.to_string(), "$(CC)");
        assert_eq!(ctx.variables().len(), 1);
    }

    #[test]
    fn test_variables_render_in_registration_order() {
        let mut ctx = quiet_context();
        ctx.variable("X", "1");
        ctx.variable("Y", "2");

        let out = ctx.render_to_string();
        let x = out.find("X = 1").unwrap();
        let y = out.find("Y = 2").unwrap();
        assert!(x < y);
        assert!(out.starts_with("X = 1\nY = 2\n\n"));
    }

    #[test]
    fn test_empty_context_render() {
        let ctx = quiet_context();
        assert_eq!(ctx.render_to_string(), "\n.PHONY: default\ndefault: \n\n\n");
    }

    #[test]
    fn test_default_target_aggregates_files() {
        let mut ctx = quiet_context();
        ctx.add_default(&DefaultInfo::new(["a.o"]));
        ctx.add_default(&ArchiveInfo {
            files: vec!["b.a".to_string(), "c.a".to_string()],
            lib: "b.a".to_string(),
        });

        let out = ctx.render_to_string();
        assert!(out.contains(".PHONY: default\ndefault: a.o b.a c.a\n"));
        assert_eq!(out.matches(".PHONY: default").count(), 1);
    }

    #[test]
    fn test_full_render_layout() {
        let mut ctx = quiet_context();
        let cc = ctx.variable("CC", "gcc");
        ctx.add_rule(RuleRecord::plain(
            "main.o",
            ["main.c"],
            [format!("{} -c main.c -o main.o", cc)],
        ));
        ctx.add_rule(RuleRecord::phony(
            "clean",
            Vec::<String>::new(),
            ["rm -rf a.o b.o"],
        ));
        ctx.add_default(&DefaultInfo::new(["main.o"]));

        let expected = "CC = gcc\n\
                        \n\
                        .PHONY: default\n\
                        default: main.o\n\
                        \n\
                        main.o: main.c\n\
                        \t$(CC) -c main.c -o main.o\n\
                        .PHONY: clean\n\
                        clean: \n\
                        \trm -rf a.o b.o\n\
                        \n";
        assert_eq!(ctx.render_to_string(), expected);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut ctx = quiet_context();
        ctx.variable("CC", "gcc");
        ctx.add_rule(RuleRecord::plain("a", ["b"], ["touch a"]));
        ctx.add_default(&DefaultInfo::new(["a"]));

        let first = ctx.render_to_string();
        let second = ctx.render_to_string();
        assert_eq!(first, second);
        assert_eq!(ctx.rules().len(), 1);
        assert_eq!(ctx.defaults().len(), 1);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let mut ctx = quiet_context();
        ctx.variable("CC", "gcc");
        ctx.variable("CC", "clang");
        ctx.add_rule(RuleRecord::plain("x", ["y"], Vec::<String>::new()));
        ctx.add_rule(RuleRecord::plain("x", ["z"], Vec::<String>::new()));

        let out = ctx.render_to_string();
        assert!(out.starts_with("CC = gcc\nCC = clang\n"));
        assert!(out.contains("x: y\nx: z\n"));
    }

    #[test]
    fn test_render_to_writer() {
        let mut ctx = quiet_context();
        ctx.variable("A", "1");

        let mut buf = Vec::new();
        ctx.render(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), ctx.render_to_string());
    }
}
