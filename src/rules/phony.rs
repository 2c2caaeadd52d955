//! Phony aggregate targets (`all`, `depend`, `echo`, ...).

use crate::core::context::Context;
use crate::core::info::DefaultInfo;
use crate::core::record::RuleRecord;
use crate::rule::typed::{ArgSchema, ArgType, TypedRule};
use crate::rule::unchecked::Rule;

/// Arguments for [`phony`].
#[derive(Debug, Clone, Default)]
pub struct PhonyArgs {
    pub name: String,
    pub dependencies: Vec<String>,
    pub commands: Vec<String>,
    /// Files reported back to the caller
    pub files: Vec<String>,
}

/// Register a phony target that make always considers out of date.
pub fn phony() -> Rule<PhonyArgs, DefaultInfo> {
    Rule::new("phony", phony_impl, |args: &PhonyArgs| {
        format!("Generating phony target {}", args.name)
    })
}

fn phony_impl(ctx: &mut Context, args: PhonyArgs) -> DefaultInfo {
    ctx.add_rule(RuleRecord::phony(args.name, args.dependencies, args.commands));
    DefaultInfo::new(args.files)
}

/// Typed form of [`phony`].
pub fn phony_typed() -> TypedRule<DefaultInfo> {
    let schema = ArgSchema::new()
        .arg("name", ArgType::Str)
        .optional("dependencies", ArgType::TextList)
        .optional("commands", ArgType::TextList)
        .optional("files", ArgType::TextList);

    TypedRule::new("phony", schema, |ctx, args| {
        let texts = |key: &str| {
            args.text_list_or_empty(key)
                .map(|segs| segs.into_iter().map(|seg| seg.text()).collect::<Vec<_>>())
        };

        let rule_args = PhonyArgs {
            name: args.str("name")?.to_string(),
            dependencies: texts("dependencies")?,
            commands: texts("commands")?,
            files: texts("files")?,
        };
        Ok(phony().invoke(ctx, rule_args))
    })
    .with_summary("Register a phony target with optional dependencies and commands")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expand::{command, VarRef};
    use crate::rule::typed::Args;
    use crate::util::shell::{Shell, ShellMode};

    fn context() -> Context {
        Context::with_shell(Shell::capture(ShellMode::default()))
    }

    #[test]
    fn test_phony_all() {
        let mut ctx = context();
        let touch = VarRef::new("TOUCH");

        let info = phony().invoke(
            &mut ctx,
            PhonyArgs {
                name: "all".to_string(),
                dependencies: vec!["$(CORE_T)".to_string(), "$(LUA_T)".to_string()],
                commands: vec![command([touch.to_string(), "all".to_string()])],
                files: vec!["$(CORE_T)".to_string(), "$(LUA_T)".to_string()],
            },
        );

        assert_eq!(info.files.len(), 2);
        assert_eq!(
            ctx.rules()[0].emit(),
            ".PHONY: all\nall: $(CORE_T) $(LUA_T)\n\t$(TOUCH) all"
        );
    }

    #[test]
    fn test_phony_typed_defaults() {
        let mut ctx = context();
        let args = Args::new().with("name", "depend");

        let info = phony_typed().invoke(&mut ctx, &args).unwrap();
        assert!(info.files.is_empty());
        assert_eq!(ctx.rules()[0].emit(), ".PHONY: depend\ndepend: ");
    }

    #[test]
    fn test_phony_typed_with_refs() {
        let mut ctx = context();
        let args = Args::new()
            .with("name", "o")
            .with("dependencies", vec![VarRef::new("ALL_O")]);

        phony_typed().invoke(&mut ctx, &args).unwrap();
        assert_eq!(ctx.rules()[0].dependencies, vec!["$(ALL_O)"]);
    }
}
