//! Archiving and cleanup rules.

use crate::core::context::Context;
use crate::core::expand::{command, Segment};
use crate::core::info::{ArchiveInfo, DefaultInfo};
use crate::core::record::RuleRecord;
use crate::rule::typed::{ArgSchema, ArgType, TypedRule};
use crate::rule::unchecked::Rule;

/// Arguments for [`archive`].
#[derive(Debug, Clone)]
pub struct ArchiveArgs {
    pub inputs: Vec<String>,
    pub output: String,
    pub ar: Segment,
    pub arflags: Segment,
}

/// Archive objects into a static library.
pub fn archive() -> Rule<ArchiveArgs, ArchiveInfo> {
    Rule::new("archive", archive_impl, |args: &ArchiveArgs| {
        format!(
            "Generating archiving rule for {:?} to {}",
            args.inputs, args.output
        )
    })
}

fn archive_impl(ctx: &mut Context, args: ArchiveArgs) -> ArchiveInfo {
    let mut segments = vec![args.ar, args.arflags, Segment::from(&args.output)];
    segments.extend(args.inputs.iter().map(Segment::from));

    ctx.add_rule(RuleRecord::plain(&args.output, &args.inputs, [command(segments)]));

    ArchiveInfo {
        files: vec![args.output.clone()],
        lib: args.output,
    }
}

/// Arguments for [`clean`].
#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub files: Vec<String>,
    pub rm: Segment,
    pub rmflags: Segment,
}

/// Register the phony `clean` target removing `files`.
pub fn clean() -> Rule<CleanArgs, DefaultInfo> {
    Rule::new("clean", clean_impl, |args: &CleanArgs| {
        format!("Generating clean rule for {} files", args.files.len())
    })
}

fn clean_impl(ctx: &mut Context, args: CleanArgs) -> DefaultInfo {
    let mut segments = vec![args.rm, args.rmflags];
    segments.extend(args.files.iter().map(Segment::from));

    ctx.add_rule(RuleRecord::phony(
        "clean",
        Vec::<String>::new(),
        [command(segments)],
    ));
    DefaultInfo::default()
}

/// Typed form of [`archive`].
pub fn archive_typed() -> TypedRule<DefaultInfo> {
    let schema = ArgSchema::new()
        .arg("inputs", ArgType::TextList)
        .arg("output", ArgType::Text)
        .arg("ar", ArgType::Text)
        .optional("arflags", ArgType::Text);

    TypedRule::new("archive", schema, |ctx, args| {
        let rule_args = ArchiveArgs {
            inputs: args
                .text_list("inputs")?
                .into_iter()
                .map(|seg| seg.text())
                .collect(),
            output: args.text("output")?.text(),
            ar: args.text("ar")?,
            arflags: args.text_or_empty("arflags")?,
        };
        Ok(DefaultInfo::from(archive().invoke(ctx, rule_args)))
    })
    .with_summary("Archive objects into a static library")
}

/// Typed form of [`clean`].
pub fn clean_typed() -> TypedRule<DefaultInfo> {
    let schema = ArgSchema::new()
        .arg("files", ArgType::TextList)
        .arg("rm", ArgType::Text)
        .optional("rmflags", ArgType::Text);

    TypedRule::new("clean", schema, |ctx, args| {
        let rule_args = CleanArgs {
            files: args
                .text_list("files")?
                .into_iter()
                .map(|seg| seg.text())
                .collect(),
            rm: args.text("rm")?,
            rmflags: args.text_or_empty("rmflags")?,
        };
        Ok(clean().invoke(ctx, rule_args))
    })
    .with_summary("Register the phony `clean` target")
}
