//! C compilation rules.

use crate::core::context::Context;
use crate::core::expand::{command, Segment, VarRef};
use crate::core::info::DefaultInfo;
use crate::core::record::RuleRecord;
use crate::rule::errors::RuleError;
use crate::rule::typed::{ArgSchema, ArgType, TypedRule};
use crate::rule::unchecked::Rule;

const OUTPUT: &str = "-o";
const CMODE: &str = "-c";

/// Arguments for [`ccompile`].
#[derive(Debug, Clone)]
pub struct CCompileArgs {
    pub inputs: Vec<String>,
    pub output: String,
    pub cc: Segment,
    pub cflags: Segment,
    /// Link instead of compiling to an object (drops `-c`)
    pub linking: bool,
}

/// Compile (or link) `inputs` into a single `output`.
pub fn ccompile() -> Rule<CCompileArgs, DefaultInfo> {
    Rule::new("compile", ccompile_impl, |args: &CCompileArgs| {
        format!(
            "Compiling {:?} to {} with {} and flags {}",
            args.inputs, args.output, args.cc, args.cflags
        )
    })
}

fn ccompile_impl(ctx: &mut Context, args: CCompileArgs) -> DefaultInfo {
    let modifier = if args.linking { "" } else { CMODE };

    let mut segments = vec![args.cc, args.cflags, Segment::from(modifier)];
    segments.extend(args.inputs.iter().map(Segment::from));
    segments.push(Segment::from(OUTPUT));
    segments.push(Segment::from(&args.output));

    ctx.add_rule(RuleRecord::plain(&args.output, &args.inputs, [command(segments)]));
    DefaultInfo::new([args.output])
}

/// Arguments for [`ccompile_many`].
#[derive(Debug, Clone)]
pub struct CCompileManyArgs {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub cc: Segment,
    pub cflags: Segment,
}

/// Compile each input into the output at the same position.
///
/// # Panics
///
/// Panics if `inputs` and `outputs` differ in length. Nothing is registered
/// in that case.
pub fn ccompile_many() -> Rule<CCompileManyArgs, DefaultInfo> {
    Rule::new("compile_many", ccompile_many_impl, |args: &CCompileManyArgs| {
        format!(
            "Compiling {:?} to {:?} with {} and flags {}",
            args.inputs, args.outputs, args.cc, args.cflags
        )
    })
}

fn ccompile_many_impl(ctx: &mut Context, args: CCompileManyArgs) -> DefaultInfo {
    assert!(
        args.inputs.len() == args.outputs.len(),
        "input and output file lists must have the same length ({} inputs, {} outputs)",
        args.inputs.len(),
        args.outputs.len()
    );

    for (input, output) in args.inputs.iter().zip(&args.outputs) {
        let cmd = command([
            args.cc.clone(),
            args.cflags.clone(),
            Segment::from(CMODE),
            Segment::from(input),
            Segment::from(OUTPUT),
            Segment::from(output),
        ]);
        ctx.add_rule(RuleRecord::plain(output, [input], [cmd]));
    }

    DefaultInfo::new(args.outputs)
}

fn texts(segments: Vec<Segment>) -> Vec<String> {
    segments.into_iter().map(|seg| seg.text()).collect()
}

/// Typed form of [`ccompile`].
pub fn compile_typed() -> TypedRule<DefaultInfo> {
    let schema = ArgSchema::new()
        .arg("inputs", ArgType::TextList)
        .arg("output", ArgType::Text)
        .arg("cc", ArgType::Text)
        .optional("cflags", ArgType::Text)
        .optional("linking", ArgType::Bool);

    TypedRule::new("compile", schema, |ctx, args| {
        let rule_args = CCompileArgs {
            inputs: texts(args.text_list("inputs")?),
            output: args.text("output")?.text(),
            cc: args.text("cc")?,
            cflags: args.text_or_empty("cflags")?,
            linking: args.bool_or("linking", false)?,
        };
        Ok(ccompile().invoke(ctx, rule_args))
    })
    .with_summary("Compile or link inputs into one output file")
}

/// Typed form of [`ccompile_many`].
///
/// A length mismatch is reported as [`RuleError::Rejected`] instead of a
/// panic.
pub fn compile_many_typed() -> TypedRule<DefaultInfo> {
    let schema = ArgSchema::new()
        .arg("inputs", ArgType::TextList)
        .arg("outputs", ArgType::TextList)
        .arg("cc", ArgType::Text)
        .optional("cflags", ArgType::Text);

    TypedRule::new("compile_many", schema, |ctx, args| {
        let inputs = texts(args.text_list("inputs")?);
        let outputs = texts(args.text_list("outputs")?);

        if inputs.len() != outputs.len() {
            return Err(RuleError::Rejected {
                rule: args.rule().to_string(),
                reason: format!(
                    "`inputs` has {} entries but `outputs` has {}",
                    inputs.len(),
                    outputs.len()
                ),
            });
        }

        let rule_args = CCompileManyArgs {
            inputs,
            outputs,
            cc: args.text("cc")?,
            cflags: args.text_or_empty("cflags")?,
        };
        Ok(ccompile_many().invoke(ctx, rule_args))
    })
    .with_summary("Compile each input into the output at the same position")
}

/// Compile one C file with `$(CC)`, every argument a plain string.
pub fn compile_c() -> TypedRule<DefaultInfo> {
    let schema = ArgSchema::new()
        .arg("inp", ArgType::Str)
        .arg("outp", ArgType::Str)
        .arg("cflags", ArgType::Str);

    TypedRule::new("compile_c", schema, |ctx, args| {
        let inp = args.str("inp")?;
        let outp = args.str("outp")?;
        let cflags = args.str("cflags")?;

        ctx.shell().describe(
            args.rule(),
            format!("Compiling {} to {} with flags {}", inp, outp, cflags),
        );

        let cmd = command([
            Segment::from(VarRef::new("CC")),
            Segment::from(cflags),
            Segment::from(CMODE),
            Segment::from(inp),
            Segment::from(OUTPUT),
            Segment::from(outp),
        ]);
        ctx.add_rule(RuleRecord::plain(outp, [inp], [cmd]));
        Ok(DefaultInfo::new([outp]))
    })
    .with_summary("Compile one C file with $(CC)")
}
