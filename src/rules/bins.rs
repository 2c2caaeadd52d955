//! Variables for common shell tools.

use crate::core::context::Context;
use crate::core::expand::VarRef;

/// Tool variables this module knows how to declare, as `(name, VARIABLE, value)`.
pub const TOOLS: &[(&str, &str, &str)] = &[
    ("rm", "RM", "rm"),
    ("echo", "ECHO", "echo"),
    ("printf", "PRINTF", "printf"),
    ("touch", "TOUCH", "touch"),
    ("python", "PYTHON", "python3"),
];

/// Declare `RM = rm`.
pub fn rm(ctx: &mut Context) -> VarRef {
    ctx.variable("RM", "rm")
}

/// Declare `ECHO = echo`.
pub fn echo(ctx: &mut Context) -> VarRef {
    ctx.variable("ECHO", "echo")
}

/// Declare `PRINTF = printf`.
pub fn printf(ctx: &mut Context) -> VarRef {
    ctx.variable("PRINTF", "printf")
}

/// Declare `TOUCH = touch`.
pub fn touch(ctx: &mut Context) -> VarRef {
    ctx.variable("TOUCH", "touch")
}

/// Declare `PYTHON = python3`, the interpreter make finds on `PATH`.
pub fn python(ctx: &mut Context) -> VarRef {
    ctx.variable("PYTHON", "python3")
}

/// Declare a tool variable by its short name (`"rm"`, `"echo"`, ...).
///
/// Returns `None` for names not listed in [`TOOLS`].
pub fn declare(ctx: &mut Context, tool: &str) -> Option<VarRef> {
    TOOLS
        .iter()
        .find(|(name, _, _)| *name == tool)
        .map(|(_, var, value)| ctx.variable(*var, *value))
}
