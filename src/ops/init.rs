//! Implementation of `makeplan init`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::util::config::PLAN_FILE;
use crate::util::fs::{ensure_dir, write_string};

/// Starter plan: one C file compiled and linked into `hello`.
pub const STARTER_PLAN: &str = r#"# makeplan build plan
#
# Run `makeplan generate` to write the Makefile and `makeplan rules` to list
# the rules a step can use.

tools = ["rm"]

[output]
path = "Makefile"

[[variables]]
name = "CC"
value = "gcc"

[[variables]]
name = "CFLAGS"
value = "-Wall -Wextra"

[[steps]]
rule = "compile"
[steps.args]
inputs = ["main.c"]
output = "main.o"
cc = { ref = "CC" }
cflags = { ref = "CFLAGS" }

[[steps]]
rule = "compile"
default = true
[steps.args]
inputs = ["main.o"]
output = "hello"
cc = { ref = "CC" }
linking = true

[[steps]]
rule = "clean"
[steps.args]
files = ["main.o", "hello"]
rm = { ref = "RM" }
rmflags = "-f"
"#;

/// Write a starter plan file into `dir`.
pub fn init_plan(dir: &Path) -> Result<PathBuf> {
    let plan_path = dir.join(PLAN_FILE);
    if plan_path.exists() {
        bail!("`{}` already exists in `{}`", PLAN_FILE, dir.display());
    }

    ensure_dir(dir)?;
    write_string(&plan_path, STARTER_PLAN)?;
    tracing::debug!("wrote starter plan to {}", plan_path.display());

    Ok(plan_path)
}
