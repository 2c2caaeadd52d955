//! `makeplan init` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{GlobalArgs, InitArgs};
use crate::commands::{current_config, make_shell};
use makeplan::ops::init::init_plan;
use makeplan::util::shell::Status;

pub fn execute(args: InitArgs, global: &GlobalArgs) -> Result<()> {
    let dir = args.path.unwrap_or_else(|| PathBuf::from("."));
    let shell = make_shell(global, &current_config(), false);

    let plan_path = init_plan(&dir)?;
    shell.status(Status::Created, format!("plan `{}`", plan_path.display()));

    Ok(())
}
