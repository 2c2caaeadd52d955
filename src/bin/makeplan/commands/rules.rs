//! `makeplan rules` command

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, RulesArgs};
use makeplan::ops::rules::{format_rules, list_rules};
use makeplan::rule::RuleRegistry;

pub fn execute(args: RulesArgs, _global: &GlobalArgs) -> Result<()> {
    let listings = list_rules(&RuleRegistry::builtin());

    if args.json {
        let json =
            serde_json::to_string_pretty(&listings).context("failed to serialize rule listing")?;
        println!("{}", json);
    } else {
        print!("{}", format_rules(&listings));
    }

    Ok(())
}
