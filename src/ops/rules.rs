//! Implementation of `makeplan rules`.

use serde::Serialize;

use crate::rule::registry::RuleRegistry;
use crate::rule::typed::ArgSpec;
use crate::rule::Operation;

/// One entry of the rule listing.
///
/// Only checked rules are registered, so every entry can be invoked from a plan.
#[derive(Debug, Clone, Serialize)]
pub struct RuleListing {
    pub name: String,
    pub summary: String,
    pub args: Vec<ArgSpec>,
}

/// Describe every registered rule in registration order.
pub fn list_rules(registry: &RuleRegistry) -> Vec<RuleListing> {
    registry
        .all()
        .map(|rule| RuleListing {
            name: rule.name().to_string(),
            summary: rule.summary().to_string(),
            args: rule.schema().iter().cloned().collect(),
        })
        .collect()
}

/// Human-readable listing.
pub fn format_rules(listings: &[RuleListing]) -> String {
    let mut out = String::new();

    for listing in listings {
        out.push_str(&listing.name);
        if !listing.summary.is_empty() {
            out.push_str(&format!(" - {}", listing.summary));
        }
        out.push('\n');

        for arg in &listing.args {
            let marker = if arg.required { "" } else { " (optional)" };
            out.push_str(&format!("    {}: {}{}\n", arg.name, arg.ty, marker));
        }
    }

    out
}
