//! High-level operations.
//!
//! This module contains the implementation of makeplan commands.

pub mod generate;
pub mod init;
pub mod rules;

pub use generate::{build_context, check_plan, generate, GenerateOptions, GenerateResult};
pub use init::init_plan;
pub use rules::{format_rules, list_rules, RuleListing};
