//! makeplan - A declarative rule framework that compiles build plans into Makefiles
//!
//! This crate provides the core library functionality for makeplan:
//! variable and rule records accumulated in a [`Context`], the unchecked and
//! typed rule disciplines, the standard rule library, and plan-file driven
//! generation.
//!
//! makeplan never runs a build. It writes a Makefile that `make` runs later.

pub mod core;
pub mod ops;
pub mod rule;
pub mod rules;
pub mod util;

pub use core::{
    context::Context,
    expand::{command, expand, Segment, VarRef},
    info::{ArchiveInfo, DefaultInfo, Info},
    manifest::Plan,
};

pub use rule::{Args, Rule, RuleError, RuleRegistry, TypedRule};
