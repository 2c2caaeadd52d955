//! Rule invocation.
//!
//! Two disciplines share the [`Operation`] abstraction:
//!
//! - [`Rule`] (unchecked): trusted construction functions; programmer errors
//!   panic before anything is registered.
//! - [`TypedRule`] (checked): arguments are validated against a declared
//!   schema and every failure comes back as a [`RuleError`].
//!
//! Typed rules may adapt unchecked ones (see [`crate::rules`]); neither
//! changes the other's failure contract.

pub mod errors;
pub mod registry;
pub mod typed;
pub mod unchecked;

pub use errors::RuleError;
pub use registry::RuleRegistry;
pub use typed::{ArgSchema, ArgSpec, ArgType, ArgValue, Args, BoundArgs, TypedRule};
pub use unchecked::Rule;

/// How an operation reports failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Panics on malformed calls
    Unchecked,
    /// Returns `Err(RuleError)` on malformed calls
    Checked,
}

/// Common surface of both rule shapes.
pub trait Operation {
    fn name(&self) -> &str;

    fn discipline(&self) -> Discipline;
}
