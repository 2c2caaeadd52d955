//! Standard rule library.
//!
//! Every rule here is an unchecked [`Rule`](crate::rule::Rule); most also
//! have a typed adapter registered in [`RuleRegistry::builtin`](crate::rule::RuleRegistry::builtin).

pub mod bins;
pub mod cc;
pub mod packaging;
pub mod phony;

pub use cc::{ccompile, ccompile_many, CCompileArgs, CCompileManyArgs};
pub use packaging::{archive, clean, ArchiveArgs, CleanArgs};
pub use phony::{phony, PhonyArgs};
