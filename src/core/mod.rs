//! Core data structures for makeplan.
//!
//! This module contains the foundational types used throughout makeplan:
//! - Symbolic variable references and string expansion
//! - Variable and rule records with their Makefile emission
//! - Artifact descriptors returned by rules
//! - The build plan context and its renderer
//! - The plan file model

pub mod context;
pub mod expand;
pub mod info;
pub mod manifest;
pub mod record;

pub use context::Context;
pub use expand::{command, expand, Consts, Segment, VarRef};
pub use info::{ArchiveInfo, DefaultInfo, Info};
pub use manifest::{ManifestError, Plan, Step, VariableDecl};
pub use record::{RecordKind, RuleRecord, Variable};
