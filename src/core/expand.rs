//! Symbolic references and string expansion.
//!
//! Every string the framework emits (flags, command lines, paths) is built
//! from [`Segment`]s: literal text or a [`VarRef`] that prints as a late-bound
//! `$(NAME)` reference resolved by make, not by us.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tokens of the emitted Makefile dialect.
pub struct Consts;

impl Consts {
    pub const PHONY: &'static str = ".PHONY";
    pub const DEFAULT: &'static str = "default";
    pub const NL: &'static str = "\n";
    pub const WS: &'static str = " ";
    pub const TAB: &'static str = "\t";
}

/// A reference to a Makefile variable.
///
/// Displays as `$(NAME)`; the rendered form is computed on demand and
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarRef {
    name: String,
}

impl VarRef {
    pub fn new(name: impl Into<String>) -> Self {
        VarRef { name: name.into() }
    }

    /// The referenced variable name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$({})", self.name)
    }
}

/// One piece of an expansion: literal text or a variable reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Literal(String),
    Ref {
        #[serde(rename = "ref")]
        var: VarRef,
    },
}

impl Segment {
    /// The textual form of this segment.
    pub fn text(&self) -> String {
        match self {
            Segment::Literal(s) => s.clone(),
            Segment::Ref { var } => var.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Segment::Literal(s) => s.is_empty(),
            Segment::Ref { .. } => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => f.write_str(s),
            Segment::Ref { var } => var.fmt(f),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Literal(s.to_string())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Literal(s)
    }
}

impl From<&String> for Segment {
    fn from(s: &String) -> Self {
        Segment::Literal(s.clone())
    }
}

impl From<VarRef> for Segment {
    fn from(var: VarRef) -> Self {
        Segment::Ref { var }
    }
}

impl From<&VarRef> for Segment {
    fn from(var: &VarRef) -> Self {
        Segment::Ref { var: var.clone() }
    }
}

/// Join segments with `delim`, skipping segments whose text is empty.
///
/// Total and pure: an empty input yields an empty string, and an empty
/// segment never produces a stray delimiter.
pub fn expand<I>(segments: I, delim: &str) -> String
where
    I: IntoIterator,
    I::Item: Into<Segment>,
{
    segments
        .into_iter()
        .map(|seg| seg.into().text())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(delim)
}

/// Expand segments into a shell command line (space-delimited).
pub fn command<I>(segments: I) -> String
where
    I: IntoIterator,
    I::Item: Into<Segment>,
{
    expand(segments, Consts::WS)
}

/// Build a segment list from heterogeneous literals and references.
///
/// ```
/// use makeplan::core::expand::{expand, VarRef};
/// use makeplan::segments;
///
/// let src = VarRef::new("SRC_DIR");
/// assert_eq!(expand(segments![src, "main.c"], "/"), "$(SRC_DIR)/main.c");
/// ```
#[macro_export]
macro_rules! segments {
    ($($seg:expr),* $(,)?) => {
        vec![$($crate::core::expand::Segment::from($seg)),*]
    };
}
