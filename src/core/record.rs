//! Variables and rule records, the units a [`Context`](super::Context) collects.

use serde::{Deserialize, Serialize};

use crate::core::expand::{expand, Consts};

/// A `NAME = VALUE` definition.
///
/// The value is fully expanded at registration time and may itself contain
/// `$(...)` references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variable {
    pub fn emit(&self) -> String {
        format!("{} = {}", self.name, self.value)
    }
}

/// Whether make treats a record as a file target or as always out of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Plain,
    Phony,
}

/// A make rule: target name, prerequisites and recipe lines.
///
/// Names are not unique; records with the same name are all emitted in
/// insertion order and make's own redefinition semantics apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub name: String,
    pub dependencies: Vec<String>,
    pub commands: Vec<String>,
    #[serde(default)]
    pub kind: RecordKind,
}

impl RuleRecord {
    /// Create a plain (file) rule.
    pub fn plain<N, D, C>(name: N, dependencies: D, commands: C) -> Self
    where
        N: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        RuleRecord {
            name: name.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            commands: commands.into_iter().map(Into::into).collect(),
            kind: RecordKind::Plain,
        }
    }

    /// Create a phony rule.
    pub fn phony<N, D, C>(name: N, dependencies: D, commands: C) -> Self
    where
        N: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        RuleRecord {
            kind: RecordKind::Phony,
            ..RuleRecord::plain(name, dependencies, commands)
        }
    }

    pub fn is_phony(&self) -> bool {
        self.kind == RecordKind::Phony
    }

    /// Append this record's lines (without trailing newlines) to `lines`.
    pub fn emit_into(&self, lines: &mut Vec<String>) {
        if self.is_phony() {
            lines.push(format!("{}: {}", Consts::PHONY, self.name));
        }

        let deps = expand(self.dependencies.iter(), Consts::WS);
        lines.push(format!("{}: {}", self.name, deps));
        lines.extend(self.commands.iter().map(|cmd| format!("{}{}", Consts::TAB, cmd)));
    }

    /// The record as newline-joined text with no trailing newline.
    pub fn emit(&self) -> String {
        let mut lines = Vec::new();
        self.emit_into(&mut lines);
        lines.join(Consts::NL)
    }
}
