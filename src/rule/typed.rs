//! Checked rules: schema-validated arguments and `Result`-returning invocation.
//!
//! A [`TypedRule`] declares an [`ArgSchema`] at construction time. Invocation
//! validates the supplied [`Args`] in three phases, stopping at the first
//! failure:
//!
//! 1. every required schema key is present (schema declaration order)
//! 2. every supplied key is declared (supplied order)
//! 3. every supplied value satisfies its declared [`ArgType`] (supplied order)
//!
//! The construction function only runs once all three pass, so a failed
//! invocation leaves the [`Context`] untouched.

use std::fmt;

use serde::Serialize;

use crate::core::context::Context;
use crate::core::expand::{Segment, VarRef};
use crate::rule::errors::RuleError;
use crate::rule::{Discipline, Operation};

/// The type a schema entry expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgType {
    Str,
    Int,
    Float,
    Bool,
    /// A variable reference
    Ref,
    /// A literal string or a variable reference
    Text,
    /// A list of any values
    List,
    /// A list of literal strings or variable references
    TextList,
}

impl ArgType {
    /// Whether `value` satisfies this type.
    pub fn accepts(&self, value: &ArgValue) -> bool {
        match (self, value) {
            (ArgType::Str, ArgValue::Str(_)) => true,
            (ArgType::Int, ArgValue::Int(_)) => true,
            (ArgType::Float, ArgValue::Float(_)) => true,
            (ArgType::Bool, ArgValue::Bool(_)) => true,
            (ArgType::Ref, ArgValue::Ref(_)) => true,
            (ArgType::Text, ArgValue::Str(_) | ArgValue::Ref(_)) => true,
            (ArgType::List, ArgValue::List(_)) => true,
            (ArgType::TextList, ArgValue::List(items)) => {
                items.iter().all(|item| ArgType::Text.accepts(item))
            }
            _ => false,
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgType::Str => "string",
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Bool => "bool",
            ArgType::Ref => "reference",
            ArgType::Text => "text",
            ArgType::List => "list",
            ArgType::TextList => "list of text",
        };
        f.write_str(name)
    }
}

/// A runtime argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Ref(VarRef),
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// The runtime type of this value.
    pub fn type_of(&self) -> ArgType {
        match self {
            ArgValue::Str(_) => ArgType::Str,
            ArgValue::Int(_) => ArgType::Int,
            ArgValue::Float(_) => ArgType::Float,
            ArgValue::Bool(_) => ArgType::Bool,
            ArgValue::Ref(_) => ArgType::Ref,
            ArgValue::List(_) => ArgType::List,
        }
    }

    /// The value as an expansion segment, if it is textual.
    pub fn as_segment(&self) -> Option<Segment> {
        match self {
            ArgValue::Str(s) => Some(Segment::Literal(s.clone())),
            ArgValue::Ref(var) => Some(Segment::from(var)),
            _ => None,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Int(n)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Float(n)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<VarRef> for ArgValue {
    fn from(var: VarRef) -> Self {
        ArgValue::Ref(var)
    }
}

impl From<&VarRef> for ArgValue {
    fn from(var: &VarRef) -> Self {
        ArgValue::Ref(var.clone())
    }
}

impl From<Segment> for ArgValue {
    fn from(seg: Segment) -> Self {
        match seg {
            Segment::Literal(s) => ArgValue::Str(s),
            Segment::Ref { var } => ArgValue::Ref(var),
        }
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(items: Vec<T>) -> Self {
        ArgValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Supplied arguments, kept in supplied order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Args {
    entries: Vec<(String, ArgValue)>,
}

impl Args {
    pub fn new() -> Self {
        Args::default()
    }

    /// Builder form of [`Args::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`. A repeated key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for Args {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut args = Args::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

/// One declared argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ArgType,
    pub required: bool,
}

/// Declared arguments of a typed rule, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgSchema {
    specs: Vec<ArgSpec>,
}

impl ArgSchema {
    pub fn new() -> Self {
        ArgSchema::default()
    }

    /// Declare a required argument.
    pub fn arg(mut self, name: impl Into<String>, ty: ArgType) -> Self {
        self.specs.push(ArgSpec {
            name: name.into(),
            ty,
            required: true,
        });
        self
    }

    /// Declare an argument that may be omitted.
    pub fn optional(mut self, name: impl Into<String>, ty: ArgType) -> Self {
        self.specs.push(ArgSpec {
            name: name.into(),
            ty,
            required: false,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Run the three validation phases against `args`.
    pub fn validate(&self, rule: &str, args: &Args) -> Result<(), RuleError> {
        if let Some(spec) = self
            .specs
            .iter()
            .find(|spec| spec.required && !args.contains(&spec.name))
        {
            return Err(RuleError::ArgumentMissing {
                argument: spec.name.clone(),
                rule: rule.to_string(),
            });
        }

        if let Some((key, value)) = args.iter().find(|(key, _)| self.get(key).is_none()) {
            return Err(RuleError::ArgumentUnknown {
                argument: key.to_string(),
                actual: value.type_of(),
                rule: rule.to_string(),
            });
        }

        for (key, value) in args.iter() {
            if let Some(spec) = self.get(key) {
                if !spec.ty.accepts(value) {
                    return Err(RuleError::ArgumentTypeMismatch {
                        argument: key.to_string(),
                        expected: spec.ty,
                        actual: value.type_of(),
                        rule: rule.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Validated arguments handed to a typed rule's construction function.
///
/// Accessors re-check presence and type so construction functions can use
/// `?` instead of unwrapping.
#[derive(Debug, Clone, Copy)]
pub struct BoundArgs<'a> {
    rule: &'a str,
    args: &'a Args,
}

impl<'a> BoundArgs<'a> {
    pub fn new(rule: &'a str, args: &'a Args) -> Self {
        BoundArgs { rule, args }
    }

    pub fn rule(&self) -> &str {
        self.rule
    }

    /// The raw value, if supplied.
    pub fn get(&self, key: &str) -> Option<&'a ArgValue> {
        self.args.get(key)
    }

    pub fn value(&self, key: &str) -> Result<&'a ArgValue, RuleError> {
        self.args.get(key).ok_or_else(|| RuleError::ArgumentMissing {
            argument: key.to_string(),
            rule: self.rule.to_string(),
        })
    }

    pub fn str(&self, key: &str) -> Result<&'a str, RuleError> {
        match self.value(key)? {
            ArgValue::Str(s) => Ok(s),
            other => Err(self.mismatch(key, ArgType::Str, other)),
        }
    }

    pub fn bool(&self, key: &str) -> Result<bool, RuleError> {
        match self.value(key)? {
            ArgValue::Bool(b) => Ok(*b),
            other => Err(self.mismatch(key, ArgType::Bool, other)),
        }
    }

    pub fn int(&self, key: &str) -> Result<i64, RuleError> {
        match self.value(key)? {
            ArgValue::Int(n) => Ok(*n),
            other => Err(self.mismatch(key, ArgType::Int, other)),
        }
    }

    pub fn text(&self, key: &str) -> Result<Segment, RuleError> {
        let value = self.value(key)?;
        value
            .as_segment()
            .ok_or_else(|| self.mismatch(key, ArgType::Text, value))
    }

    pub fn text_list(&self, key: &str) -> Result<Vec<Segment>, RuleError> {
        let value = self.value(key)?;
        match value {
            ArgValue::List(items) => items
                .iter()
                .map(|item| {
                    item.as_segment()
                        .ok_or_else(|| self.mismatch(key, ArgType::TextList, value))
                })
                .collect(),
            other => Err(self.mismatch(key, ArgType::TextList, other)),
        }
    }

    /// Like [`BoundArgs::bool`], but an omitted argument is `default`.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, RuleError> {
        if self.args.contains(key) {
            self.bool(key)
        } else {
            Ok(default)
        }
    }

    /// Like [`BoundArgs::text`], but an omitted argument is an empty literal.
    pub fn text_or_empty(&self, key: &str) -> Result<Segment, RuleError> {
        if self.args.contains(key) {
            self.text(key)
        } else {
            Ok(Segment::Literal(String::new()))
        }
    }

    /// Like [`BoundArgs::text_list`], but an omitted argument is empty.
    pub fn text_list_or_empty(&self, key: &str) -> Result<Vec<Segment>, RuleError> {
        if self.args.contains(key) {
            self.text_list(key)
        } else {
            Ok(Vec::new())
        }
    }

    fn mismatch(&self, key: &str, expected: ArgType, value: &ArgValue) -> RuleError {
        RuleError::ArgumentTypeMismatch {
            argument: key.to_string(),
            expected,
            actual: value.type_of(),
            rule: self.rule.to_string(),
        }
    }
}

type TypedImpl<I> = Box<dyn Fn(&mut Context, BoundArgs<'_>) -> Result<I, RuleError>>;

/// A rule whose arguments are checked against a schema before it runs.
pub struct TypedRule<I> {
    name: String,
    schema: ArgSchema,
    summary: String,
    imp: TypedImpl<I>,
}

impl<I> TypedRule<I> {
    pub fn new<F>(name: impl Into<String>, schema: ArgSchema, imp: F) -> Self
    where
        F: Fn(&mut Context, BoundArgs<'_>) -> Result<I, RuleError> + 'static,
    {
        TypedRule {
            name: name.into(),
            schema,
            summary: String::new(),
            imp: Box::new(imp),
        }
    }

    /// Attach a one-line summary shown by `makeplan rules`.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn schema(&self) -> &ArgSchema {
        &self.schema
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Check `args` without invoking the rule.
    pub fn validate(&self, args: &Args) -> Result<(), RuleError> {
        self.schema.validate(&self.name, args)
    }

    /// Validate `args`, then run the construction function.
    pub fn invoke(&self, ctx: &mut Context, args: &Args) -> Result<I, RuleError> {
        if let Err(e) = self.validate(args) {
            tracing::debug!("rule `{}` rejected: {}", self.name, e);
            return Err(e);
        }

        tracing::debug!("invoking typed rule `{}` with {} args", self.name, args.len());
        (self.imp)(ctx, BoundArgs::new(&self.name, args))
    }
}

impl<I> Operation for TypedRule<I> {
    fn name(&self) -> &str {
        &self.name
    }

    fn discipline(&self) -> Discipline {
        Discipline::Checked
    }
}

impl<I> fmt::Debug for TypedRule<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedRule")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
