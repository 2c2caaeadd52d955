//! Typed rule registry.
//!
//! Maps rule names used in plan files to typed rules. Lookup order and
//! listing order are registration order.

use crate::core::info::DefaultInfo;
use crate::rule::typed::TypedRule;
use crate::rule::Operation;
use crate::rules;

/// Registry of typed rules available to plan files.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<TypedRule<DefaultInfo>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        RuleRegistry::default()
    }

    /// Create a registry with the standard rule library.
    pub fn builtin() -> Self {
        let mut registry = RuleRegistry::new();

        registry.register(rules::cc::compile_typed());
        registry.register(rules::cc::compile_many_typed());
        registry.register(rules::cc::compile_c());
        registry.register(rules::packaging::archive_typed());
        registry.register(rules::packaging::clean_typed());
        registry.register(rules::phony::phony_typed());

        registry
    }

    /// Register a typed rule. A rule with the same name is replaced in place.
    pub fn register(&mut self, rule: TypedRule<DefaultInfo>) {
        match self.rules.iter().position(|r| r.name() == rule.name()) {
            Some(idx) => self.rules[idx] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Get a rule by name.
    pub fn get(&self, name: &str) -> Option<&TypedRule<DefaultInfo>> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// Registered rule names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    /// All registered rules.
    pub fn all(&self) -> impl Iterator<Item = &TypedRule<DefaultInfo>> + '_ {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
