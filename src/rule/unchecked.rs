//! Unchecked rules: a construction function plus a description.
//!
//! These trust their construction function to succeed. A malformed call is
//! a programmer error and panics before anything is registered.

use std::fmt;

use crate::core::context::Context;
use crate::rule::{Discipline, Operation};

type RuleImpl<A, I> = Box<dyn Fn(&mut Context, A) -> I>;
type DescribeImpl<A> = Box<dyn Fn(&A) -> String>;

/// A named operation that registers records into a [`Context`] and returns
/// an artifact descriptor.
pub struct Rule<A, I> {
    name: String,
    imp: RuleImpl<A, I>,
    describe: DescribeImpl<A>,
}

impl<A, I> Rule<A, I> {
    pub fn new<F, D>(name: impl Into<String>, imp: F, describe: D) -> Self
    where
        F: Fn(&mut Context, A) -> I + 'static,
        D: Fn(&A) -> String + 'static,
    {
        Rule {
            name: name.into(),
            imp: Box::new(imp),
            describe: Box::new(describe),
        }
    }

    /// The description this rule prints for `args`.
    pub fn describe(&self, args: &A) -> String {
        (self.describe)(args)
    }

    /// Print the description, run the construction function and return its
    /// result unchanged.
    pub fn invoke(&self, ctx: &mut Context, args: A) -> I {
        let description = self.describe(&args);
        ctx.shell().describe(&self.name, &description);
        tracing::debug!("invoking rule `{}`", self.name);

        (self.imp)(ctx, args)
    }
}

impl<A, I> Operation for Rule<A, I> {
    fn name(&self) -> &str {
        &self.name
    }

    fn discipline(&self) -> Discipline {
        Discipline::Unchecked
    }
}

impl<A, I> fmt::Debug for Rule<A, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
