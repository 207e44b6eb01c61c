//! Rule declaration registry for one record type.
//!
//! A [`RuleSet`] is an ordered list of rules built once at process start
//! and read-only afterwards; multiple declarations for the same field
//! accumulate rather than replace. A built set is safe to share across
//! concurrent validation calls.

use std::fmt;

use crate::rule::Rule;

/// Ordered rules for a record type.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Declaration order is evaluation order.
    pub fn declare(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet").field("rules", &self.rules).finish()
    }
}
