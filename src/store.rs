use thiserror::Error;

use crate::Rule;

/// Failure reported by a [`RuleStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("rule '{id}' not found")]
    NotFound { id: String },

    #[error("rule store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence seam for a shop's rule set.
///
/// Backends hand out the full rule list in sequence order; evaluation and
/// validation always run against a snapshot of it.
pub trait RuleStore {
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the backend cannot be read.
    fn rules(&self) -> Result<Vec<Rule>, StoreError>;

    /// Insert a rule, replacing any rule with the same id in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the backend cannot be written.
    fn put(&mut self, rule: Rule) -> Result<(), StoreError>;

    /// Remove and return the rule with `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the backend cannot be written.
    fn remove(&mut self, id: &str) -> Result<Option<Rule>, StoreError>;
}

/// In-memory store keeping rules in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRuleStore {
    rules: Vec<Rule>,
}

impl MemoryRuleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Borrow the stored rules without cloning.
    #[must_use]
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }
}

impl From<Vec<Rule>> for MemoryRuleStore {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl FromIterator<Rule> for MemoryRuleStore {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl RuleStore for MemoryRuleStore {
    fn rules(&self) -> Result<Vec<Rule>, StoreError> {
        Ok(self.rules.clone())
    }

    fn put(&mut self, rule: Rule) -> Result<(), StoreError> {
        match self.rules.iter_mut().find(|r| r.id() == rule.id()) {
            Some(slot) => *slot = rule,
            None => self.rules.push(rule),
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<Option<Rule>, StoreError> {
        let removed = self
            .rules
            .iter()
            .position(|r| r.id() == id)
            .map(|index| self.rules.remove(index));
        Ok(removed)
    }
}
