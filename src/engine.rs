use tracing::info;

use crate::{
    can_enable, evaluate, Cart, EnableCheck, EngineError, Rule, RuleDraft, RuleKind, RuleStore,
    StoreError, ValidationPolicy,
};

/// Wires a [`RuleStore`] to the evaluator, validator and conflict checker.
///
/// Every call reads a fresh snapshot from the store, so the engine itself holds
/// no rule state.
///
/// # Example
///
/// ```
/// use upsell_rules::{Cart, MemoryRuleStore, RuleDraft, UpsellEngine};
///
/// let mut engine = UpsellEngine::new(MemoryRuleStore::new());
/// engine
///     .save(&RuleDraft::global("rule-1").upsell_products(["cable"]))
///     .unwrap();
///
/// let rule = engine.recommend(&Cart::new()).unwrap().unwrap();
/// assert_eq!(rule.id(), "rule-1");
/// ```
#[derive(Debug, Clone)]
pub struct UpsellEngine<S> {
    store: S,
    policy: ValidationPolicy,
}

impl<S: RuleStore> UpsellEngine<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_policy(store, ValidationPolicy::default())
    }

    #[must_use]
    pub fn with_policy(store: S, policy: ValidationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The rule that applies to `cart`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] when the rule set cannot be loaded.
    pub fn recommend(&self, cart: &Cart) -> Result<Option<Rule>, EngineError> {
        let rules = self.store.rules()?;
        Ok(evaluate(&rules, cart).cloned())
    }

    /// Validate `draft` against the stored rules and persist it.
    ///
    /// A draft whose id is already stored replaces that rule.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Invalid`] with every violation, or
    /// [`EngineError::Store`] when the store fails.
    pub fn save(&mut self, draft: &RuleDraft) -> Result<Rule, EngineError> {
        let existing = self.store.rules()?;
        let rule = draft.build_with(&self.policy, &existing)?;
        self.store.put(rule.clone())?;
        info!(rule_id = %rule.id(), kind = %rule.kind(), enabled = rule.enabled(), "upsell rule saved");
        Ok(rule)
    }

    /// Remove the rule with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] (wrapped) when no such rule exists.
    pub fn delete(&mut self, id: &str) -> Result<Rule, EngineError> {
        let removed = self
            .store
            .remove(id)?
            .ok_or_else(|| StoreError::NotFound { id: id.to_owned() })?;
        info!(rule_id = %id, "upsell rule deleted");
        Ok(removed)
    }

    /// Whether a rule of `kind` may be enabled next to the stored rules.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] when the rule set cannot be loaded.
    pub fn can_enable(&self, kind: RuleKind) -> Result<EnableCheck, EngineError> {
        let rules = self.store.rules()?;
        Ok(can_enable(kind, &rules))
    }
}
