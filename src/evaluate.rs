use std::time::Instant;

use tracing::{debug, trace};

use crate::{Cart, EvaluationReport, Rule, RuleKind};

/// Pick the single rule that applies to `cart`, or `None`.
///
/// Enabled rules are checked tier by tier (`TRIGGERED`, then `GLOBAL_EXCEPT`,
/// then `GLOBAL`) and in sequence order within a tier; the first rule whose
/// predicates hold wins. A rule with a `cart_value_threshold` additionally
/// requires the cart total to reach it; when it does not, evaluation moves on
/// to the next rule. Rules that are malformed for their kind never match.
///
/// # Example
///
/// ```
/// use upsell_rules::{evaluate, Cart, RuleDraft};
///
/// let rules = vec![
///     RuleDraft::global("rule-1")
///         .upsell_products(["cable", "adapter"])
///         .build(&[])
///         .unwrap(),
///     RuleDraft::triggered("rule-2")
///         .trigger_products(["iphone-15"])
///         .upsell_products(["iphone-case"])
///         .build(&[])
///         .unwrap(),
/// ];
///
/// let cart = Cart::from_products(["iphone-15", "charger"]);
/// assert_eq!(evaluate(&rules, &cart).map(|r| r.id()), Some("rule-2"));
/// assert_eq!(evaluate(&rules, &Cart::new()).map(|r| r.id()), Some("rule-1"));
/// ```
#[must_use]
pub fn evaluate<'r>(rules: &'r [Rule], cart: &Cart) -> Option<&'r Rule> {
    let matched = find_match(rules, cart, |_| {});
    match matched {
        Some(rule) => debug!(rule_id = %rule.id(), kind = %rule.kind(), "upsell rule matched"),
        None => debug!(rules = rules.len(), "no upsell rule matched"),
    }
    matched
}

/// Evaluate with diagnostics: the matched rule, its tier, the rules consulted
/// along the way, and timing.
pub fn evaluate_detailed(rules: &[Rule], cart: &Cart) -> EvaluationReport {
    let start = Instant::now();
    let mut consulted = Vec::new();

    let matched = find_match(rules, cart, |rule| consulted.push(rule.id().to_owned()));
    let skipped_disabled = rules.iter().filter(|r| !r.enabled()).count();

    let duration = start.elapsed();
    EvaluationReport::new(
        matched.map(|rule| (rule.id().to_owned(), rule.kind())),
        consulted,
        skipped_disabled,
        duration,
    )
}

fn find_match<'r>(
    rules: &'r [Rule],
    cart: &Cart,
    mut on_consult: impl FnMut(&'r Rule),
) -> Option<&'r Rule> {
    for tier in RuleKind::TIERS {
        for rule in rules.iter().filter(|r| r.enabled() && r.kind() == tier) {
            on_consult(rule);
            if matches(rule, cart) {
                return Some(rule);
            }
            trace!(rule_id = %rule.id(), tier = %tier, "upsell rule rejected");
        }
    }
    None
}

fn matches(rule: &Rule, cart: &Cart) -> bool {
    if !rule.is_matchable() {
        return false;
    }
    let primary = match rule.kind() {
        RuleKind::Triggered => rule.trigger_ids().any(|id| cart.contains(id)),
        RuleKind::GlobalExcept => !rule.exclusion_ids().any(|id| cart.contains(id)),
        RuleKind::Global => true,
    };
    primary && rule.meets_threshold(cart.total_value())
}
