use std::collections::HashSet;

use tracing::debug;

use crate::conflict::{conflicting_rule, kind_conflict};
use crate::{
    DisplayScope, ProductList, ProductRef, Rule, RuleDraft, RuleKind, ValidationError,
    ValidationPolicy, ValidationResult,
};

/// Validate a candidate rule against the current rule set with the default
/// [`ValidationPolicy`].
///
/// `existing` is consulted for the cross-rule checks (one `single` scope rule
/// per set, `GLOBAL`/`GLOBAL_EXCEPT` exclusivity). A rule in `existing` with
/// the candidate's id is the rule being edited and is ignored by those checks.
pub fn validate(candidate: &RuleDraft, existing: &[Rule]) -> ValidationResult {
    validate_with(&ValidationPolicy::default(), candidate, existing)
}

/// Like [`validate()`] with an explicit policy.
pub fn validate_with(
    policy: &ValidationPolicy,
    candidate: &RuleDraft,
    existing: &[Rule],
) -> ValidationResult {
    let errors = collect_errors(policy, candidate, existing);
    if !errors.is_empty() {
        debug!(rule_id = %candidate.id, errors = errors.len(), "upsell rule rejected");
    }
    ValidationResult::from_errors(errors)
}

/// Validate a whole rule set as submitted in one save.
///
/// Reports duplicate rule ids, more than one `single` scope rule and
/// coexisting enabled `GLOBAL`/`GLOBAL_EXCEPT` rules, followed by each rule's
/// own violations prefixed with its index.
pub fn validate_set(rules: &[RuleDraft]) -> ValidationResult {
    validate_set_with(&ValidationPolicy::default(), rules)
}

/// Like [`validate_set()`] with an explicit policy.
pub fn validate_set_with(policy: &ValidationPolicy, rules: &[RuleDraft]) -> ValidationResult {
    let mut errors = Vec::new();

    let ids = duplicates(rules.iter().map(|r| r.id.as_str()));
    if !ids.is_empty() {
        errors.push(ValidationError::DuplicateRuleIds { ids });
    }

    let singles: Vec<String> = rules
        .iter()
        .filter(|r| r.display_scope.as_deref() == Some(DisplayScope::Single.as_str()))
        .map(|r| r.id.clone())
        .collect();
    if singles.len() > 1 {
        errors.push(ValidationError::MultipleSingleScope { ids: singles });
    }

    if let Some(conflict) = set_kind_conflict(rules) {
        errors.push(conflict);
    }

    for (index, rule) in rules.iter().enumerate() {
        for error in collect_errors(policy, rule, &[]) {
            errors.push(ValidationError::InRule {
                index,
                error: Box::new(error),
            });
        }
    }

    if !errors.is_empty() {
        debug!(rules = rules.len(), errors = errors.len(), "upsell rule set rejected");
    }
    ValidationResult::from_errors(errors)
}

fn collect_errors(
    policy: &ValidationPolicy,
    candidate: &RuleDraft,
    existing: &[Rule],
) -> Vec<ValidationError> {
    // Nothing else can be judged without a known kind.
    let Ok(kind) = candidate.kind.parse::<RuleKind>() else {
        return vec![ValidationError::UnknownKind {
            value: candidate.kind.clone(),
        }];
    };

    let mut errors = Vec::new();

    if candidate.id.trim().is_empty() {
        errors.push(ValidationError::MissingId);
    }
    let scope = match candidate.display_scope.as_deref() {
        None => Some(DisplayScope::All),
        Some(raw) => match raw.parse::<DisplayScope>() {
            Ok(scope) => Some(scope),
            Err(err) => {
                errors.push(err.into());
                None
            }
        },
    };

    check_kind_fields(kind, scope, candidate, &mut errors);
    check_ranges(policy, candidate, &mut errors);

    let upsells_ok = check_upsell_payload(candidate, &mut errors);
    let triggers_ok = check_products(ProductList::Trigger, &candidate.trigger_products, &mut errors);

    check_duplicates(candidate, &mut errors);

    if upsells_ok && triggers_ok {
        check_overlap(candidate, &mut errors);
    }

    if scope == Some(DisplayScope::Single) {
        check_single_scope(candidate, existing, &mut errors);
    }

    if candidate.enabled {
        if let Some(rule) = conflicting_rule(kind, existing, Some(&candidate.id)) {
            errors.push(kind_conflict(kind, rule));
        }
    }

    errors
}

fn check_kind_fields(
    kind: RuleKind,
    scope: Option<DisplayScope>,
    draft: &RuleDraft,
    errors: &mut Vec<ValidationError>,
) {
    let has_triggers = !draft.trigger_products.is_empty() || !draft.trigger_collections.is_empty();
    let has_exclusions =
        !draft.excluded_products.is_empty() || !draft.excluded_collections.is_empty();

    match kind {
        RuleKind::Triggered => {
            if !has_triggers {
                errors.push(ValidationError::MissingTriggers);
            } else if scope == Some(DisplayScope::Single) && draft.trigger_products.len() != 1 {
                errors.push(ValidationError::SingleScopeTriggerCount {
                    found: draft.trigger_products.len(),
                });
            }
            unused_exclusions(kind, draft, errors);
        }
        RuleKind::GlobalExcept => {
            if !has_exclusions {
                errors.push(ValidationError::MissingExclusions);
            }
            unused_triggers(kind, draft, errors);
        }
        RuleKind::Global => {
            unused_triggers(kind, draft, errors);
            unused_exclusions(kind, draft, errors);
        }
    }

    if kind != RuleKind::Triggered {
        if let Some(scope @ (DisplayScope::Single | DisplayScope::PerProduct)) = scope {
            errors.push(ValidationError::ScopeRequiresTrigger { scope });
        }
    }
}

fn unused_triggers(kind: RuleKind, draft: &RuleDraft, errors: &mut Vec<ValidationError>) {
    if !draft.trigger_products.is_empty() {
        errors.push(ValidationError::UnusedField {
            kind,
            field: "triggerProducts",
        });
    }
    if !draft.trigger_collections.is_empty() {
        errors.push(ValidationError::UnusedField {
            kind,
            field: "triggerCollections",
        });
    }
}

fn unused_exclusions(kind: RuleKind, draft: &RuleDraft, errors: &mut Vec<ValidationError>) {
    if !draft.excluded_products.is_empty() {
        errors.push(ValidationError::UnusedField {
            kind,
            field: "excludedProducts",
        });
    }
    if !draft.excluded_collections.is_empty() {
        errors.push(ValidationError::UnusedField {
            kind,
            field: "excludedCollections",
        });
    }
}

fn check_ranges(policy: &ValidationPolicy, draft: &RuleDraft, errors: &mut Vec<ValidationError>) {
    if !policy.allows_limit(draft.limit) {
        errors.push(ValidationError::LimitOutOfRange {
            limit: draft.limit,
            min: policy.limit_range().0,
            max: policy.limit_range().1,
        });
    }
    if let Some(threshold) = draft.cart_value_threshold {
        if !threshold.is_finite() || threshold <= 0.0 {
            errors.push(ValidationError::InvalidThreshold { value: threshold });
        }
    }
}

/// Returns `true` when the upsell payload is well formed.
fn check_upsell_payload(draft: &RuleDraft, errors: &mut Vec<ValidationError>) -> bool {
    let mut ok = true;
    if draft.enabled && draft.upsell_products.is_empty() && draft.upsell_collections.is_empty() {
        errors.push(ValidationError::MissingUpsells);
        ok = false;
    }
    check_products(ProductList::Upsell, &draft.upsell_products, errors) && ok
}

/// Check every entry carries an id and a title, and any price is a
/// non-negative number. Returns `true` when no entry was faulty.
fn check_products(
    list: ProductList,
    products: &[ProductRef],
    errors: &mut Vec<ValidationError>,
) -> bool {
    let before = errors.len();
    for (index, product) in products.iter().enumerate() {
        if product.id.trim().is_empty() {
            errors.push(ValidationError::MissingProductId { list, index });
        }
        if product.title.trim().is_empty() {
            errors.push(ValidationError::MissingProductTitle { list, index });
        }
        if let Some(price) = &product.price {
            if !is_valid_price(price) {
                errors.push(ValidationError::InvalidPrice {
                    list,
                    index,
                    value: price.clone(),
                });
            }
        }
    }
    errors.len() == before
}

/// A blank price counts as zero.
fn is_valid_price(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return true;
    }
    raw.parse::<f64>()
        .is_ok_and(|price| price.is_finite() && price >= 0.0)
}

fn check_duplicates(draft: &RuleDraft, errors: &mut Vec<ValidationError>) {
    let ids = duplicates(draft.upsell_products.iter().map(|p| p.id.as_str()));
    if !ids.is_empty() {
        errors.push(ValidationError::DuplicateUpsellProducts { ids });
    }
    let ids = duplicates(draft.trigger_products.iter().map(|p| p.id.as_str()));
    if !ids.is_empty() {
        errors.push(ValidationError::DuplicateTriggerProducts { ids });
    }
}

fn check_overlap(draft: &RuleDraft, errors: &mut Vec<ValidationError>) {
    let upsell_ids: HashSet<&str> = draft
        .upsell_products
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    let products: Vec<String> = draft
        .trigger_products
        .iter()
        .filter(|p| upsell_ids.contains(p.id.as_str()))
        .map(|p| p.display_name().to_owned())
        .collect();
    if !products.is_empty() {
        errors.push(ValidationError::TriggerUpsellOverlap { products });
    }
}

fn check_single_scope(draft: &RuleDraft, existing: &[Rule], errors: &mut Vec<ValidationError>) {
    let mut ids: Vec<String> = existing
        .iter()
        .filter(|r| r.id() != draft.id && r.display_scope() == DisplayScope::Single)
        .map(|r| r.id().to_owned())
        .collect();
    if !ids.is_empty() {
        ids.push(draft.id.clone());
        errors.push(ValidationError::MultipleSingleScope { ids });
    }
}

/// The first enabled `GLOBAL`/`GLOBAL_EXCEPT` pair in a submitted set,
/// reported against the later of the two.
fn set_kind_conflict(rules: &[RuleDraft]) -> Option<ValidationError> {
    let mut first: Option<(&RuleDraft, RuleKind)> = None;
    for rule in rules.iter().filter(|r| r.enabled) {
        let Ok(kind) = rule.kind.parse::<RuleKind>() else {
            continue;
        };
        let Some(opposing) = kind.exclusive_with() else {
            continue;
        };
        match first {
            Some((earlier, earlier_kind)) if earlier_kind == opposing => {
                return Some(ValidationError::KindConflict {
                    kind,
                    existing: earlier_kind,
                    existing_id: earlier.id.clone(),
                });
            }
            Some(_) => {}
            None => first = Some((rule, kind)),
        }
    }
    None
}

/// Ids that occur more than once, in the order their repeats are found.
/// Blank ids are ignored; they are reported as missing instead.
fn duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for id in ids.filter(|id| !id.trim().is_empty()) {
        if !seen.insert(id) && reported.insert(id) {
            dups.push(id.to_owned());
        }
    }
    dups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCategory;

    fn errors_of(draft: &RuleDraft) -> Vec<ValidationError> {
        validate(draft, &[]).errors().to_vec()
    }

    fn valid_triggered() -> RuleDraft {
        RuleDraft::triggered("new-rule")
            .trigger_products(["product-1"])
            .upsell_products(["product-2", "product-3"])
            .limit(2)
    }

    #[test]
    fn valid_triggered_rule() {
        assert!(validate(&valid_triggered(), &[]).is_valid());
    }

    #[test]
    fn missing_triggers() {
        let draft = RuleDraft::triggered("new-rule")
            .upsell_products(["product-2"])
            .limit(2);
        let result = validate(&draft, &[]);
        assert!(!result.is_valid());
        assert_eq!(result.errors(), &[ValidationError::MissingTriggers]);
        assert!(result.messages()[0].contains("trigger"));
    }

    #[test]
    fn trigger_collection_satisfies_triggered() {
        let draft = RuleDraft::triggered("r")
            .trigger_collections(["phones"])
            .upsell_products(["case"]);
        assert!(validate(&draft, &[]).is_valid());
    }

    #[test]
    fn unknown_kind_is_sole_error() {
        let draft = RuleDraft::default().raw_kind("EVERYTHING").limit(99);
        assert_eq!(
            errors_of(&draft),
            vec![ValidationError::UnknownKind {
                value: "EVERYTHING".into()
            }]
        );
    }

    #[test]
    fn missing_id_and_bad_scope_are_collected() {
        let draft = RuleDraft::global("  ")
            .raw_display_scope("some")
            .upsell_products(["cable"]);
        assert_eq!(
            errors_of(&draft),
            vec![
                ValidationError::MissingId,
                ValidationError::UnknownDisplayScope {
                    value: "some".into()
                },
            ]
        );
    }

    #[test]
    fn global_except_requires_exclusions() {
        let draft = RuleDraft::global_except("e").upsell_products(["gift-wrap"]);
        assert_eq!(errors_of(&draft), vec![ValidationError::MissingExclusions]);
    }

    #[test]
    fn unused_fields_are_rejected() {
        let draft = RuleDraft::global("g")
            .trigger_products(["laptop"])
            .excluded_collections(["gift-cards"])
            .upsell_products(["cable"]);
        let errors = errors_of(&draft);
        assert_eq!(
            errors,
            vec![
                ValidationError::UnusedField {
                    kind: RuleKind::Global,
                    field: "triggerProducts",
                },
                ValidationError::UnusedField {
                    kind: RuleKind::Global,
                    field: "excludedCollections",
                },
            ]
        );
    }

    #[test]
    fn single_scope_needs_exactly_one_trigger_product() {
        let two = valid_triggered()
            .display_scope(DisplayScope::Single)
            .trigger_products(["a", "b"]);
        assert_eq!(
            errors_of(&two),
            vec![ValidationError::SingleScopeTriggerCount { found: 2 }]
        );

        let collection_only = RuleDraft::triggered("r")
            .display_scope(DisplayScope::Single)
            .trigger_collections(["phones"])
            .upsell_products(["case"]);
        assert_eq!(
            errors_of(&collection_only),
            vec![ValidationError::SingleScopeTriggerCount { found: 0 }]
        );

        let one = valid_triggered().display_scope(DisplayScope::Single);
        assert!(validate(&one, &[]).is_valid());
    }

    #[test]
    fn scoped_display_requires_triggered_kind() {
        let draft = RuleDraft::global("g")
            .display_scope(DisplayScope::PerProduct)
            .upsell_products(["cable"]);
        assert_eq!(
            errors_of(&draft),
            vec![ValidationError::ScopeRequiresTrigger {
                scope: DisplayScope::PerProduct
            }]
        );
    }

    #[test]
    fn enabled_rule_needs_upsells() {
        let draft = RuleDraft::global("g");
        assert_eq!(errors_of(&draft), vec![ValidationError::MissingUpsells]);

        let disabled = RuleDraft::global("g").enabled(false);
        assert!(validate(&disabled, &[]).is_valid());

        let collections = RuleDraft::global("g").upsell_collections(["accessories"]);
        assert!(validate(&collections, &[]).is_valid());
    }

    #[test]
    fn upsell_product_fields() {
        let draft = RuleDraft::global("g").upsell_products([
            ProductRef::new("", "No id"),
            ProductRef::new("sp-2", " "),
            ProductRef::new("sp-3", "Cable").with_price("-1"),
            ProductRef::new("sp-4", "Stand").with_price("abc"),
            ProductRef::new("sp-5", "Glass").with_price("19.99"),
            ProductRef::new("sp-6", "Free").with_price(""),
        ]);
        let errors = errors_of(&draft);
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingProductId {
                    list: ProductList::Upsell,
                    index: 0
                },
                ValidationError::MissingProductTitle {
                    list: ProductList::Upsell,
                    index: 1
                },
                ValidationError::InvalidPrice {
                    list: ProductList::Upsell,
                    index: 2,
                    value: "-1".into()
                },
                ValidationError::InvalidPrice {
                    list: ProductList::Upsell,
                    index: 3,
                    value: "abc".into()
                },
            ]
        );
    }

    #[test]
    fn nan_price_rejected() {
        assert!(!is_valid_price("NaN"));
        assert!(!is_valid_price("inf"));
        assert!(is_valid_price(" 12 "));
        assert!(is_valid_price("0"));
    }

    #[test]
    fn limit_range() {
        for limit in [0, 5, -3] {
            let draft = valid_triggered().limit(limit);
            assert_eq!(
                errors_of(&draft),
                vec![ValidationError::LimitOutOfRange {
                    limit,
                    min: 1,
                    max: 4
                }]
            );
        }
        let wide = ValidationPolicy::new().with_limit_range(1, 8);
        assert!(validate_with(&wide, &valid_triggered().limit(8), &[]).is_valid());
    }

    #[test]
    fn threshold_must_be_positive() {
        for value in [0.0, -10.0] {
            let draft = valid_triggered().cart_value_threshold(value);
            assert_eq!(
                errors_of(&draft),
                vec![ValidationError::InvalidThreshold { value }]
            );
        }
        let nan = valid_triggered().cart_value_threshold(f64::NAN);
        assert!(errors_of(&nan)
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidThreshold { .. })));
        assert!(validate(&valid_triggered().cart_value_threshold(1000.0), &[]).is_valid());
    }

    #[test]
    fn duplicates_reported_independently() {
        let draft = RuleDraft::triggered("r")
            .trigger_products(["a", "b", "a", "a"])
            .upsell_products(["x", "y", "x", "y"]);
        assert_eq!(
            errors_of(&draft),
            vec![
                ValidationError::DuplicateUpsellProducts {
                    ids: vec!["x".into(), "y".into()]
                },
                ValidationError::DuplicateTriggerProducts {
                    ids: vec!["a".into()]
                },
            ]
        );
    }

    #[test]
    fn trigger_upsell_overlap_names_titles() {
        let draft = RuleDraft::triggered("r")
            .trigger_products([
                ProductRef::new("iphone-15", "iPhone 15"),
                ProductRef::new("charger", ""),
            ])
            .upsell_products(["iphone-15", "charger", "case"]);
        // a malformed trigger list suppresses the overlap check
        assert_eq!(
            errors_of(&draft),
            vec![ValidationError::MissingProductTitle {
                list: ProductList::Trigger,
                index: 1
            }]
        );

        let draft = RuleDraft::triggered("r")
            .trigger_products([ProductRef::new("iphone-15", "iPhone 15")])
            .upsell_products(["iphone-15", "case"]);
        assert_eq!(
            errors_of(&draft),
            vec![ValidationError::TriggerUpsellOverlap {
                products: vec!["iPhone 15".into()]
            }]
        );
    }

    #[test]
    fn overlap_skipped_when_upsells_malformed() {
        let draft = RuleDraft::triggered("r")
            .trigger_products(["a"])
            .upsell_products([ProductRef::new("a", "")]);
        let errors = errors_of(&draft);
        assert_eq!(
            errors,
            vec![ValidationError::MissingProductTitle {
                list: ProductList::Upsell,
                index: 0
            }]
        );
    }

    #[test]
    fn second_single_scope_rule_rejected() {
        let existing = vec![valid_triggered()
            .display_scope(DisplayScope::Single)
            .build(&[])
            .unwrap()];
        let draft = RuleDraft::triggered("other")
            .display_scope(DisplayScope::Single)
            .trigger_products(["laptop"])
            .upsell_products(["mouse"]);
        let result = validate(&draft, &existing);
        assert_eq!(
            result.errors(),
            &[ValidationError::MultipleSingleScope {
                ids: vec!["new-rule".into(), "other".into()]
            }]
        );
        assert!(result.has_category(ErrorCategory::Cardinality));

        // editing the single-scope rule itself is fine
        let edit = valid_triggered().display_scope(DisplayScope::Single).limit(3);
        assert!(validate(&edit, &existing).is_valid());
    }

    #[test]
    fn conflicting_kind_rejected() {
        let existing = vec![RuleDraft::global("existing-1")
            .upsell_products(["product-1"])
            .build(&[])
            .unwrap()];
        let draft = RuleDraft::global_except("new-rule")
            .excluded_products(["product-5"])
            .upsell_products(["product-2"]);
        let result = validate(&draft, &existing);
        assert!(!result.is_valid());
        assert!(result.messages()[0].contains("not both"));
        assert!(result.has_category(ErrorCategory::Conflict));

        let disabled = draft.clone().enabled(false);
        assert!(validate(&disabled, &existing).is_valid());
    }

    #[test]
    fn violations_accumulate() {
        let draft = RuleDraft::triggered("")
            .trigger_products(["a", "a"])
            .limit(9);
        let result = validate(&draft, &[]);
        let categories: Vec<ErrorCategory> =
            result.errors().iter().map(ValidationError::category).collect();
        assert_eq!(
            categories,
            vec![
                ErrorCategory::Shape,
                ErrorCategory::Range,
                ErrorCategory::RequiredField,
                ErrorCategory::Duplicate,
            ]
        );
    }

    #[test]
    fn set_reports_cross_rule_and_per_rule_errors() {
        let rules = vec![
            RuleDraft::global("a").upsell_products(["cable"]),
            RuleDraft::global_except("a")
                .excluded_products(["gift-card"])
                .upsell_products(["gift-wrap"]),
            RuleDraft::triggered("b").upsell_products(["case"]),
        ];
        let result = validate_set(&rules);
        assert_eq!(
            result.errors(),
            &[
                ValidationError::DuplicateRuleIds {
                    ids: vec!["a".into()]
                },
                ValidationError::KindConflict {
                    kind: RuleKind::GlobalExcept,
                    existing: RuleKind::Global,
                    existing_id: "a".into(),
                },
                ValidationError::InRule {
                    index: 2,
                    error: Box::new(ValidationError::MissingTriggers),
                },
            ]
        );
        assert_eq!(
            result.messages()[2],
            "rule[2]: triggered rule requires at least one trigger product or collection"
        );
    }

    #[test]
    fn set_with_two_single_scopes() {
        let rules = vec![
            valid_triggered().display_scope(DisplayScope::Single),
            RuleDraft::triggered("second")
                .display_scope(DisplayScope::Single)
                .trigger_products(["laptop"])
                .upsell_products(["mouse"]),
        ];
        assert_eq!(
            validate_set(&rules).errors(),
            &[ValidationError::MultipleSingleScope {
                ids: vec!["new-rule".into(), "second".into()]
            }]
        );
    }

    #[test]
    fn valid_set() {
        let rules = vec![
            RuleDraft::global("rule-1").upsell_products(["cable", "adapter"]),
            valid_triggered(),
            RuleDraft::global_except("rule-3")
                .enabled(false)
                .excluded_products(["gift-card"])
                .upsell_products(["gift-wrap"]),
        ];
        assert!(validate_set(&rules).is_valid());
        assert!(validate_set(&[]).is_valid());
    }

    #[test]
    fn duplicates_helper_ignores_blank_ids() {
        assert_eq!(duplicates(["", "", "a"].into_iter()), Vec::<String>::new());
        assert_eq!(duplicates(["b", "a", "b", "a"].into_iter()), vec!["b", "a"]);
    }
}
