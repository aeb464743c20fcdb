use crate::{EnableCheck, Rule, RuleKind, ValidationError};

/// Check whether a rule of `kind` may be enabled alongside `existing`.
///
/// `GLOBAL` and `GLOBAL_EXCEPT` are mutually exclusive among enabled rules;
/// `TRIGGERED` rules can always be enabled.
pub fn can_enable(kind: RuleKind, existing: &[Rule]) -> EnableCheck {
    match conflicting_rule(kind, existing, None) {
        Some(rule) => EnableCheck::denied(kind_conflict(kind, rule).to_string()),
        None => EnableCheck::allowed(),
    }
}

/// The first enabled rule whose kind excludes `kind`, ignoring the rule with
/// id `skip_id` (the rule being edited).
pub(crate) fn conflicting_rule<'r>(
    kind: RuleKind,
    existing: &'r [Rule],
    skip_id: Option<&str>,
) -> Option<&'r Rule> {
    let opposing = kind.exclusive_with()?;
    existing
        .iter()
        .filter(|rule| skip_id != Some(rule.id()))
        .find(|rule| rule.enabled() && rule.kind() == opposing)
}

pub(crate) fn kind_conflict(kind: RuleKind, existing: &Rule) -> ValidationError {
    ValidationError::KindConflict {
        kind,
        existing: existing.kind(),
        existing_id: existing.id().to_owned(),
    }
}
