use std::fmt;
use std::time::Duration;

use super::rule::RuleKind;

/// Detailed evaluation report returned by
/// [`evaluate_detailed()`](crate::evaluate_detailed).
///
/// Contains the matched rule, the tier it came from, which rules were
/// consulted, and the wall-clock duration of the evaluation.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    matched: Option<String>,
    tier: Option<RuleKind>,
    consulted: Vec<String>,
    skipped_disabled: usize,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(
        matched: Option<(String, RuleKind)>,
        consulted: Vec<String>,
        skipped_disabled: usize,
        duration: Duration,
    ) -> Self {
        let (matched, tier) = match matched {
            Some((id, kind)) => (Some(id), Some(kind)),
            None => (None, None),
        };
        Self {
            matched,
            tier,
            consulted,
            skipped_disabled,
            duration,
        }
    }

    /// Id of the matched rule, same rule as [`evaluate()`](crate::evaluate) returns.
    #[must_use]
    pub fn matched(&self) -> Option<&str> {
        self.matched.as_deref()
    }

    /// The priority tier that produced the match.
    #[must_use]
    pub fn tier(&self) -> Option<RuleKind> {
        self.tier
    }

    /// Ids of enabled rules whose predicates were checked, in the order they
    /// were checked. The last entry is the match, if any.
    #[must_use]
    pub fn consulted(&self) -> &[String] {
        &self.consulted
    }

    /// Number of disabled rules ignored.
    #[must_use]
    pub fn skipped_disabled(&self) -> usize {
        self.skipped_disabled
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.matched, self.tier) {
            (Some(id), Some(tier)) => write!(f, "matched: {id} ({tier})")?,
            _ => write!(f, "matched: none")?,
        }
        write!(f, ", consulted: [{}]", self.consulted.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
