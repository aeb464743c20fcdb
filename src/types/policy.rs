pub const DEFAULT_MIN_LIMIT: u32 = 1;
pub const DEFAULT_MAX_LIMIT: u32 = 4;

/// Tunable bounds applied by the validator.
///
/// Defaults to a display limit of `1..=4` products. Under the `serde` feature
/// the policy can be loaded from configuration; missing fields take their
/// defaults.
///
/// The effective range never starts below 1 and never ends below its start;
/// see [`limit_range()`](Self::limit_range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ValidationPolicy {
    pub min_limit: u32,
    pub max_limit: u32,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_limit: DEFAULT_MIN_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl ValidationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accepted limit range. `min` is raised to 1 and `max` to `min`
    /// when they fall below.
    #[must_use]
    pub fn with_limit_range(mut self, min: u32, max: u32) -> Self {
        let min = min.max(1);
        self.min_limit = min;
        self.max_limit = max.max(min);
        self
    }

    /// The normalized `(min, max)` limit bounds, also for policies whose public
    /// fields were set directly or loaded from configuration.
    #[must_use]
    pub fn limit_range(&self) -> (u32, u32) {
        let min = self.min_limit.max(1);
        (min, self.max_limit.max(min))
    }

    #[must_use]
    pub fn allows_limit(&self, limit: i64) -> bool {
        let (min, max) = self.limit_range();
        limit >= i64::from(min) && limit <= i64::from(max)
    }
}
