use std::fmt;

/// Answer from [`can_enable()`](crate::can_enable): whether a rule kind may be
/// enabled next to the current rules, and why not when it may not.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct EnableCheck {
    can_enable: bool,
    reason: Option<String>,
}

impl fmt::Display for EnableCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "cannot enable: {reason}"),
            None => f.write_str("can enable"),
        }
    }
}

impl EnableCheck {
    pub fn allowed() -> Self {
        Self {
            can_enable: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            can_enable: false,
            reason: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn can_enable(&self) -> bool {
        self.can_enable
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
