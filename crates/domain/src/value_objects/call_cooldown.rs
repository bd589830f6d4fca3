//! Minimum time between repeated calls to the same target, in seconds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Call cooldown (validated newtype). Zero disables rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CallCooldownSecs(u64);

impl CallCooldownSecs {
    /// Maximum valid value: 3600 seconds (1 hour)
    pub const MAX: u64 = 3_600;

    /// Default value: 30 seconds
    pub const DEFAULT: u64 = 30;

    pub fn new(seconds: u64) -> Result<Self, crate::DomainError> {
        if seconds > Self::MAX {
            return Err(crate::DomainError::validation(format!(
                "Call cooldown must be <= {} seconds (1 hour), got {}",
                Self::MAX,
                seconds
            )));
        }

        Ok(Self(seconds))
    }

    /// Create a new cooldown, clamping to the valid range.
    pub fn clamped(seconds: u64) -> Self {
        Self(seconds.min(Self::MAX))
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Whether rate limiting is disabled entirely.
    pub fn is_disabled(self) -> bool {
        self.0 == 0
    }

    pub fn as_duration(self) -> chrono::Duration {
        chrono::Duration::seconds(self.0 as i64)
    }
}

impl Default for CallCooldownSecs {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for CallCooldownSecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<CallCooldownSecs> for u64 {
    fn from(cooldown: CallCooldownSecs) -> Self {
        cooldown.0
    }
}

impl TryFrom<u64> for CallCooldownSecs {
    type Error = crate::DomainError;

    fn try_from(seconds: u64) -> Result<Self, Self::Error> {
        Self::new(seconds)
    }
}
