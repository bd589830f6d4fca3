//! Expiry window for bring authorizations, in seconds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How long a call grant stays usable (validated newtype).
///
/// A grant that is never claimed must not stay live forever; the window
/// bounds it. Expiry is evaluated lazily at check time, never by a
/// background sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct AuthorizationWindowSecs(u64);

impl AuthorizationWindowSecs {
    /// Minimum valid value: 1 second
    pub const MIN: u64 = 1;

    /// Maximum valid value: 86400 seconds (1 day)
    pub const MAX: u64 = 86_400;

    /// Default value: 300 seconds (5 minutes)
    pub const DEFAULT: u64 = 300;

    pub fn new(seconds: u64) -> Result<Self, crate::DomainError> {
        if seconds < Self::MIN {
            return Err(crate::DomainError::validation(format!(
                "Authorization window must be >= {} second, got {}",
                Self::MIN,
                seconds
            )));
        }

        if seconds > Self::MAX {
            return Err(crate::DomainError::validation(format!(
                "Authorization window must be <= {} seconds (1 day), got {}",
                Self::MAX,
                seconds
            )));
        }

        Ok(Self(seconds))
    }

    /// Create a new window, clamping to the valid range.
    pub fn clamped(seconds: u64) -> Self {
        Self(seconds.clamp(Self::MIN, Self::MAX))
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> chrono::Duration {
        chrono::Duration::seconds(self.0 as i64)
    }
}

impl Default for AuthorizationWindowSecs {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for AuthorizationWindowSecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<AuthorizationWindowSecs> for u64 {
    fn from(window: AuthorizationWindowSecs) -> Self {
        window.0
    }
}

impl TryFrom<u64> for AuthorizationWindowSecs {
    type Error = crate::DomainError;

    fn try_from(seconds: u64) -> Result<Self, Self::Error> {
        Self::new(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_range() {
        assert!(AuthorizationWindowSecs::new(0).is_err());
        assert!(AuthorizationWindowSecs::new(86_401).is_err());
        assert_eq!(AuthorizationWindowSecs::new(120).unwrap().value(), 120);
    }

    #[test]
    fn default_is_five_minutes() {
        assert_eq!(AuthorizationWindowSecs::default().value(), 300);
    }

    #[test]
    fn as_duration_matches_value() {
        let window = AuthorizationWindowSecs::new(90).unwrap();
        assert_eq!(window.as_duration(), chrono::Duration::seconds(90));
    }
}
