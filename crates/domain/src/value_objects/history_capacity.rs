//! Maximum retained positions per actor
//!
//! A newtype representing how many prior positions a location history
//! keeps before evicting the oldest entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location history capacity (validated newtype)
///
/// A cap keeps a long-lived actor from growing memory without limit.
/// Pushing past the cap evicts the oldest entry first.
///
/// # Validation Rules
///
/// - Value must be >= 1 (a zero-capacity history could never serve a return)
/// - Value must be <= 1024
///
/// # Examples
///
/// ```
/// use waystone_domain::value_objects::HistoryCapacity;
///
/// let cap = HistoryCapacity::new(3).unwrap();
/// assert_eq!(cap.value(), 3);
///
/// assert!(HistoryCapacity::new(0).is_err());
/// assert!(HistoryCapacity::new(2048).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    /// Minimum valid value: 1 position
    pub const MIN: usize = 1;

    /// Maximum valid value: 1024 positions
    pub const MAX: usize = 1024;

    /// Default value: 10 positions
    pub const DEFAULT: usize = 10;

    /// Create a new `HistoryCapacity` value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the value is outside `1..=1024`.
    pub fn new(positions: usize) -> Result<Self, crate::DomainError> {
        if positions < Self::MIN {
            return Err(crate::DomainError::validation(format!(
                "History capacity must be >= {} position, got {}",
                Self::MIN,
                positions
            )));
        }

        if positions > Self::MAX {
            return Err(crate::DomainError::validation(format!(
                "History capacity must be <= {} positions, got {}",
                Self::MAX,
                positions
            )));
        }

        Ok(Self(positions))
    }

    /// Create a new `HistoryCapacity`, clamping to the valid range.
    pub fn clamped(positions: usize) -> Self {
        Self(positions.clamp(Self::MIN, Self::MAX))
    }

    /// Returns the underlying `usize` value.
    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for HistoryCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} positions", self.0)
    }
}

impl From<HistoryCapacity> for usize {
    fn from(capacity: HistoryCapacity) -> Self {
        capacity.0
    }
}

impl TryFrom<usize> for HistoryCapacity {
    type Error = crate::DomainError;

    fn try_from(positions: usize) -> Result<Self, Self::Error> {
        Self::new(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_valid_values() {
        let cap = HistoryCapacity::new(10).unwrap();
        assert_eq!(cap.value(), 10);
    }

    #[test]
    fn new_rejects_zero() {
        assert!(HistoryCapacity::new(0).is_err());
    }

    #[test]
    fn new_rejects_too_large() {
        assert!(HistoryCapacity::new(1025).is_err());
    }

    #[test]
    fn clamped_brings_values_into_range() {
        assert_eq!(HistoryCapacity::clamped(0).value(), 1);
        assert_eq!(HistoryCapacity::clamped(5000).value(), 1024);
        assert_eq!(HistoryCapacity::clamped(16).value(), 16);
    }

    #[test]
    fn default_is_10_positions() {
        assert_eq!(HistoryCapacity::default().value(), 10);
    }

    #[test]
    fn serde_rejects_invalid_values() {
        let result: Result<HistoryCapacity, _> = serde_json::from_str("0");
        assert!(result.is_err());

        let cap: HistoryCapacity = serde_json::from_str("25").expect("valid capacity");
        assert_eq!(cap.value(), 25);
    }
}
