//! Capabilities consulted before privileged relocations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// A privilege the permission oracle can answer for.
///
/// The core never stores who holds what; it only names the capability it
/// needs and lets the host decide, optionally scoped to a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Teleport oneself to an arbitrary destination
    Teleport,
    /// Relocate other actors without their consent
    TeleportOther,
    /// Ask another actor for a teleport ("call")
    Call,
    /// Return to one's own prior location
    Return,
    /// Return another actor to their prior location
    ReturnOther,
}

impl Capability {
    /// Stable node string for host-side permission lookup.
    pub fn node(&self) -> &'static str {
        match self {
            Self::Teleport => "waystone.teleport",
            Self::TeleportOther => "waystone.teleport.other",
            Self::Call => "waystone.call",
            Self::Return => "waystone.return",
            Self::ReturnOther => "waystone.return.other",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node())
    }
}

impl FromStr for Capability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "waystone.teleport" => Ok(Self::Teleport),
            "waystone.teleport.other" => Ok(Self::TeleportOther),
            "waystone.call" => Ok(Self::Call),
            "waystone.return" => Ok(Self::Return),
            "waystone.return.other" => Ok(Self::ReturnOther),
            other => Err(DomainError::parse(format!("Unknown capability: {}", other))),
        }
    }
}
