//! Subsystem settings.
//!
//! Settings are plain values carried by the service; loading from the
//! environment is a convenience for hosts that configure via `.env`.
//! Out-of-range values are clamped rather than rejected, so a bad
//! deployment variable degrades to a sane bound instead of a crash.

use serde::{Deserialize, Serialize};

use waystone_domain::{AuthorizationWindowSecs, CallCooldownSecs, HistoryCapacity};

/// Recognized options for the teleport subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TeleportSettings {
    /// Expiry for call grants
    pub bring_authorization_window: AuthorizationWindowSecs,
    /// Minimum time between repeated calls to the same target
    pub call_cooldown: CallCooldownSecs,
    /// Max retained positions per actor
    pub history_capacity: HistoryCapacity,
}

impl TeleportSettings {
    /// Load settings from the environment, falling back to defaults.
    ///
    /// Recognized variables: `WAYSTONE_AUTH_WINDOW_SECS`,
    /// `WAYSTONE_CALL_COOLDOWN_SECS`, `WAYSTONE_HISTORY_CAPACITY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            bring_authorization_window: env_u64("WAYSTONE_AUTH_WINDOW_SECS")
                .map(AuthorizationWindowSecs::clamped)
                .unwrap_or_default(),
            call_cooldown: env_u64("WAYSTONE_CALL_COOLDOWN_SECS")
                .map(CallCooldownSecs::clamped)
                .unwrap_or_default(),
            history_capacity: env_u64("WAYSTONE_HISTORY_CAPACITY")
                .map(|v| HistoryCapacity::clamped(v as usize))
                .unwrap_or_default(),
        }
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(%name, %raw, "ignoring unparseable setting");
            None
        }
    }
}
