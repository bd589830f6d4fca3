//! Waystone Engine library.
//!
//! The reciprocal teleport-authorization and location-history subsystem:
//! per-actor sessions tracking pending bring grants and a bounded position
//! history, plus the protocol that validates, rate-limits, and consumes
//! relocation requests.
//!
//! ## Structure
//!
//! - `application/` - The relocation protocol service
//! - `infrastructure/` - Ports, clock implementations, sessions, settings

pub mod application;
pub mod infrastructure;

pub use application::services::{RelocationKind, TeleportService};
pub use infrastructure::clock::SystemClock;
pub use infrastructure::ports::{ClockPort, PermissionPort, RelocationPort};
pub use infrastructure::session::{
    SessionRegistry, SharedSession, TeleportError, TeleportSession,
};
pub use infrastructure::settings::TeleportSettings;
