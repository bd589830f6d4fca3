//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - The host's relocation primitive (could be any world-movement backend)
//! - Permission lookup (never mutated by the core)
//! - Clock (for testing)

mod external;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{PermissionPort, RelocationPort};

#[cfg(test)]
pub use external::{MockPermissionPort, MockRelocationPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

#[cfg(test)]
pub use testing::MockClockPort;
