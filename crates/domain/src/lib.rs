pub mod error;
pub mod ids;
pub mod value_objects;

pub use error::DomainError;

// Re-export ID types
pub use ids::{ActorId, WorldId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    AuthorizationWindowSecs, CallCooldownSecs, Capability, HistoryCapacity, Position,
};
