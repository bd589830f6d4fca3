//! Value objects - Immutable objects defined by their attributes

mod auth_window;
mod call_cooldown;
mod capability;
mod history_capacity;
mod position;

pub use auth_window::AuthorizationWindowSecs;
pub use call_cooldown::CallCooldownSecs;
pub use capability::Capability;
pub use history_capacity::HistoryCapacity;
pub use position::Position;
