//! Use case services.

mod teleport_service;

pub use teleport_service::{RelocationKind, TeleportService};
