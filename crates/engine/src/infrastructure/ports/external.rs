//! Host collaborator port traits (world movement, permissions).

use async_trait::async_trait;
use waystone_domain::{ActorId, Capability, Position, WorldId};

/// The host's world-movement primitive.
///
/// Relocation is assumed atomic: it either fully succeeds or fails with no
/// partial state change. On failure the engine leaves its own session state
/// untouched as well.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelocationPort: Send + Sync {
    async fn relocate(&self, actor: ActorId, destination: Position) -> anyhow::Result<()>;
}

/// Permission oracle consulted before privileged relocations.
///
/// `world` scopes the check to a destination world when one is known.
#[cfg_attr(test, mockall::automock)]
pub trait PermissionPort: Send + Sync {
    fn has_capability(
        &self,
        actor: ActorId,
        capability: Capability,
        world: Option<WorldId>,
    ) -> bool;
}
