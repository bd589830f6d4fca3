//! The relocation protocol.
//!
//! Validates, rate-limits, and consumes relocation requests against the
//! per-actor sessions: direct teleports, call/bring handshakes, placement
//! ("put"), and returns to a prior location. Target and destination
//! resolution happen host-side; every operation here receives already
//! resolved identities and positions.
//!
//! History recording stays on a single path: the host reports every
//! position change through [`TeleportService::relocation_observed`], and
//! the protocol never pushes history directly. A "return" latches its
//! destination on the session beforehand so its own relocation event is
//! not re-recorded.

use std::sync::Arc;

use waystone_domain::{ActorId, Capability, Position};

use crate::infrastructure::ports::{ClockPort, PermissionPort, RelocationPort};
use crate::infrastructure::session::{SessionRegistry, TeleportError};
use crate::infrastructure::settings::TeleportSettings;

/// The relocation operations the protocol performs.
///
/// Post-processing differences between operations are data on this enum
/// rather than per-call-site variants: whether the move may enter history,
/// and whether the destination keeps the moved actor's look angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationKind {
    Teleport,
    Bring,
    Put,
    Return,
}

impl RelocationKind {
    /// Whether the host's follow-up relocation event should land in
    /// history. A return latches its destination on the session instead,
    /// so the undo itself is not recorded as something to undo.
    pub fn captures_prior_position(self) -> bool {
        !matches!(self, Self::Return)
    }

    /// Whether the destination keeps the moved actor's current look angles.
    pub fn keeps_target_orientation(self) -> bool {
        matches!(self, Self::Put)
    }

    /// Destination adjusted per this kind's orientation rule.
    pub fn prepare_destination(
        self,
        destination: Position,
        target_position: &Position,
    ) -> Position {
        if self.keeps_target_orientation() {
            destination.with_orientation_of(target_position)
        } else {
            destination
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Teleport => "teleport",
            Self::Bring => "bring",
            Self::Put => "put",
            Self::Return => "return",
        }
    }
}

/// Orchestrates relocation requests over sessions and host ports.
///
/// Generic over the clock, permission oracle, and relocation primitive so
/// tests can inject all three.
pub struct TeleportService<C: ClockPort, P: PermissionPort, R: RelocationPort> {
    registry: Arc<SessionRegistry>,
    clock: Arc<C>,
    permissions: Arc<P>,
    relocator: Arc<R>,
    settings: TeleportSettings,
}

impl<C: ClockPort, P: PermissionPort, R: RelocationPort> TeleportService<C, P, R> {
    pub fn new(
        registry: Arc<SessionRegistry>,
        clock: Arc<C>,
        permissions: Arc<P>,
        relocator: Arc<R>,
        settings: TeleportSettings,
    ) -> Self {
        Self {
            registry,
            clock,
            permissions,
            relocator,
            settings,
        }
    }

    /// Direct teleport of `target` to `destination`, requested by `actor`.
    ///
    /// Moving anyone but oneself requires the elevated capability in the
    /// destination world.
    pub async fn teleport(
        &self,
        actor: ActorId,
        target: ActorId,
        destination: Position,
    ) -> Result<(), TeleportError> {
        let kind = RelocationKind::Teleport;
        let capability = if actor == target {
            Capability::Teleport
        } else {
            Capability::TeleportOther
        };
        if !self
            .permissions
            .has_capability(actor, capability, Some(destination.world()))
        {
            return Err(TeleportError::NotAuthorized);
        }

        self.relocator.relocate(target, destination).await?;
        tracing::info!(%actor, %target, op = kind.as_str(), "relocated actor");
        Ok(())
    }

    /// Ask `target` for a teleport: on success `target` may bring
    /// `requester` once within the authorization window.
    ///
    /// Rate-limited on both ends: against the age of an existing grant on
    /// the target, and against the requester's own outgoing-call timer for
    /// this target. Both checks run before any mutation, so a rejected
    /// call leaves every timestamp unchanged.
    pub async fn call(&self, requester: ActorId, target: ActorId) -> Result<(), TeleportError> {
        if !self
            .permissions
            .has_capability(requester, Capability::Call, None)
        {
            return Err(TeleportError::NotAuthorized);
        }

        let now = self.clock.now();
        let cooldown = self.settings.call_cooldown;

        if requester == target {
            let session = self.registry.session(requester);
            let mut session = session.lock().await;
            session.authorization_rate_limit(requester, now, cooldown)?;
            session.check_last_teleport_request(target, now, cooldown)?;
            session.add_bringable(requester, now);
            return Ok(());
        }

        let requester_session = self.registry.session(requester);
        let target_session = self.registry.session(target);

        // Two sessions: always lock in ascending actor-id order.
        let (mut requester_session, mut target_session) = if requester < target {
            let r = requester_session.lock().await;
            let t = target_session.lock().await;
            (r, t)
        } else {
            let t = target_session.lock().await;
            let r = requester_session.lock().await;
            (r, t)
        };

        target_session.authorization_rate_limit(requester, now, cooldown)?;
        requester_session.check_last_teleport_request(target, now, cooldown)?;
        target_session.add_bringable(requester, now);

        tracing::info!(%requester, %target, "teleport request recorded");
        Ok(())
    }

    /// Bring `target` to `actor`'s position.
    ///
    /// Allowed either by elevated capability (no consent needed) or by an
    /// unexpired grant on `actor`'s own session from `target`'s earlier
    /// call, which this spends. The grant check and its consumption happen
    /// under one session lock, so two racing brings cannot both use the
    /// same grant, and a failed relocation consumes nothing.
    pub async fn bring(
        &self,
        actor: ActorId,
        target: ActorId,
        actor_position: Position,
    ) -> Result<(), TeleportError> {
        let kind = RelocationKind::Bring;

        if self.permissions.has_capability(
            actor,
            Capability::TeleportOther,
            Some(actor_position.world()),
        ) {
            self.relocator.relocate(target, actor_position).await?;
            tracing::info!(%actor, %target, op = kind.as_str(), "privileged bring");
            return Ok(());
        }

        let now = self.clock.now();
        let session = self.registry.session(actor);
        let mut session = session.lock().await;

        // The grant was recorded on this actor's session when `target`
        // called; `target` is the requester the table is keyed by.
        if !session.is_bringable(target, now, self.settings.bring_authorization_window) {
            return Err(TeleportError::NotAuthorized);
        }

        self.relocator.relocate(target, actor_position).await?;
        session.consume_bringable(target);

        tracing::info!(%actor, %target, op = kind.as_str(), "teleport request accepted");
        Ok(())
    }

    /// Place `target` at `destination`, keeping the target's own look
    /// angles. Always requires the elevated capability.
    pub async fn put(
        &self,
        actor: ActorId,
        target: ActorId,
        destination: Position,
        target_position: Position,
    ) -> Result<(), TeleportError> {
        let kind = RelocationKind::Put;
        if !self.permissions.has_capability(
            actor,
            Capability::TeleportOther,
            Some(destination.world()),
        ) {
            return Err(TeleportError::NotAuthorized);
        }

        let destination = kind.prepare_destination(destination, &target_position);
        self.relocator.relocate(target, destination).await?;
        tracing::info!(%actor, %target, op = kind.as_str(), "placed actor");
        Ok(())
    }

    /// Return `target` to their most recently recorded position.
    ///
    /// Pops the history entry, latches it as ignored, then relocates. If
    /// the host relocation fails the pop and the latch are rolled back,
    /// leaving no observable change.
    pub async fn ret(&self, requester: ActorId, target: ActorId) -> Result<(), TeleportError> {
        let kind = RelocationKind::Return;
        let capability = if requester == target {
            Capability::Return
        } else {
            Capability::ReturnOther
        };
        if !self.permissions.has_capability(requester, capability, None) {
            return Err(TeleportError::NotAuthorized);
        }

        let session = self.registry.session(target);
        let mut session = session.lock().await;

        let prior = session
            .pop_last_location()
            .ok_or(TeleportError::NoPriorLocation)?;

        if !kind.captures_prior_position() {
            session.set_ignore_location(Some(prior));
        }

        match self.relocator.relocate(target, prior).await {
            Ok(()) => {
                tracing::info!(%requester, %target, op = kind.as_str(), "returned actor");
                Ok(())
            }
            Err(e) => {
                session.set_ignore_location(None);
                session.restore_location(prior);
                Err(TeleportError::TargetUnresolvable(e))
            }
        }
    }

    /// Host notification: `actor` moved from `from` to `to`.
    ///
    /// The position being left is what history retains. A session latch
    /// matching the destination marks a self-initiated return; it is
    /// consumed and nothing is recorded.
    pub async fn relocation_observed(&self, actor: ActorId, from: Position, to: Position) {
        let session = self.registry.session(actor);
        let mut session = session.lock().await;

        if session.ignore_location() == Some(&to) {
            session.set_ignore_location(None);
            tracing::debug!(%actor, "suppressed record of self-initiated relocation");
            return;
        }
        session.remember_location(from);
    }

    /// Host notification: `actor` respawned; the death position enters
    /// history so it can be returned to.
    pub async fn respawn_observed(&self, actor: ActorId, death_position: Position) {
        let session = self.registry.session(actor);
        session.lock().await.remember_location(death_position);
    }
}
