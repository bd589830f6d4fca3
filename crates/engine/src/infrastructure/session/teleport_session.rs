//! Per-actor teleport session state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use waystone_domain::{
    ActorId, AuthorizationWindowSecs, CallCooldownSecs, HistoryCapacity, Position,
};

use super::authorizations::BringAuthorizations;
use super::errors::TeleportError;
use super::history::LocationHistory;

/// One actor's teleport state: prior-position history, outstanding bring
/// grants, outgoing call timers, and the one-shot ignore latch.
///
/// The latch suppresses exactly one upcoming history record: it is set
/// right before a self-initiated relocation (a "return") so the host's
/// follow-up relocation event is not re-recorded as new history.
#[derive(Debug)]
pub struct TeleportSession {
    history: LocationHistory,
    authorizations: BringAuthorizations,
    ignore_location: Option<Position>,
    /// Last outgoing call per target, for requester-side rate limiting
    outgoing_calls: HashMap<ActorId, DateTime<Utc>>,
}

impl TeleportSession {
    pub fn new(history_capacity: HistoryCapacity) -> Self {
        Self {
            history: LocationHistory::new(history_capacity),
            authorizations: BringAuthorizations::new(),
            ignore_location: None,
            outgoing_calls: HashMap::new(),
        }
    }

    // =========================================================================
    // Location history
    // =========================================================================

    /// Record an observed position, unless the ignore latch matches it.
    ///
    /// A matching latch is consumed: it suppresses this one record and is
    /// cleared, so an identical follow-up position IS recorded.
    pub fn remember_location(&mut self, position: Position) {
        if self.ignore_location.as_ref() == Some(&position) {
            self.ignore_location = None;
            return;
        }
        self.history.push(position);
    }

    pub fn set_ignore_location(&mut self, position: Option<Position>) {
        self.ignore_location = position;
    }

    pub fn ignore_location(&self) -> Option<&Position> {
        self.ignore_location.as_ref()
    }

    /// Remove and return the most recently recorded position.
    pub fn pop_last_location(&mut self) -> Option<Position> {
        self.history.pop()
    }

    /// Re-insert a position popped for a relocation that then failed.
    pub fn restore_location(&mut self, position: Position) {
        self.history.push(position);
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // =========================================================================
    // Bring authorization
    // =========================================================================

    /// Record that this actor may bring `requester`, who just called.
    pub fn add_bringable(&mut self, requester: ActorId, now: DateTime<Utc>) {
        self.authorizations.grant(requester, now);
    }

    /// Whether this actor currently holds an unexpired grant to bring
    /// `requester`.
    pub fn is_bringable(
        &self,
        requester: ActorId,
        now: DateTime<Utc>,
        window: AuthorizationWindowSecs,
    ) -> bool {
        self.authorizations.is_authorized(requester, now, window)
    }

    /// Spend `requester`'s grant. No-op when absent.
    ///
    /// Callers make check-and-consume atomic by holding this session's lock
    /// across [`is_bringable`](Self::is_bringable) and this call.
    pub fn consume_bringable(&mut self, requester: ActorId) {
        self.authorizations.consume(requester);
    }

    /// Target-side call rate limit: rejects while this actor already holds
    /// a grant for `requester` younger than the cooldown.
    pub fn authorization_rate_limit(
        &self,
        requester: ActorId,
        now: DateTime<Utc>,
        cooldown: CallCooldownSecs,
    ) -> Result<(), TeleportError> {
        self.authorizations.check_rate_limit(requester, now, cooldown)
    }

    // =========================================================================
    // Outgoing call timers
    // =========================================================================

    /// Requester-side call rate limit.
    ///
    /// Fails with `RateLimited` while an unexpired timer for `target`
    /// exists; otherwise records a fresh timer. The timer is only written
    /// on success, so a rejected call leaves the prior timestamp intact.
    pub fn check_last_teleport_request(
        &mut self,
        target: ActorId,
        now: DateTime<Utc>,
        cooldown: CallCooldownSecs,
    ) -> Result<(), TeleportError> {
        if !cooldown.is_disabled() {
            if let Some(last) = self.outgoing_calls.get(&target) {
                let elapsed = now.signed_duration_since(*last);
                if elapsed < cooldown.as_duration() {
                    let retry_after_secs =
                        (cooldown.as_duration() - elapsed).num_seconds().max(1);
                    return Err(TeleportError::RateLimited { retry_after_secs });
                }
            }
        }

        self.outgoing_calls.insert(target, now);
        Ok(())
    }
}
