//! Outstanding bring grants for one actor.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use waystone_domain::{ActorId, AuthorizationWindowSecs, CallCooldownSecs};

use super::errors::TeleportError;

/// Whom this actor may bring without elevated privilege, and since when.
///
/// Each entry comes from an accepted call and is keyed by the call's
/// requester. At most one outstanding grant per requester: a repeated call
/// refreshes the timestamp rather than duplicating the entry. Grants are
/// single-use; the owner removes them with [`consume`](Self::consume) once
/// a bring is about to be performed. Expiry is evaluated lazily against
/// the authorization window at check time.
#[derive(Debug, Default)]
pub struct BringAuthorizations {
    grants: HashMap<ActorId, DateTime<Utc>>,
}

impl BringAuthorizations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh the grant for `requester`. Always succeeds.
    pub fn grant(&mut self, requester: ActorId, now: DateTime<Utc>) {
        self.grants.insert(requester, now);
    }

    /// True iff a grant for `requester` exists and has not expired.
    /// Does not consume.
    pub fn is_authorized(
        &self,
        requester: ActorId,
        now: DateTime<Utc>,
        window: AuthorizationWindowSecs,
    ) -> bool {
        match self.grants.get(&requester) {
            Some(granted_at) => now.signed_duration_since(*granted_at) <= window.as_duration(),
            None => false,
        }
    }

    /// Remove the grant for `requester`. A missing entry is a no-op.
    pub fn consume(&mut self, requester: ActorId) {
        self.grants.remove(&requester);
    }

    /// Fails with `RateLimited` while an existing grant for `requester` is
    /// younger than the cooldown. Used on the call path before re-granting.
    pub fn check_rate_limit(
        &self,
        requester: ActorId,
        now: DateTime<Utc>,
        cooldown: CallCooldownSecs,
    ) -> Result<(), TeleportError> {
        if cooldown.is_disabled() {
            return Ok(());
        }

        if let Some(granted_at) = self.grants.get(&requester) {
            let elapsed = now.signed_duration_since(*granted_at);
            if elapsed < cooldown.as_duration() {
                let retry_after_secs =
                    (cooldown.as_duration() - elapsed).num_seconds().max(1);
                return Err(TeleportError::RateLimited { retry_after_secs });
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).single().expect("valid timestamp")
    }

    fn window(secs: u64) -> AuthorizationWindowSecs {
        AuthorizationWindowSecs::new(secs).expect("valid window")
    }

    fn cooldown(secs: u64) -> CallCooldownSecs {
        CallCooldownSecs::new(secs).expect("valid cooldown")
    }

    #[test]
    fn grant_authorizes_within_window() {
        let mut auths = BringAuthorizations::new();
        let requester = ActorId::new();

        auths.grant(requester, at(0));

        assert!(auths.is_authorized(requester, at(0), window(300)));
        assert!(auths.is_authorized(requester, at(300), window(300)));
    }

    #[test]
    fn grant_expires_after_window() {
        let mut auths = BringAuthorizations::new();
        let requester = ActorId::new();

        auths.grant(requester, at(0));

        assert!(!auths.is_authorized(requester, at(301), window(300)));
    }

    #[test]
    fn unknown_requester_is_not_authorized() {
        let auths = BringAuthorizations::new();
        assert!(!auths.is_authorized(ActorId::new(), at(0), window(300)));
    }

    #[test]
    fn consume_is_single_use() {
        let mut auths = BringAuthorizations::new();
        let requester = ActorId::new();

        auths.grant(requester, at(0));
        auths.consume(requester);

        assert!(!auths.is_authorized(requester, at(1), window(300)));

        // A fresh grant re-authorizes
        auths.grant(requester, at(2));
        assert!(auths.is_authorized(requester, at(3), window(300)));
    }

    #[test]
    fn consume_of_missing_entry_is_a_no_op() {
        let mut auths = BringAuthorizations::new();
        auths.consume(ActorId::new());
        assert!(auths.is_empty());
    }

    #[test]
    fn regrant_refreshes_rather_than_duplicates() {
        let mut auths = BringAuthorizations::new();
        let requester = ActorId::new();

        auths.grant(requester, at(0));
        auths.grant(requester, at(100));

        assert_eq!(auths.len(), 1);
        // Refreshed timestamp keeps the grant alive past the original expiry
        assert!(auths.is_authorized(requester, at(350), window(300)));
    }

    #[test]
    fn rate_limit_rejects_young_entries() {
        let mut auths = BringAuthorizations::new();
        let requester = ActorId::new();

        auths.grant(requester, at(0));

        let result = auths.check_rate_limit(requester, at(10), cooldown(30));
        match result {
            Err(TeleportError::RateLimited { retry_after_secs }) => {
                assert_eq!(retry_after_secs, 20);
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn rate_limit_passes_after_cooldown() {
        let mut auths = BringAuthorizations::new();
        let requester = ActorId::new();

        auths.grant(requester, at(0));

        assert!(auths.check_rate_limit(requester, at(30), cooldown(30)).is_ok());
    }

    #[test]
    fn zero_cooldown_never_rate_limits() {
        let mut auths = BringAuthorizations::new();
        let requester = ActorId::new();

        auths.grant(requester, at(0));

        assert!(auths.check_rate_limit(requester, at(0), cooldown(0)).is_ok());
    }
}
