//! Relocation error types.

use thiserror::Error;

/// Error types for relocation requests.
///
/// Every variant aborts the requested transition with zero side effects;
/// none is fatal to the process, and no request is retried automatically.
#[derive(Debug, Error)]
pub enum TeleportError {
    #[error("Not authorized to perform this relocation")]
    NotAuthorized,

    #[error("Wait {retry_after_secs}s before asking again")]
    RateLimited { retry_after_secs: i64 },

    #[error("There's no past location in the history")]
    NoPriorLocation,

    #[error("Target could not be resolved: {0}")]
    TargetUnresolvable(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_message_includes_wait_time() {
        let err = TeleportError::RateLimited {
            retry_after_secs: 12,
        };
        assert_eq!(err.to_string(), "Wait 12s before asking again");
    }

    #[test]
    fn opaque_collaborator_failures_convert() {
        let err: TeleportError = anyhow::anyhow!("no such actor").into();
        assert!(matches!(err, TeleportError::TargetUnresolvable(_)));
        assert!(err.to_string().contains("no such actor"));
    }
}
