//! Error taxonomy for the reconciliation core.
//!
//! Three levels of failure exist, and they propagate differently:
//!
//! - Row-level problems during normalization are NOT errors. They drop the
//!   offending row and the pass continues (see `normalize::RejectReason`).
//! - Fetch-level and mutation-level failures abort the whole pass and reach
//!   the caller as a [`SyncError`]. No partial analysis or partial apply is
//!   ever produced.
//! - Timeouts are a distinct [`RemoteError`] variant so callers can apply a
//!   retry policy; the core itself never retries.

/// A workday string failed validation before shift-range resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid workday '{raw}': {reason}")]
pub struct InvalidDate {
    /// The rejected input, verbatim.
    pub raw: String,
    /// What rule the input broke.
    pub reason: &'static str,
}

impl InvalidDate {
    pub(crate) fn new(raw: &str, reason: &'static str) -> Self {
        Self {
            raw: raw.to_string(),
            reason,
        }
    }
}

/// Transport-level failure from a remote collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The call exceeded its configured deadline.
    #[error("remote call timed out after {timeout_secs}s")]
    Timeout {
        /// The deadline that was exceeded, in seconds.
        timeout_secs: u64,
    },

    /// The remote answered with a non-success HTTP status.
    #[error("remote returned status {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        body: String,
    },

    /// Connection or protocol failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Caller-facing failures of an analysis or apply pass.
///
/// Each variant names the collaborator that failed, so a caller can report
/// "the ERP is down" separately from "the event store rejected the batch".
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Malformed date or shift input.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    /// ERP schedule fetch failed. No partial analysis is produced.
    #[error("schedule fetch failed: {0}")]
    Fetch(#[source] RemoteError),

    /// Device directory fetch failed.
    #[error("device directory fetch failed: {0}")]
    Devices(#[source] RemoteError),

    /// Local assignment snapshot could not be read.
    #[error("assignment listing failed: {0}")]
    Assignments(#[source] RemoteError),

    /// The combined mutation call failed. The entire selected batch is
    /// unapplied; there is no partial commit and no rollback to perform.
    #[error("batch mutation failed: {0}")]
    Mutation(#[source] RemoteError),
}

impl SyncError {
    /// True when the underlying failure was a transport timeout.
    ///
    /// Callers may treat timeouts as retryable; the core does not retry.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Fetch(RemoteError::Timeout { .. })
                | Self::Devices(RemoteError::Timeout { .. })
                | Self::Assignments(RemoteError::Timeout { .. })
                | Self::Mutation(RemoteError::Timeout { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidDate, RemoteError, SyncError};

    #[test]
    fn invalid_date_displays_raw_and_reason() {
        let err = InvalidDate::new("2026-13-01", "month out of range");
        assert_eq!(
            err.to_string(),
            "invalid workday '2026-13-01': month out of range"
        );
    }

    #[test]
    fn timeout_is_detected_through_every_variant() {
        let timeout = || RemoteError::Timeout { timeout_secs: 8 };
        assert!(SyncError::Fetch(timeout()).is_timeout());
        assert!(SyncError::Devices(timeout()).is_timeout());
        assert!(SyncError::Assignments(timeout()).is_timeout());
        assert!(SyncError::Mutation(timeout()).is_timeout());
    }

    #[test]
    fn api_failure_is_not_a_timeout() {
        let err = SyncError::Mutation(RemoteError::Api {
            status: 502,
            body: "bad gateway".to_string(),
        });
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("batch mutation failed"));
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn invalid_date_converts_into_sync_error() {
        let err: SyncError = InvalidDate::new("garbage", "expected YYYY-MM-DD").into();
        assert!(matches!(err, SyncError::InvalidDate(_)));
    }
}
