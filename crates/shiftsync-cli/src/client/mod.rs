//! Implementations of the core boundary traits.
//!
//! [`erp`] and [`lighthouse`] are thin blocking HTTP clients with bounded
//! timeouts. [`file`] reads exported JSON, both for the local assignment
//! snapshot and for fully offline `--from-files` runs.

pub mod erp;
pub mod file;
pub mod lighthouse;

use shiftsync_core::error::RemoteError;

/// Map a `ureq` failure into the core's transport taxonomy.
///
/// Read timeouts surface as I/O transport errors; they are promoted to the
/// distinct timeout variant so callers can apply a retry policy.
pub(crate) fn map_remote(err: ureq::Error, timeout_secs: u64) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => RemoteError::Api {
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => {
            let message = transport.to_string();
            if transport.kind() == ureq::ErrorKind::Io && message.contains("timed out") {
                RemoteError::Timeout { timeout_secs }
            } else {
                RemoteError::Transport(message)
            }
        }
    }
}
