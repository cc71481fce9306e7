//! Dispatch error type for retry classification.

use thiserror::Error;

/// Error from a single dispatch attempt.
///
/// Kept as a distinct type (rather than anyhow) so the classifier can
/// inspect it and so the executor can hand the terminal failure back to the
/// caller exactly as the transport produced it.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Endpoint answered, but with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}
