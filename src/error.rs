//! Failure kinds returned by zip code verification.

use thiserror::Error;

/// Boxed error used at the transport boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ZipCodeError {
    /// Candidate is not exactly 8 bytes long.
    #[error("invalid zip code")]
    InvalidFormat,

    /// Candidate is not present in the allow-list.
    #[error("unavailable zip code")]
    NotAllowed,

    /// The transport failed; display and source are the underlying cause's.
    #[error(transparent)]
    Transport(BoxError),

    #[error("failed to read response body: {0}")]
    Read(#[source] BoxError),

    #[error("failed to decode zip code response: {0}")]
    Decode(#[from] serde_json::Error),
}
