use thiserror::Error;

/// Top-level error type for the `gearloan-api` crate.
///
/// Covers every way a call against the record store can fail at the
/// transport layer. A semantic refusal by the backend (e.g. borrowing an
/// item someone else already holds) is NOT an error here: writes are
/// opaque and only a later read reveals the outcome.
/// `gearloan-core` maps all of these into its `Transport` variant.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The store answered with a non-success HTTP status.
    #[error("Record store returned HTTP {status}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// An action could not be encoded as JSON.
    #[error("Failed to encode action: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// The HTTP status code, if the store responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
