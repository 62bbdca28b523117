use thiserror::Error;

/// Top-level error type for the `phonectl-api` crate.
///
/// Every failure is scoped to one request against one device; nothing in
/// here aborts work on other devices. `phonectl-core` forwards these
/// through the result channel at address granularity.
#[derive(Debug, Error)]
pub enum Error {
    /// The device rejected the credentials or the bearer token (HTTP 401/403).
    #[error("Authentication failed (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    /// Any other HTTP status >= 299. The threshold is deliberate, not a typo.
    #[error("Device returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Malformed JSON in a response body, wrapped with the offending address.
    #[error("Failed to decode response from {address}: {message}")]
    Deserialization { address: String, message: String },

    /// TLS setup or certificate error while building the client.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// Returns `true` if this error came from a 401/403 response.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
