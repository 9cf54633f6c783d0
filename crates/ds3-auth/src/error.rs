//! Error types for request signing.

/// Errors that can occur while building a request signature.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The canonical resource path was absent or empty.
    #[error("resource path is required for signing")]
    MissingResource,

    /// The request date was absent or empty.
    #[error("date is required for signing")]
    MissingDate,

    /// The secret key could not be used as an HMAC key.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}
