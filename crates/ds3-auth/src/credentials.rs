//! Access credentials used to sign requests.

use std::fmt;

/// An access id / secret key pair.
///
/// Immutable once created. The secret key is redacted from `Debug` output so
/// credentials can be logged safely alongside the client that owns them.
///
/// # Examples
///
/// ```
/// use ds3_auth::Credentials;
///
/// let creds = Credentials::new("AKID", "secret");
/// assert_eq!(creds.access_id(), "AKID");
/// assert!(!format!("{creds:?}").contains("secret\""));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_id: String,
    secret_key: String,
}

impl Credentials {
    /// Create credentials from an access id and a secret key.
    pub fn new(access_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_id: access_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The public access id, sent in the `Authorization` header.
    #[must_use]
    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    /// The secret key, used only as the HMAC key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_id", &self.access_id)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
