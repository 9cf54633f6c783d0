//! The DS3 client handle.

use std::sync::Arc;

use ds3_auth::Credentials;

use crate::error::Ds3Error;
use crate::transport::{HttpTransport, Transport};

/// Redirects followed per dispatch unless configured otherwise.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Connection settings shared by every request.
///
/// A `Client` is read-only while requests are dispatched, so one instance can
/// be cloned or shared across threads. All per-call state lives in the
/// dispatch call itself.
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: String,
    credentials: Credentials,
    proxy: Option<String>,
    max_redirects: u32,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client for `endpoint` (e.g. `http://ds3.example.com:8080`).
    ///
    /// A trailing `/` on the endpoint is dropped since every request path
    /// starts with one.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Result<Self, Ds3Error> {
        let endpoint = endpoint.into();
        let endpoint = endpoint.trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(Ds3Error::MissingArgs(
                "The endpoint must not be empty".to_owned(),
            ));
        }
        if credentials.access_id().is_empty() || credentials.secret_key().is_empty() {
            return Err(Ds3Error::MissingArgs(
                "Both the access id and the secret key are required".to_owned(),
            ));
        }

        Ok(Self {
            endpoint: endpoint.to_owned(),
            credentials,
            proxy: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            transport: Arc::new(HttpTransport),
        })
    }

    /// Route all requests through `proxy`.
    pub fn set_proxy(&mut self, proxy: impl Into<String>) {
        self.proxy = Some(proxy.into());
    }

    /// Builder-style variant of [`Client::set_proxy`].
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.set_proxy(proxy);
        self
    }

    /// Set how many redirects a dispatch follows.
    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Replace the HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Signing credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Proxy URL, if one is set.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Maximum redirects followed per dispatch.
    #[must_use]
    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}
