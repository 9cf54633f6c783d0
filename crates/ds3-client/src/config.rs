//! Client configuration.
//!
//! Provides [`ClientConfig`] for building a [`Client`] from explicit values
//! or from environment variables.

use ds3_auth::Credentials;
use serde::{Deserialize, Serialize};
use tracing::warn;
use typed_builder::TypedBuilder;

use crate::client::{Client, DEFAULT_MAX_REDIRECTS};
use crate::error::Ds3Error;

/// DS3 client configuration.
///
/// # Examples
///
/// ```
/// use ds3_client::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .endpoint("http://localhost:8080".into())
///     .access_id("id".into())
///     .secret_key("secret".into())
///     .build();
/// assert_eq!(config.max_redirects, 5);
///
/// let client = config.into_client().unwrap();
/// assert_eq!(client.endpoint(), "http://localhost:8080");
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the DS3 endpoint, e.g. `http://ds3.example.com:8080`.
    pub endpoint: String,

    /// Access id used in the `Authorization` header.
    pub access_id: String,

    /// Secret key used to sign requests.
    pub secret_key: String,

    /// Proxy URL for all requests.
    #[builder(default)]
    #[serde(default)]
    pub proxy: Option<String>,

    /// Maximum redirects followed per request.
    #[builder(default = DEFAULT_MAX_REDIRECTS)]
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_redirects() -> u32 {
    DEFAULT_MAX_REDIRECTS
}

fn default_log_level() -> String {
    String::from("info")
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("access_id", &self.access_id)
            .field("secret_key", &"<redacted>")
            .field("proxy", &self.proxy)
            .field("max_redirects", &self.max_redirects)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DS3_ENDPOINT` | required |
    /// | `DS3_ACCESS_KEY` | required |
    /// | `DS3_SECRET_KEY` | required |
    /// | `DS3_PROXY`, then `http_proxy` | none |
    /// | `DS3_MAX_REDIRECTS` | `5` |
    /// | `LOG_LEVEL` | `info` |
    pub fn from_env() -> Result<Self, Ds3Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Ds3Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &str| {
            var(name).ok_or_else(|| {
                Ds3Error::MissingArgs(format!("The environment variable {name} must be set"))
            })
        };

        let mut config = Self::builder()
            .endpoint(required("DS3_ENDPOINT")?)
            .access_id(required("DS3_ACCESS_KEY")?)
            .secret_key(required("DS3_SECRET_KEY")?)
            .proxy(var("DS3_PROXY").or_else(|| var("http_proxy")))
            .build();

        if let Some(v) = var("DS3_MAX_REDIRECTS") {
            match v.parse::<u32>() {
                Ok(n) => config.max_redirects = n,
                Err(e) => warn!(value = %v, error = %e, "Ignoring invalid DS3_MAX_REDIRECTS"),
            }
        }
        if let Some(v) = var("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }

    /// Build a [`Client`] from this configuration.
    pub fn into_client(self) -> Result<Client, Ds3Error> {
        let mut client = Client::new(
            self.endpoint,
            Credentials::new(self.access_id, self.secret_key),
        )?
        .with_max_redirects(self.max_redirects);
        if let Some(proxy) = self.proxy {
            client.set_proxy(proxy);
        }
        Ok(client)
    }
}
