//! Blocking client for DS3 object storage.
//!
//! Every call is one signed HTTP exchange performed on the calling thread.
//! There is no connection pool, retry, timeout or background work; a
//! [`Client`] holds only read-only settings and can be shared across threads.
//!
//! # Usage
//!
//! ```no_run
//! use ds3_auth::Credentials;
//! use ds3_client::{Client, Request};
//! use ds3_model::BulkObjectList;
//!
//! let client = Client::new("http://ds3.example.com:8080", Credentials::new("id", "secret"))?;
//!
//! for bucket in client.get_service(&Request::get_service())?.buckets {
//!     println!("{}", bucket.name.unwrap_or_default());
//! }
//!
//! let objects = BulkObjectList::from_files(["a.bin", "b.bin"]);
//! let job = client.bulk(&Request::put_bulk("photos", objects))?;
//! println!("job {} has {} chunks", job.job_id, job.chunks.len());
//! # Ok::<(), ds3_client::Ds3Error>(())
//! ```
//!
//! # Modules
//!
//! - [`client`] - Endpoint, credentials, proxy and redirect settings
//! - [`config`] - Environment-driven configuration
//! - [`dispatch`] - Signing and sending a single request
//! - [`error`] - The four error kinds
//! - [`header`] - Response header block parser
//! - [`query`] - Query string and URL construction
//! - [`request`] - Request type and per-operation constructors
//! - [`transport`] - Pluggable HTTP transport, `reqwest` by default

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod header;
mod operations;
pub mod query;
pub mod request;
pub mod transport;

pub use client::{Client, DEFAULT_MAX_REDIRECTS};
pub use config::ClientConfig;
pub use dispatch::dispatch;
pub use error::{Ds3Error, Ds3Result, ErrorKind};
pub use header::{ProtocolViolation, ResponseHeaderParser};
pub use query::{build_query_string, resolve_url};
pub use request::{BulkOperation, Request};
pub use transport::{HttpExchange, HttpTransport, Transport, TransportFailure, UploadBody};
