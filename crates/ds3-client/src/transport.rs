//! HTTP transport.
//!
//! A [`Transport`] performs exactly one HTTP exchange per call, blocking the
//! calling thread until the response body has been streamed (redirects
//! included) or the exchange fails. It reports every line of the final
//! response's header block to a [`ResponseHeaderParser`] and writes the body
//! into the caller's sink.

use std::fmt;
use std::io::{Read, Write};
use std::time::Duration;

use ds3_model::HttpVerb;
use tracing::debug;

use crate::error::Ds3Error;
use crate::header::ResponseHeaderParser;

/// A sized upload body.
///
/// Exactly `length` bytes are read from `reader`.
pub struct UploadBody {
    /// Source of the request body.
    pub reader: Box<dyn Read + Send>,
    /// Number of bytes to send.
    pub length: u64,
}

impl UploadBody {
    /// Create an upload body of `length` bytes read from `reader`.
    #[must_use]
    pub fn new(reader: Box<dyn Read + Send>, length: u64) -> Self {
        Self { reader, length }
    }
}

impl fmt::Debug for UploadBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadBody")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Everything a transport needs to perform one exchange.
#[derive(Debug)]
pub struct HttpExchange {
    /// HTTP verb.
    pub verb: HttpVerb,
    /// Fully resolved URL.
    pub url: String,
    /// Request headers, including `Authorization` and `Date`.
    pub headers: Vec<(String, String)>,
    /// Upload body, for PUT/POST with a body source.
    pub body: Option<UploadBody>,
    /// Maximum number of redirects to follow.
    pub max_redirects: u32,
    /// Proxy URL, if any.
    pub proxy: Option<String>,
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    /// The transport handle could not be created.
    #[error("Failed to create transport handle: {0}")]
    Init(String),

    /// The exchange failed after the handle was created.
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<TransportFailure> for Ds3Error {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Init(_) => Self::TransportHandle(failure.to_string()),
            TransportFailure::Request(_) => Self::FailedRequest(failure.to_string()),
        }
    }
}

/// Performs HTTP exchanges on behalf of the dispatcher.
///
/// Implementations must hold no per-call state so one transport can serve
/// concurrent dispatches from several threads.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Perform one exchange.
    ///
    /// Must feed the final response's status line, each header line and the
    /// terminating blank line to `headers`, aborting with
    /// [`TransportFailure::Request`] if the parser rejects a line. The body is
    /// written to `body_sink`, or discarded when there is none.
    fn perform(
        &self,
        exchange: HttpExchange,
        headers: &mut ResponseHeaderParser,
        body_sink: Option<&mut dyn Write>,
    ) -> Result<(), TransportFailure>;
}

/// The default transport, backed by a blocking `reqwest` client.
///
/// Each call builds its own HTTP/1.1 client, so nothing is pooled or shared
/// between dispatches. No timeout is applied.
///
/// Without a configured proxy, reqwest's usual environment detection applies
/// (`HTTP_PROXY`, `HTTPS_PROXY`, `ALL_PROXY` and `NO_PROXY`). A configured
/// proxy carries every request and the environment is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl HttpTransport {
    fn build_client(
        exchange: &HttpExchange,
    ) -> Result<reqwest::blocking::Client, TransportFailure> {
        let redirects = usize::try_from(exchange.max_redirects).unwrap_or(usize::MAX);
        let mut builder = reqwest::blocking::Client::builder()
            .http1_only()
            .timeout(None::<Duration>)
            .redirect(reqwest::redirect::Policy::limited(redirects));

        // An explicit proxy replaces reqwest's environment lookup.
        if let Some(proxy) = exchange.proxy.as_deref() {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy)
                    .map_err(|e| TransportFailure::Init(format!("invalid proxy '{proxy}': {e}")))?,
            );
        }

        builder
            .build()
            .map_err(|e| TransportFailure::Init(e.to_string()))
    }
}

fn method(verb: HttpVerb) -> reqwest::Method {
    match verb {
        HttpVerb::Get => reqwest::Method::GET,
        HttpVerb::Put => reqwest::Method::PUT,
        HttpVerb::Post => reqwest::Method::POST,
        HttpVerb::Delete => reqwest::Method::DELETE,
        HttpVerb::Head => reqwest::Method::HEAD,
    }
}

fn feed_line(headers: &mut ResponseHeaderParser, line: &[u8]) -> Result<(), TransportFailure> {
    headers
        .process_line(line)
        .map(|_| ())
        .map_err(|e| TransportFailure::Request(e.to_string()))
}

impl Transport for HttpTransport {
    fn perform(
        &self,
        exchange: HttpExchange,
        headers: &mut ResponseHeaderParser,
        body_sink: Option<&mut dyn Write>,
    ) -> Result<(), TransportFailure> {
        let client = Self::build_client(&exchange)?;

        let mut request = client.request(method(exchange.verb), &exchange.url);
        for (name, value) in &exchange.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(upload) = exchange.body {
            let length = upload.length;
            request = request.body(reqwest::blocking::Body::sized(
                upload.reader.take(length),
                length,
            ));
        }

        let mut response = request
            .send()
            .map_err(|e| TransportFailure::Request(e.to_string()))?;

        let status = response.status();
        let status_line = format!(
            "{:?} {} {}\r\n",
            response.version(),
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        feed_line(headers, status_line.as_bytes())?;

        for (name, value) in response.headers() {
            let mut line = Vec::with_capacity(name.as_str().len() + value.len() + 4);
            line.extend_from_slice(name.as_str().as_bytes());
            line.extend_from_slice(b": ");
            line.extend_from_slice(value.as_bytes());
            line.extend_from_slice(b"\r\n");
            feed_line(headers, &line)?;
        }
        feed_line(headers, b"\r\n")?;

        if let Some(sink) = body_sink {
            let copied = response
                .copy_to(sink)
                .map_err(|e| TransportFailure::Request(e.to_string()))?;
            debug!(bytes = copied, "Streamed response body");
        }

        Ok(())
    }
}
