//! Response header block parsing.
//!
//! The transport feeds the parser one raw line at a time, in arrival order.
//! The first line must be an `HTTP/1.1` status line; `100 Continue` status
//! lines are dropped and the next status line is awaited. Every following
//! line is a `key: value` header until a blank line ends the block.

use std::collections::HashMap;

use tracing::{debug, trace};

/// Marker every status line must start with.
const STATUS_LINE_PREFIX: &str = "HTTP/1.1";

/// The header block broke the protocol; the transport aborts the exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    /// The first line was not an `HTTP/1.1` status line.
    #[error("unsupported protocol in status line: {0}")]
    UnsupportedProtocol(String),

    /// The status code was missing or not a positive integer.
    #[error("invalid status code in status line: {0}")]
    InvalidStatusCode(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ParserState {
    #[default]
    ExpectStatus,
    CollectingHeaders,
    Complete,
}

/// Accumulates the status line and headers of a single response.
///
/// Lives for one dispatch only.
#[derive(Debug, Default)]
pub struct ResponseHeaderParser {
    state: ParserState,
    status_code: Option<u16>,
    status_message: Option<String>,
    headers: HashMap<String, String>,
}

impl ResponseHeaderParser {
    /// Create a parser awaiting the status line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one raw header line, including any trailing CR/LF.
    ///
    /// Returns the number of bytes accepted, which is always the full line.
    pub fn process_line(&mut self, raw: &[u8]) -> Result<usize, ProtocolViolation> {
        let decoded = String::from_utf8_lossy(raw);
        let line = decoded.trim_end();

        if line.is_empty() {
            if self.state == ParserState::CollectingHeaders {
                trace!(header_count = self.headers.len(), "End of response headers");
                self.state = ParserState::Complete;
            }
            return Ok(raw.len());
        }

        match self.state {
            ParserState::ExpectStatus => self.process_status_line(line)?,
            ParserState::CollectingHeaders => {
                let (key, value) = line.split_once(": ").unwrap_or((line, ""));
                trace!(key, value, "Response header");
                self.headers.insert(key.to_owned(), value.to_owned());
            }
            ParserState::Complete => {
                debug!(line, "Ignoring line after end of response headers");
            }
        }

        Ok(raw.len())
    }

    fn process_status_line(&mut self, line: &str) -> Result<(), ProtocolViolation> {
        if !line.starts_with(STATUS_LINE_PREFIX) {
            return Err(ProtocolViolation::UnsupportedProtocol(line.to_owned()));
        }

        let fields: Vec<&str> = line.split(' ').collect();
        let status_code = fields
            .get(1)
            .and_then(|code| code.parse::<u16>().ok())
            .filter(|code| *code > 0)
            .ok_or_else(|| ProtocolViolation::InvalidStatusCode(line.to_owned()))?;

        if status_code == 100 {
            debug!("Ignoring 100 Continue status line");
            return Ok(());
        }

        let status_message = fields.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();
        debug!(status_code, status_message = %status_message, "Response status");

        self.status_code = Some(status_code);
        self.status_message = Some(status_message);
        self.state = ParserState::CollectingHeaders;
        Ok(())
    }

    /// The recorded status code, once a final status line has been seen.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The status message (reason phrase) of the recorded status line.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// All collected headers. On duplicate names the last value wins.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up a header by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the blank line ending the header block has been seen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == ParserState::Complete
    }
}
