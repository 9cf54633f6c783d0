//! Client error types.
//!
//! Every failure surfaces as a [`Ds3Error`] carrying one of four kinds and a
//! human-readable message. Errors are returned unchanged to the caller; the
//! client never retries or suppresses them. A non-2xx HTTP status is not an
//! error at this layer.

use ds3_auth::AuthError;
use ds3_xml::XmlError;

/// The category of a [`Ds3Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was absent or empty.
    MissingArgs,
    /// The transport handle could not be created.
    TransportHandle,
    /// The HTTP exchange failed at the transport level.
    FailedRequest,
    /// The response body failed to parse or had an unexpected root element.
    InvalidXml,
}

/// Errors returned by DS3 client operations.
#[derive(Debug, thiserror::Error)]
pub enum Ds3Error {
    /// A required argument was absent or empty.
    #[error("{0}")]
    MissingArgs(String),

    /// The transport handle could not be created.
    #[error("{0}")]
    TransportHandle(String),

    /// The HTTP exchange failed: connection, TLS, redirect limit, or a
    /// malformed response header block.
    #[error("{0}")]
    FailedRequest(String),

    /// The response body failed to parse or had an unexpected root element.
    /// The message includes the raw body.
    #[error("{0}")]
    InvalidXml(String),
}

impl Ds3Error {
    /// The error's kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingArgs(_) => ErrorKind::MissingArgs,
            Self::TransportHandle(_) => ErrorKind::TransportHandle,
            Self::FailedRequest(_) => ErrorKind::FailedRequest,
            Self::InvalidXml(_) => ErrorKind::InvalidXml,
        }
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::MissingArgs(m)
            | Self::TransportHandle(m)
            | Self::FailedRequest(m)
            | Self::InvalidXml(m) => m,
        }
    }

    /// Build an `InvalidXml` error for a response body that failed to decode.
    pub(crate) fn invalid_xml(error: &XmlError, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body);
        match error {
            XmlError::UnexpectedRoot { expected, .. } => Self::InvalidXml(format!(
                "Expected the root element to be '{expected}'.  The actual response is: {body}"
            )),
            other => Self::InvalidXml(format!(
                "Failed to parse response document ({other}).  The actual response is: {body}"
            )),
        }
    }
}

impl From<AuthError> for Ds3Error {
    fn from(error: AuthError) -> Self {
        Self::MissingArgs(format!("Cannot sign request: {error}"))
    }
}

/// Convenience result type for DS3 client operations.
pub type Ds3Result<T> = Result<T, Ds3Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_report_kind_and_message() {
        let error = Ds3Error::FailedRequest("Request failed: connection refused".to_owned());
        assert_eq!(error.kind(), ErrorKind::FailedRequest);
        assert_eq!(error.message(), "Request failed: connection refused");
        assert_eq!(error.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn test_should_include_raw_body_for_unexpected_root() {
        let xml_error = XmlError::UnexpectedRoot {
            expected: "ListBucketResult",
            found: "Foo".to_owned(),
        };
        let error = Ds3Error::invalid_xml(&xml_error, b"<Foo/>");
        assert_eq!(error.kind(), ErrorKind::InvalidXml);
        assert!(error.message().contains("'ListBucketResult'"));
        assert!(error.message().ends_with("<Foo/>"));
    }

    #[test]
    fn test_should_map_signing_failures_to_missing_args() {
        let error = Ds3Error::from(AuthError::MissingDate);
        assert_eq!(error.kind(), ErrorKind::MissingArgs);
    }
}
