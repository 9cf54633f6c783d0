//! XML error types.

use std::io;

/// Errors that can occur during DS3 XML encoding or decoding.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document root was not the expected element.
    #[error("expected the root element to be '{expected}', found '{found}'")]
    UnexpectedRoot {
        /// The root element the decoder requires.
        expected: &'static str,
        /// The root element actually present.
        found: String,
    },

    /// A required XML element was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// A required XML attribute was missing or empty.
    #[error("missing required XML attribute: {0}")]
    MissingAttribute(String),

    /// An unexpected XML element was encountered.
    #[error("unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// An error parsing a value from XML text content.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}
