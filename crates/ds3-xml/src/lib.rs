//! DS3 XML encoding/decoding.
//!
//! This crate converts between the DS3 model types and the XML wire format.
//!
//! # Key components
//!
//! - [`Ds3Serialize`] trait and [`to_xml`] for building request bodies; the
//!   only outbound document is the bulk job `MasterObjectList`
//! - [`Ds3Deserialize`] trait and [`from_xml`] for decoding the service
//!   listing, bucket listing and bulk job responses
//!
//! # Decoding conventions
//!
//! - The root element name must match exactly, otherwise decoding fails
//! - Unknown child elements and attributes are logged and skipped
//! - Elements missing from the document leave the matching field unset
//! - Integers are base-10

pub mod deserialize;
pub mod error;
pub mod serialize;

pub use deserialize::{Ds3Deserialize, from_xml};
pub use error::XmlError;
pub use serialize::{Ds3Serialize, bulk_request_xml, to_xml};
