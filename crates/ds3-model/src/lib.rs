//! Data model for the DS3 client.
//!
//! Plain value records decoded from (or encoded to) the DS3 XML wire format:
//!
//! - [`types`] - HTTP verbs and the shared `Owner`/`Bucket`/`Object` records
//! - [`output`] - Service and bucket listing responses
//! - [`bulk`] - Bulk job object lists, chunks and job responses

#![allow(missing_docs)]

pub mod bulk;
pub mod output;
pub mod types;

pub use bulk::{BulkObject, BulkObjectList, BulkResponse};
pub use output::{GetBucketOutput, GetServiceOutput};
pub use types::{Bucket, HttpVerb, Object, Owner};
