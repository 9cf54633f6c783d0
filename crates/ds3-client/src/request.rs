//! DS3 requests.
//!
//! A [`Request`] is built once, handed to the client for one dispatch, and
//! dropped afterwards. Each dispatch signs it afresh with the current date.

use std::collections::BTreeMap;
use std::fmt;

use ds3_model::{BulkObjectList, HttpVerb};

/// Path prefix of the bulk job endpoints.
const BULK_PATH_PREFIX: &str = "/_rest_/bucket/";

/// Query parameter selecting the bulk operation.
const BULK_OPERATION_PARAM: &str = "operation";

/// Which kind of bulk job to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOperation {
    /// Retrieve objects from the server.
    Get,
    /// Place objects on the server.
    Put,
}

impl BulkOperation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "start_bulk_get",
            Self::Put => "start_bulk_put",
        }
    }
}

/// A single DS3 API request.
#[derive(Debug, Clone, Default)]
pub struct Request {
    verb: HttpVerb,
    path: String,
    length: u64,
    headers: BTreeMap<String, String>,
    query_params: BTreeMap<String, String>,
    object_list: Option<BulkObjectList>,
}

impl Request {
    /// Create a request for an arbitrary verb and path.
    pub fn new(verb: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            ..Self::default()
        }
    }

    /// `GET /`: list all buckets.
    #[must_use]
    pub fn get_service() -> Self {
        Self::new(HttpVerb::Get, "/")
    }

    /// `GET /{bucket}`: list a bucket's objects.
    #[must_use]
    pub fn get_bucket(bucket: &str) -> Self {
        Self::new(HttpVerb::Get, format!("/{bucket}"))
    }

    /// `PUT /{bucket}`: create a bucket.
    #[must_use]
    pub fn put_bucket(bucket: &str) -> Self {
        Self::new(HttpVerb::Put, format!("/{bucket}"))
    }

    /// `DELETE /{bucket}`: delete an empty bucket.
    #[must_use]
    pub fn delete_bucket(bucket: &str) -> Self {
        Self::new(HttpVerb::Delete, format!("/{bucket}"))
    }

    /// `GET /{bucket}/{key}`: download an object.
    #[must_use]
    pub fn get_object(bucket: &str, key: &str) -> Self {
        Self::new(HttpVerb::Get, format!("/{bucket}/{key}"))
    }

    /// `PUT /{bucket}/{key}`: upload an object of exactly `length` bytes.
    #[must_use]
    pub fn put_object(bucket: &str, key: &str, length: u64) -> Self {
        Self::new(HttpVerb::Put, format!("/{bucket}/{key}")).with_length(length)
    }

    /// `DELETE /{bucket}/{key}`: delete an object.
    #[must_use]
    pub fn delete_object(bucket: &str, key: &str) -> Self {
        Self::new(HttpVerb::Delete, format!("/{bucket}/{key}"))
    }

    /// `HEAD /{bucket}/{key}`: fetch an object's metadata.
    #[must_use]
    pub fn head_object(bucket: &str, key: &str) -> Self {
        Self::new(HttpVerb::Head, format!("/{bucket}/{key}"))
    }

    /// Start a bulk get job for `objects` in `bucket`.
    #[must_use]
    pub fn get_bulk(bucket: &str, objects: BulkObjectList) -> Self {
        Self::bulk(BulkOperation::Get, bucket, objects)
    }

    /// Start a bulk put job for `objects` in `bucket`.
    #[must_use]
    pub fn put_bulk(bucket: &str, objects: BulkObjectList) -> Self {
        Self::bulk(BulkOperation::Put, bucket, objects)
    }

    /// Start a bulk job: `PUT /_rest_/bucket/{bucket}?operation=start_bulk_*`.
    #[must_use]
    pub fn bulk(operation: BulkOperation, bucket: &str, objects: BulkObjectList) -> Self {
        Self::new(HttpVerb::Put, format!("{BULK_PATH_PREFIX}{bucket}"))
            .with_query_param(BULK_OPERATION_PARAM, operation.as_str())
            .with_object_list(objects)
    }

    /// Set the declared body length.
    #[must_use]
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = length;
        self
    }

    /// Add a query parameter, replacing any existing value for the key.
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Add a request header, replacing any existing value for the name.
    ///
    /// `x-amz-*` headers are covered by the signature.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach a bulk object list.
    #[must_use]
    pub fn with_object_list(mut self, objects: BulkObjectList) -> Self {
        self.object_list = Some(objects);
        self
    }

    /// The HTTP verb.
    #[must_use]
    pub fn verb(&self) -> HttpVerb {
        self.verb
    }

    /// The request path, e.g. `/bucket/key`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The declared body length in bytes.
    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Request headers sent in addition to `Authorization` and `Date`.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Query parameters.
    #[must_use]
    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    /// The attached bulk object list, if any.
    #[must_use]
    pub fn object_list(&self) -> Option<&BulkObjectList> {
        self.object_list.as_ref()
    }

    /// Take back the attached bulk object list.
    #[must_use]
    pub fn into_object_list(self) -> Option<BulkObjectList> {
        self.object_list
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.path)
    }
}
