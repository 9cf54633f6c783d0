//! Listing responses.

use serde::{Deserialize, Serialize};

use crate::types::{Bucket, Object, Owner};

/// Response of the service listing (`GET /`, root `ListAllMyBucketsResult`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetServiceOutput {
    pub buckets: Vec<Bucket>,
    pub owner: Option<Owner>,
}

/// Response of a bucket listing (`GET /{bucket}`, root `ListBucketResult`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBucketOutput {
    pub objects: Vec<Object>,
    pub creation_date: Option<String>,
    /// `true` only when the server sent the literal `true`.
    pub is_truncated: bool,
    pub marker: Option<String>,
    pub max_keys: Option<u64>,
    pub name: Option<String>,
    pub delimiter: Option<String>,
    pub next_marker: Option<String>,
    pub prefix: Option<String>,
}
