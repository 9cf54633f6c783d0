//! Bulk job model.
//!
//! A bulk job moves many objects to or from tape-backed storage. The client
//! sends a [`BulkObjectList`] naming the objects; the server answers with a
//! [`BulkResponse`] whose chunks are the server's plan for the transfer, in
//! the order the objects should be moved.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One object in a bulk job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkObject {
    /// Object name (key).
    pub name: String,
    /// Size in bytes. Required for puts, zero for gets.
    pub size: u64,
}

impl BulkObject {
    /// Create a bulk object entry.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// An ordered list of bulk objects.
///
/// On requests only the objects are meaningful. On responses each list is a
/// chunk, tagged with the server-assigned chunk number and server id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkObjectList {
    /// Objects in document order.
    pub objects: Vec<BulkObject>,
    /// Server-assigned chunk number (responses only).
    pub chunk_number: Option<u64>,
    /// Server id that owns the chunk (responses only).
    pub server_id: Option<String>,
}

impl BulkObjectList {
    /// Create a request list from already-built objects.
    #[must_use]
    pub fn new(objects: Vec<BulkObject>) -> Self {
        Self {
            objects,
            chunk_number: None,
            server_id: None,
        }
    }

    /// Create a request list from `(name, size)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self::new(
            entries
                .into_iter()
                .map(|(name, size)| BulkObject::new(name, size))
                .collect(),
        )
    }

    /// Create a request list from file-system paths.
    ///
    /// Each object is named by its path as given and sized by the file's
    /// length. A path that cannot be inspected is logged and kept with size 0,
    /// so the list always has one entry per path.
    pub fn from_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::new(
            paths
                .into_iter()
                .map(|path| {
                    let path = path.as_ref();
                    let size = match std::fs::metadata(path) {
                        Ok(meta) => meta.len(),
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "failed to get file info");
                            0
                        }
                    };
                    BulkObject::new(path.to_string_lossy(), size)
                })
                .collect(),
        )
    }

    /// Number of objects in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the list has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Sum of all object sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.objects.iter().map(|o| o.size).sum()
    }

    /// Iterate over the objects in order.
    pub fn iter(&self) -> std::slice::Iter<'_, BulkObject> {
        self.objects.iter()
    }
}

impl FromIterator<BulkObject> for BulkObjectList {
    fn from_iter<T: IntoIterator<Item = BulkObject>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BulkObjectList {
    type Item = &'a BulkObject;
    type IntoIter = std::slice::Iter<'a, BulkObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

/// The server's answer to a bulk job request.
///
/// The response owns its chunks; dropping it releases every nested list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResponse {
    /// Server-assigned job id. Never empty on a decoded response.
    pub job_id: String,
    /// Chunks in the order the server assigned them.
    pub chunks: Vec<BulkObjectList>,
}

impl BulkResponse {
    /// Total number of objects across all chunks.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.chunks.iter().map(BulkObjectList::len).sum()
    }
}
