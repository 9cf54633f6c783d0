//! Shared record types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP verbs used by the DS3 API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    /// `GET`
    #[default]
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
}

impl HttpVerb {
    /// The verb as it appears on the request line and in the string-to-sign.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }

    /// Whether this verb carries an upload body when a source is supplied.
    #[must_use]
    pub fn accepts_body(self) -> bool {
        matches!(self, Self::Put | Self::Post)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner of a bucket or object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub display_name: Option<String>,
    pub id: Option<String>,
}

/// A bucket entry from the service listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: Option<String>,
    /// Creation date exactly as the server sent it.
    pub creation_date: Option<String>,
}

impl Bucket {
    /// Parse [`Bucket::creation_date`] as an ISO 8601 timestamp.
    ///
    /// Returns `None` when the date is absent or not in a recognized format.
    #[must_use]
    pub fn creation_date_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.creation_date.as_deref().and_then(parse_timestamp)
    }
}

/// An object entry (`Contents`) from a bucket listing.
///
/// Fields missing from the `Contents` element stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub key: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub storage_class: Option<String>,
    pub size: Option<u64>,
    pub owner: Option<Owner>,
}

impl Object {
    /// Parse [`Object::last_modified`] as an ISO 8601 timestamp.
    #[must_use]
    pub fn last_modified_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.last_modified.as_deref().and_then(parse_timestamp)
    }
}

fn parse_timestamp(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_should_render_verbs() {
        assert_eq!(HttpVerb::Get.as_str(), "GET");
        assert_eq!(HttpVerb::Delete.to_string(), "DELETE");
        assert!(HttpVerb::Put.accepts_body());
        assert!(HttpVerb::Post.accepts_body());
        assert!(!HttpVerb::Head.accepts_body());
    }

    #[test]
    fn test_should_parse_creation_date() {
        let bucket = Bucket {
            name: Some("b1".to_owned()),
            creation_date: Some("2024-01-01T00:00:00Z".to_owned()),
        };
        let date = bucket.creation_date_utc().unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.hour(), 0);
    }

    #[test]
    fn test_should_parse_millisecond_timestamps() {
        let object = Object {
            last_modified: Some("2006-02-03T16:45:09.000Z".to_owned()),
            ..Object::default()
        };
        assert_eq!(object.last_modified_utc().unwrap().minute(), 45);
    }

    #[test]
    fn test_should_tolerate_unparseable_dates() {
        let bucket = Bucket {
            name: None,
            creation_date: Some("yesterday".to_owned()),
        };
        assert!(bucket.creation_date_utc().is_none());
        assert!(Bucket::default().creation_date_utc().is_none());
    }

    #[test]
    fn test_should_serialize_verb_uppercase() {
        let json = serde_json::to_string(&HttpVerb::Head).unwrap();
        assert_eq!(json, "\"HEAD\"");
    }
}
