//! Value types exchanged with the knowledge service.
//!
//! The response payload is deliberately kept opaque ([`ResponseEnvelope`]):
//! each operation decodes `entry` into the shape it expects, so the transport
//! never couples to a per-endpoint schema.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::errors::{KnowledgeError, KnowledgeResult};

/// A heterogeneous key/value record as returned by list endpoints.
pub type Record = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Paging parameters for list operations.
///
/// Each field, when set, is sent as the service's query parameter of the same
/// name. Unset fields leave the service default in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Index of the first entry to return.
    pub offset: Option<u32>,
    /// Maximum number of entries to return. `0` asks the service for all entries.
    pub count: Option<u32>,
}

impl ListOptions {
    /// Creates options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the index of the first entry to return.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the maximum number of entries to return.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Returns the query pairs for the fields that are set, `offset` first.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(2);
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(count) = self.count {
            query.push(("count", count.to_string()));
        }
        query
    }
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// The standard JSON wrapper around every successful response.
///
/// `entry` is required: a body without it fails to deserialise.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    /// Raw JSON payload; its shape depends on the endpoint that was called.
    pub entry: Box<RawValue>,
}

impl ResponseEnvelope {
    /// Parses an envelope from a complete response body.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::Decode`] if the body is not JSON or has no `entry`.
    pub fn from_slice(body: &[u8]) -> KnowledgeResult<Self> {
        serde_json::from_slice(body).map_err(|e| KnowledgeError::Decode {
            message: format!("invalid response envelope: {e}"),
        })
    }

    /// Decodes the `entry` payload into `T`.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::Decode`] if the payload does not match `T`.
    pub fn decode_entry<T: DeserializeOwned>(&self) -> KnowledgeResult<T> {
        serde_json::from_str(self.entry.get()).map_err(|e| {
            tracing::debug!(error = %e, "entry payload did not match the expected shape");
            KnowledgeError::Decode {
                message: format!("unexpected entry payload: {e}"),
            }
        })
    }

    /// Returns the raw `entry` JSON text.
    pub fn raw_entry(&self) -> &str {
        self.entry.get()
    }
}

// ---------------------------------------------------------------------------
// Create outcome
// ---------------------------------------------------------------------------

/// Successful outcome of a create call.
///
/// A create with an ACL is two independent requests. When the second one
/// fails the call returns [`KnowledgeError::AclNotApplied`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateOutcome {
    /// The extraction was created; no ACL was requested.
    Created,
    /// The extraction was created and its ACL applied.
    CreatedWithAcl,
}

impl CreateOutcome {
    /// Returns `true` if an ACL was applied as part of the create.
    pub fn acl_applied(self) -> bool {
        matches!(self, Self::CreatedWithAcl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_options_only_emit_fields_that_are_set() {
        assert!(ListOptions::new().to_query().is_empty());
        assert_eq!(
            ListOptions::new().with_count(30).to_query(),
            vec![("count", "30".to_string())]
        );
        assert_eq!(
            ListOptions::new().with_offset(10).with_count(5).to_query(),
            vec![("offset", "10".to_string()), ("count", "5".to_string())]
        );
    }

    #[test]
    fn envelope_decodes_list_entries_as_records() {
        let body = br#"{"entry":[{"name":"x","acl":{"owner":"admin"}}],"paging":{}}"#;
        let envelope = ResponseEnvelope::from_slice(body).unwrap();
        let records: Vec<Record> = envelope.decode_entry().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "x");
        assert_eq!(records[0]["acl"]["owner"], "admin");
    }

    #[test]
    fn envelope_without_entry_is_a_decode_error() {
        let err = ResponseEnvelope::from_slice(br#"{"messages":[]}"#).unwrap_err();
        assert!(matches!(err, KnowledgeError::Decode { .. }));
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let err = ResponseEnvelope::from_slice(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, KnowledgeError::Decode { .. }));
    }

    #[test]
    fn entry_of_the_wrong_shape_is_a_decode_error() {
        let envelope = ResponseEnvelope::from_slice(br#"{"entry":{"name":"x"}}"#).unwrap();
        assert_eq!(envelope.raw_entry(), r#"{"name":"x"}"#);
        let err = envelope.decode_entry::<Vec<Record>>().unwrap_err();
        assert!(matches!(err, KnowledgeError::Decode { .. }));
    }
}
