//! Service-relative resource paths for knowledge objects.
//!
//! A single field extraction is addressed by a compound key of stanza, type,
//! and value. The service names such an object `"{stanza} : {type}-{value}"`
//! and expects that name as one percent-encoded path segment under the
//! extractions collection.
//!
//! The three key parts are not checked for the separator characters used in
//! the composite name. Two different keys can therefore encode to the same
//! path (e.g. stanza `"a : b"` vs. type `"b"`); callers own that constraint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Collection endpoint for field extractions (list and create).
pub const EXTRACTIONS_PATH: &str = "/services/data/props/extractions";

/// Collection endpoint for transforms extractions (read-only here).
pub const TRANSFORMS_PATH: &str = "/services/data/transforms/extractions";

/// Literal sub-resource segment that addresses an object's ACL.
pub const ACL_SEGMENT: &str = "acl";

/// Builds the path of one extraction from its compound key parts.
///
/// The composite name `"{stanza} : {kind}-{value}"` is percent-encoded as a
/// single segment and appended to [`EXTRACTIONS_PATH`].
pub fn encode_path(stanza: &str, kind: &str, value: &str) -> String {
    let composite = composite_name(stanza, kind, value);
    format!("{EXTRACTIONS_PATH}/{}", urlencoding::encode(&composite))
}

fn composite_name(stanza: &str, kind: &str, value: &str) -> String {
    format!("{stanza} : {kind}-{value}")
}

// ---------------------------------------------------------------------------
// Compound key
// ---------------------------------------------------------------------------

/// The stanza/type/value triple that identifies one field extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractionKey {
    /// Props stanza the extraction belongs to (sourcetype, `source::…`, `host::…`).
    pub stanza: String,
    /// Extraction type as understood by the service, e.g. `"REPORT"` or `"EXTRACT"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Extraction value: a transform name list or a regular expression.
    pub value: String,
}

impl ExtractionKey {
    /// Creates a key. No validation is performed; the service decides what
    /// is acceptable.
    pub fn new(
        stanza: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            stanza: stanza.into(),
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Returns the unescaped composite name used by the service.
    pub fn composite_name(&self) -> String {
        composite_name(&self.stanza, &self.kind, &self.value)
    }

    /// Returns the service-relative path of this extraction.
    pub fn resource_path(&self) -> String {
        encode_path(&self.stanza, &self.kind, &self.value)
    }

    /// Returns the service-relative path of this extraction's ACL.
    pub fn acl_path(&self) -> String {
        format!("{}/{ACL_SEGMENT}", self.resource_path())
    }
}

impl fmt::Display for ExtractionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.composite_name())
    }
}
