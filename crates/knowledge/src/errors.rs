//! Error taxonomy for knowledge-object operations.
//!
//! [`KnowledgeError`] is shared by the domain types (validation of
//! access-control descriptors) and by every [`crate::KnowledgeService`]
//! implementation (construction, transport, HTTP status, and decode failures).
//!
//! None of these conditions are retried automatically. Every error is surfaced
//! to the immediate caller, including the partial-failure state of a
//! create-with-ACL call ([`KnowledgeError::AclNotApplied`]).

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

// ---------------------------------------------------------------------------
// Knowledge-service errors
// ---------------------------------------------------------------------------

/// Errors produced while building requests for, or talking to, the remote
/// knowledge service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KnowledgeError {
    /// A required input was empty.
    ///
    /// Raised locally before any network call; the caller must fix its input.
    #[error("error creating acl: {field} is a required field")]
    Validation {
        /// Name of the offending field (e.g. `"owner"`, `"sharing"`).
        field: &'static str,
    },

    /// The client could not be constructed (unparseable base URL, or the
    /// HTTP transport could not be initialised). No client is returned.
    #[error("invalid client configuration for '{url}': {message}")]
    Construction {
        /// The base URL exactly as supplied by the caller.
        url: String,
        /// Description of the problem.
        message: String,
    },

    /// The service answered with an HTTP status of 400 or above.
    ///
    /// `body` holds the complete response body, read before the connection
    /// was released.
    #[error("client error {status}: {body}")]
    Request {
        /// HTTP status code returned by the service.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// A service-relative path could not be turned into a request URL on an
    /// existing client (e.g. it does not start with `/`). Nothing was sent.
    #[error("invalid service path '{path}': {message}")]
    InvalidPath {
        /// The path exactly as passed to the client.
        path: String,
        /// Description of the problem.
        message: String,
    },

    /// Network-level failure: DNS, connection refused, TLS handshake, timeout.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the underlying failure.
        message: String,
    },

    /// The response body was not a valid envelope, or the `entry` payload did
    /// not have the shape expected by the calling operation.
    #[error("decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// The extraction was created but the follow-up ACL request failed.
    ///
    /// The extraction exists on the service without the requested ACL. The
    /// create is not rolled back; retry only the ACL step with
    /// [`crate::KnowledgeService::set_extraction_acl`].
    #[error("extraction '{resource}' was created but its ACL was not applied: {source}")]
    AclNotApplied {
        /// Composite name of the extraction that now exists.
        resource: String,
        /// Failure of the ACL request.
        #[source]
        source: Box<KnowledgeError>,
    },
}

impl KnowledgeError {
    /// Returns the HTTP status code carried by this error, if any.
    ///
    /// For [`KnowledgeError::AclNotApplied`] this is the status of the failed
    /// ACL request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::AclNotApplied { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns `true` if the service reported the resource as missing (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the resource was created even though the call failed.
    pub fn is_partial_create(&self) -> bool {
        matches!(self, Self::AclNotApplied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_display_includes_status_and_body() {
        let err = KnowledgeError::Request {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "client error 500: internal error");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_not_found());
    }

    #[test]
    fn validation_error_names_the_field() {
        let err = KnowledgeError::Validation { field: "sharing" };
        assert_eq!(
            err.to_string(),
            "error creating acl: sharing is a required field"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn invalid_path_names_the_path_and_has_no_status() {
        let err = KnowledgeError::InvalidPath {
            path: "services/x".to_string(),
            message: "service path must start with '/'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid service path 'services/x': service path must start with '/'"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn acl_not_applied_reports_the_inner_status() {
        let err = KnowledgeError::AclNotApplied {
            resource: "web : REPORT-x".to_string(),
            source: Box::new(KnowledgeError::Request {
                status: 404,
                body: "not found".to_string(),
            }),
        };
        assert!(err.is_partial_create());
        assert!(err.is_not_found());
        assert!(std::error::Error::source(&err).is_some());
    }
}
