//! Access-control descriptors for knowledge objects.
//!
//! An [`AccessControl`] is a transient, immutable parameter object: it is
//! built once, validated at construction, and handed to a create (or ACL-only)
//! call. It has no identity of its own on the service side.

use url::form_urlencoded;

use crate::errors::{KnowledgeError, KnowledgeResult};

/// Owner, sharing level, and optional read/write permission lists for a
/// knowledge object.
///
/// `sharing` is a service-defined level such as `"user"`, `"app"`, or
/// `"global"`. Only non-emptiness is checked; membership is left to the
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControl {
    owner: String,
    sharing: String,
    perms_read: Option<String>,
    perms_write: Option<String>,
}

impl AccessControl {
    /// Creates a descriptor.
    ///
    /// `perms_read` and `perms_write` are comma-separated capability lists
    /// (e.g. `"admin,power"`). An empty string means "not set" and the key is
    /// left out of the encoding.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::Validation`] if `owner` is empty, then if `sharing`
    /// is empty.
    pub fn new(
        owner: impl Into<String>,
        sharing: impl Into<String>,
        perms_read: impl Into<String>,
        perms_write: impl Into<String>,
    ) -> KnowledgeResult<Self> {
        let owner = owner.into();
        if owner.is_empty() {
            return Err(KnowledgeError::Validation { field: "owner" });
        }
        let sharing = sharing.into();
        if sharing.is_empty() {
            return Err(KnowledgeError::Validation { field: "sharing" });
        }

        Ok(Self {
            owner,
            sharing,
            perms_read: non_empty(perms_read.into()),
            perms_write: non_empty(perms_write.into()),
        })
    }

    /// Returns the owning user.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the sharing level.
    pub fn sharing(&self) -> &str {
        &self.sharing
    }

    /// Returns the read capability list, or `None` when unset.
    pub fn perms_read(&self) -> Option<&str> {
        self.perms_read.as_deref()
    }

    /// Returns the write capability list, or `None` when unset.
    pub fn perms_write(&self) -> Option<&str> {
        self.perms_write.as_deref()
    }

    /// Encodes the descriptor as an `application/x-www-form-urlencoded` body.
    ///
    /// Keys are emitted in the order `owner`, `sharing`, `perms.read`,
    /// `perms.write`; unset permission lists are omitted.
    pub fn encode(&self) -> String {
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("owner", &self.owner);
        form.append_pair("sharing", &self.sharing);
        if let Some(read) = &self.perms_read {
            form.append_pair("perms.read", read);
        }
        if let Some(write) = &self.perms_write {
            form.append_pair("perms.write", write);
        }
        form.finish()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    fn decode(encoded: &str) -> HashMap<String, String> {
        form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect()
    }

    #[test]
    fn empty_owner_is_rejected() {
        let err = AccessControl::new("", "app", "*", "admin").unwrap_err();
        assert!(matches!(err, KnowledgeError::Validation { field: "owner" }));
    }

    #[test]
    fn empty_sharing_is_rejected() {
        let err = AccessControl::new("admin", "", "", "").unwrap_err();
        assert!(matches!(err, KnowledgeError::Validation { field: "sharing" }));
    }

    #[test]
    fn owner_is_checked_before_sharing() {
        let err = AccessControl::new("", "", "", "").unwrap_err();
        assert!(matches!(err, KnowledgeError::Validation { field: "owner" }));
    }

    #[test]
    fn empty_permissions_are_treated_as_unset() {
        let acl = AccessControl::new("nobody", "global", "", "").unwrap();
        assert_eq!(acl.perms_read(), None);
        assert_eq!(acl.perms_write(), None);
        assert_eq!(acl.encode(), "owner=nobody&sharing=global");
    }

    #[test]
    fn accessors_return_the_constructed_values() {
        let acl = AccessControl::new("admin", "app", "*", "admin,power").unwrap();
        assert_eq!(acl.owner(), "admin");
        assert_eq!(acl.sharing(), "app");
        assert_eq!(acl.perms_read(), Some("*"));
        assert_eq!(acl.perms_write(), Some("admin,power"));
    }

    #[test]
    fn encoding_escapes_permission_lists() {
        let acl = AccessControl::new("admin", "app", "admin,power", "admin").unwrap();
        assert_eq!(
            acl.encode(),
            "owner=admin&sharing=app&perms.read=admin%2Cpower&perms.write=admin"
        );
    }

    proptest! {
        #[test]
        fn construction_succeeds_for_any_non_empty_owner_and_sharing(
            owner in ".{1,24}",
            sharing in ".{1,24}",
            read in ".{0,24}",
            write in ".{0,24}",
        ) {
            prop_assert!(AccessControl::new(owner, sharing, read, write).is_ok());
        }

        #[test]
        fn empty_owner_fails_whatever_the_sharing(sharing in ".{0,24}") {
            let result = AccessControl::new("", sharing, "", "");
            let is_owner_error =
                matches!(result, Err(KnowledgeError::Validation { field: "owner" }));
            prop_assert!(is_owner_error);
        }

        #[test]
        fn empty_sharing_fails_whatever_the_owner(owner in ".{1,24}") {
            let result = AccessControl::new(owner, "", "", "");
            let is_sharing_error =
                matches!(result, Err(KnowledgeError::Validation { field: "sharing" }));
            prop_assert!(is_sharing_error);
        }

        #[test]
        fn encoding_decodes_back_to_the_inputs(
            owner in ".{1,24}",
            sharing in ".{1,24}",
            read in ".{0,24}",
            write in ".{0,24}",
        ) {
            let acl =
                AccessControl::new(owner.clone(), sharing.clone(), read.clone(), write.clone())
                    .unwrap();
            let encoded = acl.encode();
            let fields = decode(&encoded);

            prop_assert_eq!(fields.get("owner"), Some(&owner));
            prop_assert_eq!(fields.get("sharing"), Some(&sharing));
            prop_assert_eq!(fields.get("perms.read").is_some(), !read.is_empty());
            prop_assert_eq!(fields.get("perms.write").is_some(), !write.is_empty());
            if !read.is_empty() {
                prop_assert_eq!(fields.get("perms.read"), Some(&read));
            }
            if !write.is_empty() {
                prop_assert_eq!(fields.get("perms.write"), Some(&write));
            }

            // Identical inputs always produce identical output.
            prop_assert_eq!(encoded, acl.clone().encode());
        }
    }
}
