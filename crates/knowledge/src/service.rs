//! Port trait for knowledge-object operations.
//!
//! Infrastructure crates implement [`KnowledgeService`]; callers depend only
//! on this trait. Every method is a single stateless round trip, except
//! [`KnowledgeService::create_extraction`] with an ACL, which issues two
//! sequential, non-transactional requests.

use async_trait::async_trait;

use crate::{AccessControl, CreateOutcome, ExtractionKey, KnowledgeResult, ListOptions, Record};

/// Operations on field extractions, transforms, and extraction ACLs.
#[async_trait]
pub trait KnowledgeService: Send + Sync {
    /// Lists the field extractions visible to the authenticated user.
    async fn list_extractions(&self, opts: Option<&ListOptions>) -> KnowledgeResult<Vec<Record>>;

    /// Lists the transforms extractions visible to the authenticated user.
    async fn list_transforms(&self, opts: Option<&ListOptions>) -> KnowledgeResult<Vec<Record>>;

    /// Creates a field extraction and, if `acl` is given, applies it afterwards.
    ///
    /// # Partial failure
    ///
    /// The two requests are not transactional. If the create succeeds and the
    /// ACL request fails, the extraction exists without the ACL and the call
    /// returns [`crate::KnowledgeError::AclNotApplied`]. Nothing is rolled
    /// back; retry with [`KnowledgeService::set_extraction_acl`].
    async fn create_extraction(
        &self,
        name: &str,
        key: &ExtractionKey,
        acl: Option<&AccessControl>,
    ) -> KnowledgeResult<CreateOutcome>;

    /// Applies `acl` to an existing extraction.
    async fn set_extraction_acl(
        &self,
        key: &ExtractionKey,
        acl: &AccessControl,
    ) -> KnowledgeResult<()>;

    /// Deletes a field extraction.
    ///
    /// Not idempotent on the client side: deleting a missing extraction
    /// surfaces whatever the service returns (typically a 404 request error).
    async fn delete_extraction(&self, key: &ExtractionKey) -> KnowledgeResult<()>;
}
