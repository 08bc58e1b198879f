//! [`KnowledgeService`] over the Splunk REST API.

use async_trait::async_trait;
use knowledge::{
    AccessControl, CreateOutcome, ExtractionKey, KnowledgeError, KnowledgeResult,
    KnowledgeService, ListOptions, Record, EXTRACTIONS_PATH, TRANSFORMS_PATH,
};
use url::form_urlencoded;

use crate::client::SplunkClient;

impl SplunkClient {
    async fn list_records(
        &self,
        path: &str,
        opts: Option<&ListOptions>,
    ) -> KnowledgeResult<Vec<Record>> {
        let query = opts.map(ListOptions::to_query).unwrap_or_default();
        let envelope = self.get(path, &query).await?;
        let records: Vec<Record> = envelope.decode_entry()?;
        tracing::debug!(path, count = records.len(), "listed knowledge objects");
        Ok(records)
    }
}

/// Form body for a new extraction, fields in the order the service documents them.
fn extraction_form(name: &str, key: &ExtractionKey) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name)
        .append_pair("stanza", &key.stanza)
        .append_pair("type", &key.kind)
        .append_pair("value", &key.value)
        .finish()
}

#[async_trait]
impl KnowledgeService for SplunkClient {
    #[tracing::instrument(skip(self))]
    async fn list_extractions(&self, opts: Option<&ListOptions>) -> KnowledgeResult<Vec<Record>> {
        self.list_records(EXTRACTIONS_PATH, opts).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_transforms(&self, opts: Option<&ListOptions>) -> KnowledgeResult<Vec<Record>> {
        self.list_records(TRANSFORMS_PATH, opts).await
    }

    #[tracing::instrument(skip(self, acl), fields(resource = %key, with_acl = acl.is_some()))]
    async fn create_extraction(
        &self,
        name: &str,
        key: &ExtractionKey,
        acl: Option<&AccessControl>,
    ) -> KnowledgeResult<CreateOutcome> {
        self.post_form(EXTRACTIONS_PATH, extraction_form(name, key)).await?;
        tracing::info!("extraction created");

        let Some(acl) = acl else {
            return Ok(CreateOutcome::Created);
        };

        match self.set_extraction_acl(key, acl).await {
            Ok(()) => Ok(CreateOutcome::CreatedWithAcl),
            Err(source) => {
                tracing::warn!(error = %source, "extraction created without its ACL");
                Err(KnowledgeError::AclNotApplied {
                    resource: key.composite_name(),
                    source: Box::new(source),
                })
            }
        }
    }

    #[tracing::instrument(
        skip(self, acl),
        fields(resource = %key, owner = acl.owner(), sharing = acl.sharing())
    )]
    async fn set_extraction_acl(
        &self,
        key: &ExtractionKey,
        acl: &AccessControl,
    ) -> KnowledgeResult<()> {
        self.post_form(&key.acl_path(), acl.encode()).await?;
        tracing::info!("extraction ACL applied");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(resource = %key))]
    async fn delete_extraction(&self, key: &ExtractionKey) -> KnowledgeResult<()> {
        self.delete(&key.resource_path()).await?;
        tracing::info!("extraction deleted");
        Ok(())
    }
}
