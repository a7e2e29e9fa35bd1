//! Template resource client

use std::sync::Arc;

use tracing::instrument;

use meplus_types::{CreateTemplate, ListQuery, ListResponse, Template, TemplateId};

use crate::cache::{params_key, ResourceCache, ResourceTag};
use crate::gateway::RequestGateway;
use crate::{ClientError, Result};

/// Client for template operations.
#[derive(Clone)]
pub struct TemplateClient {
    gateway: Arc<RequestGateway>,
    cache: Arc<ResourceCache>,
}

impl TemplateClient {
    pub(crate) fn new(gateway: Arc<RequestGateway>, cache: Arc<ResourceCache>) -> Self {
        Self { gateway, cache }
    }

    /// List templates, served from cache until the Template tag is
    /// invalidated.
    #[instrument(skip(self, query), level = "debug")]
    pub async fn list(&self, query: &ListQuery) -> Result<Arc<ListResponse<Template>>> {
        let key = params_key(query)?;
        let gateway = self.gateway.clone();
        let query = query.clone();
        self.cache
            .get_or_fetch_templates(&key, move || async move {
                gateway.get_with_query("/templates", &query).await
            })
            .await
    }

    /// Fetch a single template.
    #[instrument(skip(self), level = "debug")]
    pub async fn get(&self, id: TemplateId) -> Result<Template> {
        self.gateway.get(&format!("/templates/{id}")).await
    }

    /// Save a new template.
    #[instrument(skip(self, request), level = "debug")]
    pub async fn save(&self, request: &CreateTemplate) -> Result<Template> {
        if request.name.trim().is_empty() {
            return Err(ClientError::Validation(
                "template name must not be empty".to_string(),
            ));
        }
        if request.prompt.trim().is_empty() {
            return Err(ClientError::Validation(
                "template prompt must not be empty".to_string(),
            ));
        }

        let template: Template = self.gateway.post("/templates", request).await?;
        self.cache.invalidate(ResourceTag::Template);
        Ok(template)
    }

    /// Delete a template.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete(&self, id: TemplateId) -> Result<()> {
        self.gateway.delete(&format!("/templates/{id}")).await?;
        self.cache.invalidate(ResourceTag::Template);
        Ok(())
    }
}

impl std::fmt::Debug for TemplateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateClient").finish()
    }
}
