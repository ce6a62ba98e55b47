//! User syncer

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use verkada_client::AccessApi;
use verkada_core::{
    Entitlement, Grant, Page, Resource, ResourceId, ResourceSyncer, ResourceType, Result,
    USER_RESOURCE_TYPE,
};

use crate::mapper::user_resource;

pub struct UserSyncer {
    client: Arc<dyn AccessApi>,
}

impl UserSyncer {
    pub fn new(client: Arc<dyn AccessApi>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &USER_RESOURCE_TYPE
    }

    /// All access users, in a single page
    #[instrument(skip(self, cancel, _parent, _page_token))]
    async fn list(
        &self,
        cancel: &CancellationToken,
        _parent: Option<&ResourceId>,
        _page_token: Option<&str>,
    ) -> Result<Page<Resource>> {
        let users = self.client.list_users(cancel).await?;
        info!("Fetched {} users from Verkada", users.len());

        let resources = users
            .iter()
            .map(user_resource)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::complete(resources))
    }

    /// Users carry no entitlements
    async fn entitlements(
        &self,
        _cancel: &CancellationToken,
        _resource: &Resource,
        _page_token: Option<&str>,
    ) -> Result<Page<Entitlement>> {
        Ok(Page::empty())
    }

    async fn grants(
        &self,
        _cancel: &CancellationToken,
        _resource: &Resource,
        _page_token: Option<&str>,
    ) -> Result<Page<Grant>> {
        Ok(Page::empty())
    }
}
