//! Connector facade exposing the user and group syncers

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use verkada_client::AccessApi;
use verkada_core::{
    Annotations, Connector, ConnectorMetadata, ResourceSyncer, Result, VerkadaError,
};

use crate::groups::GroupSyncer;
use crate::users::UserSyncer;

pub struct VerkadaConnector {
    client: Arc<dyn AccessApi>,
    users: Arc<UserSyncer>,
    groups: Arc<GroupSyncer>,
}

impl VerkadaConnector {
    pub fn new(client: Arc<dyn AccessApi>) -> Self {
        Self::with_membership_concurrency(client, 1)
    }

    /// `concurrency` bounds the access-record calls in flight while resolving
    /// one group's members
    pub fn with_membership_concurrency(client: Arc<dyn AccessApi>, concurrency: usize) -> Self {
        Self {
            users: Arc::new(UserSyncer::new(client.clone())),
            groups: Arc::new(
                GroupSyncer::new(client.clone()).with_membership_concurrency(concurrency),
            ),
            client,
        }
    }

    pub fn groups(&self) -> &GroupSyncer {
        &self.groups
    }
}

#[async_trait]
impl Connector for VerkadaConnector {
    fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Verkada connector".to_string(),
            description: "Connector syncing users and access groups from Verkada Access Control"
                .to_string(),
        }
    }

    /// Lists users once to prove the API key works
    #[instrument(skip(self, cancel))]
    async fn validate(&self, cancel: &CancellationToken) -> Result<Annotations> {
        match self.client.list_users(cancel).await {
            Ok(_) => {
                info!("Verkada API credentials validated");
                Ok(Annotations::new())
            }
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                error!(error = %e, "Verkada API credential validation failed");
                Err(VerkadaError::config_error(format!(
                    "failed to validate API credentials: {}",
                    e
                )))
            }
        }
    }

    fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>> {
        let users: Arc<dyn ResourceSyncer> = self.users.clone();
        let groups: Arc<dyn ResourceSyncer> = self.groups.clone();
        vec![users, groups]
    }
}
