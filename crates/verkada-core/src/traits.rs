//! Traits forming the boundary with the sync engine

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::{error::Result, ids::*, models::*};

// =============================================================================
// Syncer Traits
// =============================================================================

/// Lists one resource type together with its entitlements and grants.
///
/// Every method receives the caller's cancellation token and an opaque page
/// token, which implementations may ignore when they return complete results.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    fn resource_type(&self) -> &'static ResourceType;

    async fn list(
        &self,
        cancel: &CancellationToken,
        parent: Option<&ResourceId>,
        page_token: Option<&str>,
    ) -> Result<Page<Resource>>;

    async fn entitlements(
        &self,
        cancel: &CancellationToken,
        resource: &Resource,
        page_token: Option<&str>,
    ) -> Result<Page<Entitlement>>;

    async fn grants(
        &self,
        cancel: &CancellationToken,
        resource: &Resource,
        page_token: Option<&str>,
    ) -> Result<Page<Grant>>;

    /// Syncers that can also write memberships back upstream return themselves here
    fn as_provisioner(&self) -> Option<&dyn ResourceProvisioner> {
        None
    }
}

/// Writes entitlement changes back to the upstream system
#[async_trait]
pub trait ResourceProvisioner: Send + Sync {
    async fn grant(
        &self,
        cancel: &CancellationToken,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> Result<Annotations>;

    async fn revoke(&self, cancel: &CancellationToken, grant: &Grant) -> Result<Annotations>;
}

// =============================================================================
// Connector Trait
// =============================================================================

#[async_trait]
pub trait Connector: Send + Sync {
    fn metadata(&self) -> ConnectorMetadata;

    /// Exercises the configured credentials without mutating upstream state
    async fn validate(&self, cancel: &CancellationToken) -> Result<Annotations>;

    fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>>;

    /// Finds the syncer responsible for a resource type
    fn syncer_for(&self, resource_type: &str) -> Option<Arc<dyn ResourceSyncer>> {
        self.resource_syncers()
            .into_iter()
            .find(|s| s.resource_type().is(resource_type))
    }
}
