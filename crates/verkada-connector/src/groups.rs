//! Access group syncer and provisioner

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use verkada_client::AccessApi;
use verkada_core::{
    Annotations, Entitlement, Grant, GroupId, Page, Resource, ResourceId, ResourceProvisioner,
    ResourceSyncer, ResourceType, Result, VerkadaError, GROUP_RESOURCE_TYPE, USER_RESOURCE_TYPE,
};

use crate::mapper::{group_resource, user_resource};
use crate::membership::MembershipResolver;
use crate::mutation::MembershipMutator;

pub const MEMBER_ENTITLEMENT: &str = "member";

pub struct GroupSyncer {
    client: Arc<dyn AccessApi>,
    resolver: MembershipResolver,
    mutator: MembershipMutator,
}

impl GroupSyncer {
    pub fn new(client: Arc<dyn AccessApi>) -> Self {
        Self {
            resolver: MembershipResolver::new(client.clone()),
            mutator: MembershipMutator::new(client.clone()),
            client,
        }
    }

    pub fn with_membership_concurrency(mut self, concurrency: usize) -> Self {
        self.resolver = self.resolver.with_concurrency(concurrency);
        self
    }

    pub fn resolver(&self) -> &MembershipResolver {
        &self.resolver
    }
}

/// The `member` entitlement every access group exposes
pub fn member_entitlement(group: &Resource) -> Entitlement {
    Entitlement::assignment(group, MEMBER_ENTITLEMENT)
        .with_grantable_to(&USER_RESOURCE_TYPE)
        .with_display_name(format!("{} Group {}", group.display_name, MEMBER_ENTITLEMENT))
        .with_description(format!(
            "{} of {} Verkada group",
            MEMBER_ENTITLEMENT, group.display_name
        ))
}

fn group_id_of(resource: &Resource) -> Result<GroupId> {
    if !resource.id.is_type(&GROUP_RESOURCE_TYPE) {
        return Err(VerkadaError::invalid_resource(format!(
            "expected a group resource, got {}",
            resource.id
        )));
    }

    Ok(GroupId::new(resource.id.resource.as_str()))
}

#[async_trait]
impl ResourceSyncer for GroupSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &GROUP_RESOURCE_TYPE
    }

    /// All access groups, in a single page
    #[instrument(skip(self, cancel, _parent, _page_token))]
    async fn list(
        &self,
        cancel: &CancellationToken,
        _parent: Option<&ResourceId>,
        _page_token: Option<&str>,
    ) -> Result<Page<Resource>> {
        let groups = self.client.list_groups(cancel).await?;
        info!("Fetched {} access groups from Verkada", groups.len());

        let resources = groups
            .iter()
            .map(group_resource)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::complete(resources))
    }

    async fn entitlements(
        &self,
        _cancel: &CancellationToken,
        resource: &Resource,
        _page_token: Option<&str>,
    ) -> Result<Page<Entitlement>> {
        Ok(Page::complete(vec![member_entitlement(resource)]))
    }

    /// One `member` grant per user whose access record names this group.
    ///
    /// Users whose access record could not be fetched are left out. They are
    /// logged by the resolver and deliberately not reported as annotations.
    #[instrument(skip(self, cancel, resource, _page_token), fields(group_id = %resource.id.resource))]
    async fn grants(
        &self,
        cancel: &CancellationToken,
        resource: &Resource,
        _page_token: Option<&str>,
    ) -> Result<Page<Grant>> {
        let group_id = group_id_of(resource)?;
        let resolution = self.resolver.resolve(cancel, &group_id).await?;
        let entitlement = member_entitlement(resource);

        let grants = resolution
            .members
            .iter()
            .map(|user| {
                let principal = user_resource(user)?;
                Ok(Grant::new(entitlement.clone(), principal.id))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::complete(grants))
    }

    fn as_provisioner(&self) -> Option<&dyn ResourceProvisioner> {
        Some(self)
    }
}

#[async_trait]
impl ResourceProvisioner for GroupSyncer {
    async fn grant(
        &self,
        cancel: &CancellationToken,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> Result<Annotations> {
        let group_id = group_id_of(&entitlement.resource)?;
        self.mutator.grant(cancel, &group_id, &principal.id).await?;

        Ok(Annotations::new())
    }

    async fn revoke(&self, cancel: &CancellationToken, grant: &Grant) -> Result<Annotations> {
        let group_id = group_id_of(&grant.entitlement.resource)?;
        self.mutator.revoke(cancel, &group_id, &grant.principal).await?;

        Ok(Annotations::new())
    }
}
