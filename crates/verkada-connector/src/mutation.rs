//! Group membership writes

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use verkada_client::AccessApi;
use verkada_core::{GroupId, ResourceId, Result, UserId, VerkadaError, USER_RESOURCE_TYPE};

/// Adds and removes single user↔group memberships.
///
/// Each call is one upstream request with no retry, rollback or
/// pre-existence check; upstream failures are returned unchanged.
pub struct MembershipMutator {
    client: Arc<dyn AccessApi>,
}

impl MembershipMutator {
    pub fn new(client: Arc<dyn AccessApi>) -> Self {
        Self { client }
    }

    #[instrument(skip(self, cancel), fields(group_id = %group_id, principal = %principal))]
    pub async fn grant(
        &self,
        cancel: &CancellationToken,
        group_id: &GroupId,
        principal: &ResourceId,
    ) -> Result<()> {
        let user_id = user_principal(principal, "only users can be granted group membership")?;

        self.client
            .add_user_to_group(cancel, group_id, &user_id)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to add user to group"))?;

        info!("Added user to group");
        Ok(())
    }

    /// Removing a membership that does not exist is left to upstream to judge
    #[instrument(skip(self, cancel), fields(group_id = %group_id, principal = %principal))]
    pub async fn revoke(
        &self,
        cancel: &CancellationToken,
        group_id: &GroupId,
        principal: &ResourceId,
    ) -> Result<()> {
        let user_id = user_principal(principal, "only users can have group membership revoked")?;

        self.client
            .remove_user_from_group(cancel, group_id, &user_id)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to remove user from group"))?;

        info!("Removed user from group");
        Ok(())
    }
}

fn user_principal(principal: &ResourceId, rejection: &str) -> Result<UserId> {
    if !principal.is_type(&USER_RESOURCE_TYPE) {
        warn!(
            principal_type = %principal.resource_type,
            principal_id = %principal.resource,
            "{}",
            rejection
        );
        return Err(VerkadaError::unsupported_principal(&principal.resource_type));
    }

    Ok(UserId::new(principal.resource.as_str()))
}
