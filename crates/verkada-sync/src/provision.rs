//! Single membership grant and revoke from the command line

use tokio_util::sync::CancellationToken;
use tracing::info;

use verkada_connector::{member_entitlement, VerkadaConnector};
use verkada_core::{
    Grant, GroupProfile, GroupTrait, Resource, ResourceId, ResourceProvisioner, ResourceSyncer,
    Result, UserProfile, UserStatus, UserTrait, VerkadaError, GROUP_RESOURCE_TYPE,
    USER_RESOURCE_TYPE,
};

/// Group resource known only by id; the membership calls need nothing more
fn group_ref(group_id: &str) -> Result<Resource> {
    let id = ResourceId::new(&GROUP_RESOURCE_TYPE, group_id)?;

    Ok(Resource::group(
        id,
        group_id,
        GroupTrait {
            profile: GroupProfile {
                group_name: group_id.to_string(),
                group_id: group_id.to_string(),
            },
        },
    ))
}

fn user_ref(user_id: &str) -> Result<Resource> {
    let id = ResourceId::new(&USER_RESOURCE_TYPE, user_id)?;

    Ok(Resource::user(
        id,
        user_id,
        UserTrait {
            profile: UserProfile {
                user_id: user_id.to_string(),
                ..Default::default()
            },
            emails: vec![],
            status: UserStatus::Enabled,
        },
    ))
}

pub async fn grant_membership(
    connector: &VerkadaConnector,
    cancel: &CancellationToken,
    group_id: &str,
    user_id: &str,
) -> Result<Grant> {
    let group = group_ref(group_id)?;
    let principal = user_ref(user_id)?;
    let entitlement = member_entitlement(&group);

    provisioner(connector)?
        .grant(cancel, &principal, &entitlement)
        .await?;

    info!(group_id, user_id, "Granted group membership");
    Ok(Grant::new(entitlement, principal.id))
}

pub async fn revoke_membership(
    connector: &VerkadaConnector,
    cancel: &CancellationToken,
    group_id: &str,
    user_id: &str,
) -> Result<Grant> {
    let group = group_ref(group_id)?;
    let grant = Grant::new(member_entitlement(&group), user_ref(user_id)?.id);

    provisioner(connector)?.revoke(cancel, &grant).await?;

    info!(group_id, user_id, "Revoked group membership");
    Ok(grant)
}

fn provisioner(connector: &VerkadaConnector) -> Result<&dyn ResourceProvisioner> {
    connector
        .groups()
        .as_provisioner()
        .ok_or_else(|| VerkadaError::invalid_resource("groups cannot be provisioned"))
}
