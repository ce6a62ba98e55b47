//! Access Control operations the connector depends on

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use verkada_core::{GroupId, Result, UserId};

use crate::models::{Group, User, UserAccess};

/// One method per upstream operation.
///
/// Implementations hold no per-call state and are shared across syncers.
#[async_trait]
pub trait AccessApi: Send + Sync {
    /// All access users
    async fn list_users(&self, cancel: &CancellationToken) -> Result<Vec<User>>;

    /// All access groups. Member lists on the returned groups are unreliable.
    async fn list_groups(&self, cancel: &CancellationToken) -> Result<Vec<Group>>;

    /// The access record of a single user
    async fn get_user_access(&self, cancel: &CancellationToken, user_id: &UserId) -> Result<UserAccess>;

    /// Adds a user to a group; fails with `MutationRejected` when upstream
    /// reports the add as unsuccessful
    async fn add_user_to_group(
        &self,
        cancel: &CancellationToken,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<()>;

    async fn remove_user_from_group(
        &self,
        cancel: &CancellationToken,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<()>;
}
