//! Group membership resolution
//!
//! The group listing endpoint does not reliably enumerate members, so
//! membership is derived per user: list every access user, fetch each user's
//! access record and keep the users whose record names the target group.
//! This costs one access-record call per user for every group resolved.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use verkada_client::{AccessApi, User};
use verkada_core::{GroupId, Result, UserId};

/// A user whose access record could not be fetched during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub user_id: UserId,
    pub reason: String,
}

/// Members of one group, in user-listing order
#[derive(Debug, Clone, Default)]
pub struct MembershipResolution {
    pub members: Vec<User>,
    /// Users left out because their access record failed to load
    pub skipped: Vec<SkippedRecord>,
}

impl MembershipResolution {
    pub fn member_ids(&self) -> Vec<&UserId> {
        self.members.iter().map(|u| &u.user_id).collect()
    }

    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

pub struct MembershipResolver {
    client: Arc<dyn AccessApi>,
    concurrency: usize,
}

impl MembershipResolver {
    /// Sequential resolver: one access-record call in flight at a time
    pub fn new(client: Arc<dyn AccessApi>) -> Self {
        Self {
            client,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` access-record calls in flight. Results are
    /// still consumed in user-listing order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Resolve the members of `group_id`.
    ///
    /// A failed access-record fetch skips that user and is recorded in
    /// [`MembershipResolution::skipped`]. Failing to list users and
    /// cancellation abort the resolution.
    #[instrument(skip(self, cancel), fields(group_id = %group_id))]
    pub async fn resolve(
        &self,
        cancel: &CancellationToken,
        group_id: &GroupId,
    ) -> Result<MembershipResolution> {
        let users = self.client.list_users(cancel).await?;
        let user_count = users.len();

        let client = &self.client;
        let mut lookups = stream::iter(users)
            .map(|user| async move {
                let access = client.get_user_access(cancel, &user.user_id).await;
                (user, access)
            })
            .buffered(self.concurrency);

        let mut resolution = MembershipResolution::default();

        while let Some((user, access)) = lookups.next().await {
            match access {
                Ok(access) => {
                    if access.is_member_of(group_id) {
                        resolution.members.push(user);
                    }
                }
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    warn!(
                        user_id = %user.user_id,
                        group_id = %group_id,
                        error = %e,
                        "error fetching user access information, skipping user grant for group membership"
                    );
                    resolution.skipped.push(SkippedRecord {
                        user_id: user.user_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            "Resolved {} members from {} users ({} skipped)",
            resolution.members.len(),
            user_count,
            resolution.skipped.len()
        );

        Ok(resolution)
    }
}
