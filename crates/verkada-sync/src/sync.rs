//! One-shot sync pass over every resource syncer

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use verkada_core::{
    Connector, ConnectorMetadata, Entitlement, Grant, Page, Resource, ResourceSyncer, Result,
};

/// Everything one pass observed upstream
#[derive(Debug, Clone, Serialize)]
pub struct SyncSnapshot {
    pub connector: ConnectorMetadata,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub counts: SyncCounts,
    pub resources: Vec<Resource>,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncCounts {
    pub resources: usize,
    pub entitlements: usize,
    pub grants: usize,
}

/// Run list, entitlements and grants for each syncer in registration order.
///
/// Any error aborts the pass; a resolution that skipped individual users
/// still counts as success.
#[instrument(skip_all)]
pub async fn run_sync(connector: &dyn Connector, cancel: &CancellationToken) -> Result<SyncSnapshot> {
    let started_at = Utc::now();
    let metadata = connector.metadata();
    info!("Starting sync for {}", metadata.display_name);

    let mut resources = Vec::new();
    let mut entitlements = Vec::new();
    let mut grants = Vec::new();

    for syncer in connector.resource_syncers() {
        let listed = list_all(syncer.as_ref(), cancel).await?;
        let before = (entitlements.len(), grants.len());

        for resource in &listed {
            entitlements.extend(entitlements_all(syncer.as_ref(), cancel, resource).await?);
            grants.extend(grants_all(syncer.as_ref(), cancel, resource).await?);
        }

        info!(
            resource_type = syncer.resource_type().id,
            "Synced {} resources, {} entitlements, {} grants",
            listed.len(),
            entitlements.len() - before.0,
            grants.len() - before.1
        );
        resources.extend(listed);
    }

    let counts = SyncCounts {
        resources: resources.len(),
        entitlements: entitlements.len(),
        grants: grants.len(),
    };
    info!("Sync completed: {:?}", counts);

    Ok(SyncSnapshot {
        connector: metadata,
        started_at,
        completed_at: Utc::now(),
        counts,
        resources,
        entitlements,
        grants,
    })
}

/// Takes the next token from a page, treating an empty token as the end
fn next_token(next_page_token: Option<String>) -> Option<String> {
    next_page_token.filter(|t| !t.is_empty())
}

async fn list_all(syncer: &dyn ResourceSyncer, cancel: &CancellationToken) -> Result<Vec<Resource>> {
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let Page { items: page, next_page_token, .. } =
            syncer.list(cancel, None, token.as_deref()).await?;
        items.extend(page);

        match next_token(next_page_token) {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}

async fn entitlements_all(
    syncer: &dyn ResourceSyncer,
    cancel: &CancellationToken,
    resource: &Resource,
) -> Result<Vec<Entitlement>> {
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let Page { items: page, next_page_token, .. } =
            syncer.entitlements(cancel, resource, token.as_deref()).await?;
        items.extend(page);

        match next_token(next_page_token) {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}

async fn grants_all(
    syncer: &dyn ResourceSyncer,
    cancel: &CancellationToken,
    resource: &Resource,
) -> Result<Vec<Grant>> {
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let Page { items: page, next_page_token, .. } =
            syncer.grants(cancel, resource, token.as_deref()).await?;
        items.extend(page);

        match next_token(next_page_token) {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}
