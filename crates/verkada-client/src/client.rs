//! HTTP implementation of [`AccessApi`] against the Verkada REST API

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use verkada_core::{GroupId, Result, UserId, VerkadaError};

use crate::api::AccessApi;
use crate::http::HttpClient;
use crate::models::*;

pub const BASE_URL: &str = "https://api.verkada.com";

const API_KEY_HEADER: &str = "x-api-key";
const JSON: &str = "application/json";

const ACCESS_USERS_PATH: &str = "/access/v1/access_users";
const ACCESS_USER_PATH: &str = "/access/v1/access_users/user";
const ACCESS_GROUPS_PATH: &str = "/access/v1/access_groups";
const GROUP_USER_PATH: &str = "/access/v1/access_groups/group/user";

/// Verkada Access Control client
///
/// Holds only the transport and the API key, so a single instance can be
/// shared between concurrent syncers.
#[derive(Clone)]
pub struct VerkadaClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
}

impl VerkadaClient {
    /// Create a client; a blank API key is rejected before any request is made
    pub fn new(http: HttpClient, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(VerkadaError::config_error("api key must not be empty"));
        }

        Ok(Self {
            http,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at another API host (regional endpoints, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(method = method.as_str(), path, "Verkada API request");

        self.http
            .inner()
            .request(method, format!("{}{}", self.base_url, path))
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .header(API_KEY_HEADER, &self.api_key)
    }

    /// Send a request; anything but 200 is an upstream failure
    async fn execute(&self, cancel: &CancellationToken, request: RequestBuilder) -> Result<Response> {
        let response = self.http.send(cancel, request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(VerkadaError::upstream_status(
                status.as_u16(),
                format!("failed with status: {}", status),
            ));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        response: Response,
    ) -> Result<T> {
        let body = self.http.read_body(cancel, response).await?;

        serde_json::from_slice(&body)
            .map_err(|e| VerkadaError::decode_error(format!("Failed to parse Verkada response: {}", e)))
    }
}

impl fmt::Debug for VerkadaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerkadaClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl AccessApi for VerkadaClient {
    #[instrument(skip(self, cancel))]
    async fn list_users(&self, cancel: &CancellationToken) -> Result<Vec<User>> {
        let response = self
            .execute(cancel, self.request(Method::GET, ACCESS_USERS_PATH))
            .await?;
        let body: ListUsersResponse = self.decode(cancel, response).await?;

        debug!("Fetched {} access users", body.access_members.len());
        Ok(body.access_members)
    }

    #[instrument(skip(self, cancel))]
    async fn list_groups(&self, cancel: &CancellationToken) -> Result<Vec<Group>> {
        let response = self
            .execute(cancel, self.request(Method::GET, ACCESS_GROUPS_PATH))
            .await?;
        let body: ListGroupsResponse = self.decode(cancel, response).await?;

        debug!("Fetched {} access groups", body.access_groups.len());
        Ok(body.access_groups)
    }

    #[instrument(skip(self, cancel), fields(user_id = %user_id))]
    async fn get_user_access(&self, cancel: &CancellationToken, user_id: &UserId) -> Result<UserAccess> {
        let request = self
            .request(Method::GET, ACCESS_USER_PATH)
            .query(&[("user_id", user_id.as_str())]);

        let response = self.execute(cancel, request).await?;
        self.decode(cancel, response).await
    }

    #[instrument(skip(self, cancel), fields(group_id = %group_id, user_id = %user_id))]
    async fn add_user_to_group(
        &self,
        cancel: &CancellationToken,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<()> {
        let payload = serde_json::to_vec(&AddUserRequest {
            user_id: user_id.as_str(),
        })
        .map_err(|e| VerkadaError::decode_error(format!("Failed to encode request: {}", e)))?;

        let request = self
            .request(Method::PUT, GROUP_USER_PATH)
            .query(&[("group_id", group_id.as_str())])
            .body(payload);

        let response = self.execute(cancel, request).await?;
        let body: AddUserResponse = self.decode(cancel, response).await?;

        if body.rejected(user_id) {
            warn!("Verkada reported the add as unsuccessful");
            return Err(VerkadaError::mutation_rejected(group_id.as_str(), user_id.as_str()));
        }

        Ok(())
    }

    #[instrument(skip(self, cancel), fields(group_id = %group_id, user_id = %user_id))]
    async fn remove_user_from_group(
        &self,
        cancel: &CancellationToken,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<()> {
        let request = self
            .request(Method::DELETE, GROUP_USER_PATH)
            .query(&[("group_id", group_id.as_str()), ("user_id", user_id.as_str())]);

        // Removal answers with an empty body; nothing to decode.
        self.execute(cancel, request).await?;
        Ok(())
    }
}
