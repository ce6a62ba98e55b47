//! Integration tests for the Verkada client using wiremock.

use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use verkada_client::{AccessApi, HttpClient, VerkadaClient};
use verkada_core::{GroupId, UserId, VerkadaError};

// =============================================================================
// Test Helpers
// =============================================================================

const API_KEY: &str = "test-api-key";

fn client_for(server: &MockServer) -> VerkadaClient {
    VerkadaClient::new(HttpClient::new(Some(5)).unwrap(), API_KEY)
        .unwrap()
        .with_base_url(server.uri())
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_users_sends_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users"))
        .and(header("x-api-key", API_KEY))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_members": [
                {"user_id": "u1", "full_name": "Ada Lovelace", "email": "ada@example.com", "employee_id": "E1"},
                {"user_id": "u2", "full_name": "Madonna", "email": "madonna@example.com", "employee_id": null},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = client_for(&server)
        .list_users(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].user_id, UserId::new("u1"));
    assert_eq!(users[0].employee_id, "E1");
    assert_eq!(users[1].employee_id, "");
}

#[tokio::test]
async fn test_list_groups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_groups": [
                {"group_id": "g1", "name": "Lobby"},
                {"group_id": "g2", "name": "Server Room", "user_ids": ["u1"]},
            ]
        })))
        .mount(&server)
        .await;

    let groups = client_for(&server)
        .list_groups(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].group_id, GroupId::new("g1"));
    assert!(groups[0].user_ids.is_none());
    assert_eq!(groups[1].user_ids.as_deref(), Some(&["u1".to_string()][..]));
}

#[tokio::test]
async fn test_non_200_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_users(&CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("failed with status: 401 Unauthorized"));
}

#[tokio::test]
async fn test_other_success_codes_are_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_groups"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"access_groups": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_groups(&CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(202));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_users(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, VerkadaError::DecodeError { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_missing_array_field_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_users(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, VerkadaError::DecodeError { .. }), "got {err:?}");
}

// =============================================================================
// Access Records
// =============================================================================

#[tokio::test]
async fn test_get_user_access_passes_user_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users/user"))
        .and(query_param("user_id", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "u1",
            "access_groups": [{"group_id": "g1", "name": "Lobby"}],
            "ble_unlock": true,
            "remote_unlock": true,
            "entry_code": null,
            "external_id": null,
            "start_date": null,
            "end_date": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let access = client_for(&server)
        .get_user_access(&CancellationToken::new(), &UserId::new("u1"))
        .await
        .unwrap();

    assert!(access.is_member_of(&GroupId::new("g1")));
    assert!(access.remote_unlock);
}

#[tokio::test]
async fn test_get_unknown_user_access_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users/user"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_user_access(&CancellationToken::new(), &UserId::new("missing"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_add_user_to_group_success() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/access/v1/access_groups/group/user"))
        .and(query_param("group_id", "g1"))
        .and(body_json(json!({"user_id": "u1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "group_id": "g1",
            "name": "Lobby",
            "successful_adds": ["u1"],
            "unsuccessful_adds": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .add_user_to_group(&CancellationToken::new(), &GroupId::new("g1"), &UserId::new("u1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_user_to_group_reported_unsuccessful() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/access/v1/access_groups/group/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "group_id": "g1",
            "name": "Lobby",
            "successful_adds": [],
            "unsuccessful_adds": ["u1"],
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .add_user_to_group(&CancellationToken::new(), &GroupId::new("g1"), &UserId::new("u1"))
        .await
        .unwrap_err();

    match err {
        VerkadaError::MutationRejected { group_id, user_id } => {
            assert_eq!(group_id, "g1");
            assert_eq!(user_id, "u1");
        }
        other => panic!("expected MutationRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_remove_user_from_group_ignores_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/access/v1/access_groups/group/user"))
        .and(query_param("group_id", "g1"))
        .and(query_param("user_id", "u1"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .remove_user_from_group(&CancellationToken::new(), &GroupId::new("g1"), &UserId::new("u1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_user_from_group_failure() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/access/v1/access_groups/group/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .remove_user_from_group(&CancellationToken::new(), &GroupId::new("g1"), &UserId::new("u1"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

// =============================================================================
// Construction & Cancellation
// =============================================================================

#[test]
fn test_blank_api_key_rejected() {
    let err = VerkadaClient::new(HttpClient::default(), "  ").unwrap_err();
    assert!(matches!(err, VerkadaError::ConfigError { .. }));
}

#[test]
fn test_debug_redacts_api_key() {
    let client = VerkadaClient::new(HttpClient::default(), API_KEY).unwrap();
    let rendered = format!("{client:?}");
    assert!(!rendered.contains(API_KEY));
    assert_eq!(client.base_url(), "https://api.verkada.com");
}

#[tokio::test]
async fn test_cancelled_token_skips_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_members": []})))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client_for(&server).list_users(&cancel).await.unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_members": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = client_for(&server).list_users(&cancel).await.unwrap_err();
    assert!(err.is_cancelled(), "got {err:?}");
}

#[tokio::test]
async fn test_slow_response_without_timeout_completes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_members": []}))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let client = VerkadaClient::new(HttpClient::new(None).unwrap(), API_KEY)
        .unwrap()
        .with_base_url(server.uri());

    let users = client.list_users(&CancellationToken::new()).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_configured_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access/v1/access_users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_members": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = VerkadaClient::new(HttpClient::new(Some(1)).unwrap(), API_KEY)
        .unwrap()
        .with_base_url(server.uri());

    let err = client.list_users(&CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, VerkadaError::UpstreamError { status: None, .. }), "got {err:?}");
}
