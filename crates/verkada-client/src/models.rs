//! Verkada Access Control API types
//!
//! Field names match the wire format. String fields tolerate `null` and
//! absence, decoding to empty strings.

use serde::{Deserialize, Deserializer, Serialize};

use verkada_core::{GroupId, UserId};

/// An access user as returned by `GET /access/v1/access_users`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: UserId,
}

/// An access group. `user_ids` is not reliably populated by the listing
/// endpoint and must not be used to derive membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_id: GroupId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<String>>,
}

/// Per-user access record from `GET /access/v1/access_users/user`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAccess {
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_groups: Vec<Group>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ble_unlock: bool,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub entry_code: Option<String>,
    #[serde(default)]
    pub external_id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remote_unlock: bool,
    #[serde(default)]
    pub start_date: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: UserId,
}

impl UserAccess {
    /// Whether this record grants access through the given group
    pub fn is_member_of(&self, group_id: &GroupId) -> bool {
        self.access_groups.iter().any(|g| &g.group_id == group_id)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListUsersResponse {
    pub access_members: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListGroupsResponse {
    pub access_groups: Vec<Group>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddUserRequest<'a> {
    pub user_id: &'a str,
}

/// Response to `PUT /access/v1/access_groups/group/user`. A 200 response can
/// still report the add as unsuccessful for individual users.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddUserResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub successful_adds: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unsuccessful_adds: Vec<String>,
}

impl AddUserResponse {
    pub fn rejected(&self, user_id: &UserId) -> bool {
        self.unsuccessful_adds.iter().any(|u| u == user_id.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
