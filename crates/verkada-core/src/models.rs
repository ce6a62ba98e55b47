//! Normalized identity model: resources, entitlements and grants
//!
//! Every value here is rebuilt from upstream state on each sync pass. Nothing
//! is persisted by the connector; the sync engine owns diffing against
//! earlier passes.

use serde::{Deserialize, Serialize};

use crate::ids::*;

// =============================================================================
// Resources
// =============================================================================

/// A user or group projected into the identity graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    pub traits: ResourceTraits,
}

/// Typed profile attached to a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceTraits {
    User(UserTrait),
    Group(GroupTrait),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrait {
    pub profile: UserProfile,
    pub emails: Vec<Email>,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub user_id: String,
    pub employee_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub address: String,
    pub is_primary: bool,
}

/// Verkada has no disabled state for access users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Enabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTrait {
    pub profile: GroupProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupProfile {
    pub group_name: String,
    pub group_id: String,
}

impl Resource {
    pub fn user(id: ResourceId, display_name: impl Into<String>, user: UserTrait) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            traits: ResourceTraits::User(user),
        }
    }

    pub fn group(id: ResourceId, display_name: impl Into<String>, group: GroupTrait) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            traits: ResourceTraits::Group(group),
        }
    }

    pub fn user_trait(&self) -> Option<&UserTrait> {
        match &self.traits {
            ResourceTraits::User(user) => Some(user),
            ResourceTraits::Group(_) => None,
        }
    }

    pub fn group_trait(&self) -> Option<&GroupTrait> {
        match &self.traits {
            ResourceTraits::Group(group) => Some(group),
            ResourceTraits::User(_) => None,
        }
    }
}

// =============================================================================
// Entitlements & Grants
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    Assignment,
}

/// Something a principal can hold on a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: String,
    pub resource: Resource,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    pub purpose: EntitlementPurpose,
    /// Resource type IDs allowed to hold this entitlement
    pub grantable_to: Vec<String>,
}

impl Entitlement {
    /// Builds an assignment entitlement with the conventional
    /// `<type>:<id>:<slug>` identifier
    pub fn assignment(resource: &Resource, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id: entitlement_id(&resource.id, &slug),
            resource: resource.clone(),
            display_name: slug.clone(),
            description: String::new(),
            slug,
            purpose: EntitlementPurpose::Assignment,
            grantable_to: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_grantable_to(mut self, resource_type: &ResourceType) -> Self {
        self.grantable_to.push(resource_type.id.to_string());
        self
    }

    pub fn is_grantable_to(&self, resource_type: &str) -> bool {
        self.grantable_to.iter().any(|t| t == resource_type)
    }
}

/// A principal holding an entitlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub id: String,
    pub entitlement: Entitlement,
    pub principal: ResourceId,
}

impl Grant {
    pub fn new(entitlement: Entitlement, principal: ResourceId) -> Self {
        Self {
            id: format!("{}:{}", entitlement.id, principal),
            entitlement,
            principal,
        }
    }
}

pub fn entitlement_id(resource: &ResourceId, slug: &str) -> String {
    format!("{}:{}", resource, slug)
}

// =============================================================================
// Paging & Metadata
// =============================================================================

/// Opaque annotations attached to responses. Unused by this connector but
/// part of the engine contract.
pub type Annotations = Vec<serde_json::Value>;

/// One page of results returned to the sync engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` means there are no further pages
    pub next_page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Annotations,
}

impl<T> Page<T> {
    /// A page holding the complete result set
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
            annotations: Annotations::new(),
        }
    }

    pub fn empty() -> Self {
        Self::complete(Vec::new())
    }

    pub fn is_last(&self) -> bool {
        self.next_page_token.as_deref().map_or(true, str::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
}
