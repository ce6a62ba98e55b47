//! Strongly-typed identifiers and resource-type descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, VerkadaError};

/// Macro to generate strongly-typed wrappers around upstream string IDs
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Upstream Verkada identifiers
define_id!(UserId);
define_id!(GroupId);

// =============================================================================
// Resource Types
// =============================================================================

/// Trait a resource type advertises to the sync engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
    User,
    Group,
}

/// Static descriptor for a kind of resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceType {
    pub id: &'static str,
    pub display_name: &'static str,
    pub traits: &'static [ResourceTrait],
}

pub static USER_RESOURCE_TYPE: ResourceType = ResourceType {
    id: "user",
    display_name: "User",
    traits: &[ResourceTrait::User],
};

pub static GROUP_RESOURCE_TYPE: ResourceType = ResourceType {
    id: "group",
    display_name: "Group",
    traits: &[ResourceTrait::Group],
};

impl ResourceType {
    pub fn is(&self, resource_type: &str) -> bool {
        self.id == resource_type
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

// =============================================================================
// Resource IDs
// =============================================================================

/// `(resource_type, resource)` pair identifying a normalized resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    pub resource_type: String,
    pub resource: String,
}

impl ResourceId {
    /// Builds a resource ID, rejecting an empty identifier
    pub fn new(resource_type: &ResourceType, resource: impl Into<String>) -> Result<Self> {
        let resource = resource.into();
        if resource.trim().is_empty() {
            return Err(VerkadaError::invalid_resource(format!(
                "{} resource id must not be empty",
                resource_type.id
            )));
        }

        Ok(Self {
            resource_type: resource_type.id.to_string(),
            resource,
        })
    }

    pub fn is_type(&self, resource_type: &ResourceType) -> bool {
        resource_type.is(&self.resource_type)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}
