//! Mapping from Verkada records to normalized resources

use verkada_client::{Group, User};
use verkada_core::{
    Email, GroupProfile, GroupTrait, Resource, ResourceId, Result, UserProfile, UserStatus,
    UserTrait, GROUP_RESOURCE_TYPE, USER_RESOURCE_TYPE,
};

/// Splits a full name into `(first, last)`.
///
/// The last whitespace-separated token is the last name and the remaining
/// tokens, joined by single spaces, are the first name. A single token is a
/// first name with an empty last name; a blank name yields two empty strings.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut tokens: Vec<&str> = full_name.split_whitespace().collect();

    match tokens.len() {
        0 => (String::new(), String::new()),
        1 => (tokens[0].to_string(), String::new()),
        _ => {
            let last = tokens.pop().unwrap_or_default().to_string();
            (tokens.join(" "), last)
        }
    }
}

/// Create a normalized resource for a Verkada access user.
///
/// Verkada exposes no suspended or disabled state for access users, so the
/// status is always `Enabled`.
pub fn user_resource(user: &User) -> Result<Resource> {
    let id = ResourceId::new(&USER_RESOURCE_TYPE, user.user_id.as_str())?;
    let (first_name, last_name) = split_full_name(&user.full_name);

    let profile = UserProfile {
        first_name,
        last_name,
        login: user.email.clone(),
        user_id: user.user_id.to_string(),
        employee_id: user.employee_id.clone(),
    };

    let emails = if user.email.is_empty() {
        vec![]
    } else {
        vec![Email {
            address: user.email.clone(),
            is_primary: true,
        }]
    };

    Ok(Resource::user(
        id,
        user.full_name.clone(),
        UserTrait {
            profile,
            emails,
            status: UserStatus::Enabled,
        },
    ))
}

/// Create a normalized resource for a Verkada access group
pub fn group_resource(group: &Group) -> Result<Resource> {
    let id = ResourceId::new(&GROUP_RESOURCE_TYPE, group.group_id.as_str())?;

    Ok(Resource::group(
        id,
        group.name.clone(),
        GroupTrait {
            profile: GroupProfile {
                group_name: group.name.clone(),
                group_id: group.group_id.to_string(),
            },
        },
    ))
}
