//! Error types for the Verkada connector

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerkadaError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Non-200 response or transport failure. `status` is `None` when no
    /// response was received.
    #[error("Upstream error: {message}")]
    UpstreamError { status: Option<u16>, message: String },

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    /// The add call returned 200 but listed the user under `unsuccessful_adds`.
    #[error("Mutation rejected: user {user_id} was not added to group {group_id}")]
    MutationRejected { group_id: String, user_id: String },

    #[error("Unsupported principal type: {resource_type} (only users can hold group membership)")]
    UnsupportedPrincipalType { resource_type: String },

    #[error("Invalid resource: {message}")]
    InvalidResource { message: String },

    #[error("Operation cancelled")]
    Cancelled,
}

impl VerkadaError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        Self::UpstreamError {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::UpstreamError {
            status: None,
            message: message.into(),
        }
    }

    pub fn decode_error(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
        }
    }

    pub fn mutation_rejected(group_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::MutationRejected {
            group_id: group_id.into(),
            user_id: user_id.into(),
        }
    }

    pub fn unsupported_principal(resource_type: impl Into<String>) -> Self {
        Self::UnsupportedPrincipalType {
            resource_type: resource_type.into(),
        }
    }

    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Self::InvalidResource {
            message: message.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status of an upstream failure, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamError { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VerkadaError>;
