//! Verkada Client - Access Control REST API client
//!
//! Covers the subset of the Verkada API the connector needs:
//! - listing access users and access groups
//! - reading a user's access record
//! - adding and removing a user from an access group
//!
//! The [`AccessApi`] trait is the seam the connector depends on;
//! [`VerkadaClient`] implements it over HTTP.

pub mod api;
pub mod client;
pub mod http;
pub mod models;

pub use api::AccessApi;
pub use client::{VerkadaClient, BASE_URL};
pub use http::HttpClient;
pub use models::{AddUserResponse, Group, User, UserAccess};
