//! Verkada Connector - Access Control users and groups for the identity graph
//!
//! This crate maps Verkada Access Control onto the normalized model:
//! - access users become `user` resources
//! - access groups become `group` resources with a single `member` entitlement
//! - membership is derived from each user's access record and can be
//!   granted or revoked back upstream
//!
//! # Architecture
//!
//! `VerkadaConnector` hands the sync engine two syncers:
//! - `UserSyncer`: lists users; no entitlements or grants
//! - `GroupSyncer`: lists groups, resolves membership grants and provisions
//!   membership through `MembershipMutator`

pub mod connector;
pub mod groups;
pub mod mapper;
pub mod membership;
pub mod mutation;
pub mod users;


pub use connector::VerkadaConnector;
pub use groups::{member_entitlement, GroupSyncer, MEMBER_ENTITLEMENT};
pub use mapper::{group_resource, split_full_name, user_resource};
pub use membership::{MembershipResolution, MembershipResolver, SkippedRecord};
pub use mutation::MembershipMutator;
pub use users::UserSyncer;

// Re-export core types
pub use verkada_core::*;
