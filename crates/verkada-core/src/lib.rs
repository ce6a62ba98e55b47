//! Verkada Core - Identity model, errors and syncer traits for the Verkada connector

pub mod error;
pub mod ids;
pub mod models;
pub mod traits;

pub use error::*;
pub use ids::*;
pub use models::*;
pub use traits::*;
