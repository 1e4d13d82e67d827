//! # API Shared
//!
//! Shared definitions for the drug interaction checker API.
//!
//! Contains:
//! - Request and response bodies (`models` module)
//! - Route paths used by both the server and the client (`paths` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `dic` client for common functionality.

pub mod health;
pub mod models;

pub use health::{HealthService, LIVENESS_MESSAGE};
pub use models::*;

pub use dic_types::{Drug, DrugId, Interaction};

/// Route paths exposed by the REST API.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const HEALTH: &str = "/health";
    pub const DRUGS: &str = "/drugs";
    pub const INTERACTIONS: &str = "/interactions";
}
