//! # DIC Core
//!
//! Core business logic for the drug interaction checker.
//!
//! This crate contains the data operations behind the HTTP API:
//! - the query layer over the `drugs` and `interactions` tables ([`store`])
//! - drug search by case-insensitive name substring ([`search`])
//! - pairwise interaction resolution and deduplication ([`resolver`])
//! - startup configuration ([`config`])
//!
//! **No API concerns**: HTTP routing, JSON bodies and status codes belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod error;
pub mod resolver;
pub mod search;
pub mod service;
pub mod store;

pub use config::ServiceConfig;
pub use error::{CoreError, CoreResult, StoreError, StoreResult};
pub use resolver::{resolve_interactions, Resolution};
pub use service::DrugService;
pub use store::{DrugStore, MemoryStore, PgStore};

pub use dic_types::{Drug, DrugId, Interaction, PairKey, Severity};
