//! Query layer.
//!
//! [`DrugStore`] is the seam between the services and the relational store. The production
//! implementation is [`PgStore`]; [`MemoryStore`] holds rows in memory for tests and local demos.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::StoreResult;
use async_trait::async_trait;
use dic_types::{Drug, DrugId, Interaction};

/// Read-only access to the `drugs` and `interactions` tables.
///
/// Implementations log a failing query before returning the error.
#[async_trait]
pub trait DrugStore: Send + Sync {
    /// Drugs whose name contains `term`, ignoring case. An empty term matches every drug.
    async fn search_drugs(&self, term: &str) -> StoreResult<Vec<Drug>>;

    /// Interaction rows stored as `(first, second)` or `(second, first)`.
    async fn interactions_for_pair(
        &self,
        first: DrugId,
        second: DrugId,
    ) -> StoreResult<Vec<Interaction>>;

    /// Every stored interaction row, unfiltered.
    async fn all_interactions(&self) -> StoreResult<Vec<Interaction>>;
}
