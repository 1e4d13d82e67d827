//! Drug service and related types.

use crate::resolver::resolve_interactions;
use crate::store::DrugStore;
use crate::StoreResult;
use dic_types::{Drug, DrugId, Interaction};
use std::sync::Arc;

/// Pure drug data operations - no API concerns
#[derive(Clone)]
pub struct DrugService {
    store: Arc<dyn DrugStore>,
}

impl DrugService {
    /// Creates a new `DrugService` over the given store handle.
    pub fn new(store: Arc<dyn DrugStore>) -> Self {
        Self { store }
    }

    /// Searches drugs by case-insensitive substring of their name.
    ///
    /// An empty `term` returns every drug. Results keep the order the store returned them in.
    pub async fn search_drugs(&self, term: &str) -> StoreResult<Vec<Drug>> {
        tracing::debug!(term, "querying drugs");
        let drugs = self.store.search_drugs(term).await?;
        tracing::debug!(rows = drugs.len(), "drug search complete");
        Ok(drugs)
    }

    /// Returns the deduplicated interactions among `ids`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if any pair query fails.
    pub async fn check_interactions(&self, ids: &[DrugId]) -> StoreResult<Vec<Interaction>> {
        let resolution = resolve_interactions(self.store.as_ref(), ids).await?;
        tracing::info!(
            drugs = ids.len(),
            pairs_checked = resolution.pairs_checked,
            found = resolution.interactions.len(),
            "interaction check complete"
        );
        Ok(resolution.interactions)
    }

    /// Returns every stored interaction.
    pub async fn list_interactions(&self) -> StoreResult<Vec<Interaction>> {
        self.store.all_interactions().await
    }
}
