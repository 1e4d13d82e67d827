use super::DrugStore;
use crate::search::matches_term;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use dic_types::{Drug, DrugId, Interaction};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory store holding fixed rows.
///
/// Counts every query it answers and can be switched into a failing state, which makes it the
/// store of choice for exercising the services and the HTTP layer without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    drugs: Vec<Drug>,
    interactions: Vec<Interaction>,
    queries: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new(drugs: Vec<Drug>, interactions: Vec<Interaction>) -> Self {
        Self {
            drugs,
            interactions,
            ..Self::default()
        }
    }

    /// Number of queries answered (or refused) so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// When set, every subsequent query fails with `StoreError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn begin_query(&self, operation: &str) -> StoreResult<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            tracing::error!(operation, "query error: memory store is failing");
            return Err(StoreError::Unavailable(format!(
                "{operation}: memory store is failing"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DrugStore for MemoryStore {
    async fn search_drugs(&self, term: &str) -> StoreResult<Vec<Drug>> {
        self.begin_query("search_drugs")?;
        Ok(self
            .drugs
            .iter()
            .filter(|drug| matches_term(&drug.name, term))
            .cloned()
            .collect())
    }

    async fn interactions_for_pair(
        &self,
        first: DrugId,
        second: DrugId,
    ) -> StoreResult<Vec<Interaction>> {
        self.begin_query("interactions_for_pair")?;
        Ok(self
            .interactions
            .iter()
            .filter(|row| row.relates(first, second))
            .cloned()
            .collect())
    }

    async fn all_interactions(&self) -> StoreResult<Vec<Interaction>> {
        self.begin_query("all_interactions")?;
        Ok(self.interactions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(
            vec![Drug::new(1, "Aspirin"), Drug::new(2, "Insulin")],
            vec![Interaction {
                id: 1,
                drug1_id: 1,
                drug2_id: 2,
                severity: Some("mild".into()),
                description: Some("test".into()),
            }],
        )
    }

    #[tokio::test]
    async fn pair_lookup_matches_either_order() {
        let store = store();
        assert_eq!(store.interactions_for_pair(1, 2).await.unwrap().len(), 1);
        assert_eq!(store.interactions_for_pair(2, 1).await.unwrap().len(), 1);
        assert!(store.interactions_for_pair(1, 1).await.unwrap().is_empty());
        assert_eq!(store.query_count(), 3);
    }

    #[tokio::test]
    async fn failing_store_refuses_queries() {
        let store = store();
        store.set_failing(true);
        assert!(matches!(
            store.all_interactions().await,
            Err(StoreError::Unavailable(_))
        ));
        store.set_failing(false);
        assert_eq!(store.all_interactions().await.unwrap().len(), 1);
    }
}
