//! Pairwise interaction resolution.
//!
//! Given the drugs a user selected, every index pair `(i, j)` with `i < j` is looked up in the
//! store, one query at a time. The rows collected across all pairs are then reduced to one
//! interaction per unordered pair of drugs.
//!
//! When the store holds more than one row for the same pair, the row with the lowest id is kept,
//! whatever order the rows were fetched in.

use crate::store::DrugStore;
use crate::StoreResult;
use dic_types::{DrugId, Interaction, PairKey};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// One interaction per unordered pair, ordered by pair key.
    pub interactions: Vec<Interaction>,
    /// Number of pair queries issued.
    pub pairs_checked: usize,
}

/// Index pairs `(i, j)` with `i < j` for a sequence of `len` items, in row-major order.
pub fn index_pairs(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| ((i + 1)..len).map(move |j| (i, j)))
}

/// Look up every pair among `ids` and return the deduplicated interactions.
///
/// Fewer than two ids issue no queries. Duplicate ids are allowed; a pair made of two copies of
/// the same id is still queried.
///
/// # Errors
///
/// Returns the first `StoreError` raised by any pair query. No partial result is produced.
pub async fn resolve_interactions(
    store: &dyn DrugStore,
    ids: &[DrugId],
) -> StoreResult<Resolution> {
    let mut collected = Vec::new();
    let mut pairs_checked = 0;

    for (i, j) in index_pairs(ids.len()) {
        if PairKey::new(ids[i], ids[j]).is_self_pair() {
            tracing::debug!(drug = ids[i], "querying self pair from repeated id");
        }
        let rows = store.interactions_for_pair(ids[i], ids[j]).await?;
        pairs_checked += 1;
        collected.extend(rows);
    }

    Ok(Resolution {
        interactions: dedupe_by_pair(collected),
        pairs_checked,
    })
}

/// Reduce `rows` to one interaction per unordered pair, keeping the lowest id.
pub fn dedupe_by_pair(rows: Vec<Interaction>) -> Vec<Interaction> {
    let mut by_pair: BTreeMap<PairKey, Interaction> = BTreeMap::new();

    for row in rows {
        match by_pair.entry(row.pair_key()) {
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
            Entry::Occupied(mut slot) => {
                let kept = slot.get();
                if row.id == kept.id {
                    // Same row fetched through a repeated id.
                    continue;
                }
                tracing::warn!(
                    pair = %slot.key(),
                    kept = row.id.min(kept.id),
                    discarded = row.id.max(kept.id),
                    "duplicate interaction rows for one drug pair"
                );
                if row.id < kept.id {
                    slot.insert(row);
                }
            }
        }
    }

    by_pair.into_values().collect()
}
