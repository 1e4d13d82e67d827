//! The drugs a user has picked for an interaction check.

use crate::{ClientError, ClientResult};
use dic_types::{Drug, DrugId};
use std::collections::HashMap;

/// Minimum number of drugs an interaction check needs.
pub const MIN_CHECK_DRUGS: usize = 2;

/// Ordered set of picked drugs, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    drugs: Vec<Drug>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `drug` unless a drug with the same id is already selected.
    ///
    /// Returns `true` if the drug was added.
    pub fn add(&mut self, drug: Drug) -> bool {
        if self.contains(drug.id) {
            return false;
        }
        self.drugs.push(drug);
        true
    }

    /// Removes the drug with `id`, returning it if it was selected.
    pub fn remove(&mut self, id: DrugId) -> Option<Drug> {
        let index = self.drugs.iter().position(|d| d.id == id)?;
        Some(self.drugs.remove(index))
    }

    pub fn contains(&self, id: DrugId) -> bool {
        self.drugs.iter().any(|d| d.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    pub fn drugs(&self) -> &[Drug] {
        &self.drugs
    }

    /// Ids in selection order, as sent to `POST /interactions`.
    pub fn ids(&self) -> Vec<DrugId> {
        self.drugs.iter().map(|d| d.id).collect()
    }

    /// Id to display name, for labelling interaction results.
    pub fn name_lookup(&self) -> HashMap<DrugId, String> {
        self.drugs
            .iter()
            .map(|d| (d.id, d.name.clone()))
            .collect()
    }

    /// Comma-separated names, or `None!` when nothing is selected.
    pub fn summary(&self) -> String {
        if self.drugs.is_empty() {
            return "None!".to_string();
        }
        self.drugs
            .iter()
            .map(|d| d.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Fails with `ClientError::TooFewDrugs` unless at least two drugs are selected.
    pub fn ensure_checkable(&self) -> ClientResult<()> {
        if self.drugs.len() < MIN_CHECK_DRUGS {
            return Err(ClientError::TooFewDrugs);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_order_and_rejects_duplicates() {
        let mut selection = Selection::new();
        assert!(selection.add(Drug::new(3, "Ibuprofen")));
        assert!(selection.add(Drug::new(1, "Aspirin")));
        assert!(!selection.add(Drug::new(3, "Ibuprofen")));

        assert_eq!(selection.ids(), vec![3, 1]);
        assert_eq!(selection.summary(), "Ibuprofen, Aspirin");
    }

    #[test]
    fn remove_drops_by_id() {
        let mut selection = Selection::new();
        selection.add(Drug::new(1, "Aspirin"));
        selection.add(Drug::new(2, "Warfarin"));

        assert_eq!(selection.remove(1).map(|d| d.name), Some("Aspirin".into()));
        assert_eq!(selection.remove(1), None);
        assert_eq!(selection.ids(), vec![2]);
    }

    #[test]
    fn empty_selection_summary() {
        assert_eq!(Selection::new().summary(), "None!");
    }

    #[test]
    fn check_needs_two_drugs() {
        let mut selection = Selection::new();
        selection.add(Drug::new(1, "Aspirin"));
        let err = selection.ensure_checkable().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Select at least 2 drugs to check interaction."
        );

        selection.add(Drug::new(2, "Warfarin"));
        assert!(selection.ensure_checkable().is_ok());
    }

    #[test]
    fn name_lookup_maps_ids() {
        let mut selection = Selection::new();
        selection.add(Drug::new(1, "Aspirin"));
        let names = selection.name_lookup();
        assert_eq!(names.get(&1).map(String::as_str), Some("Aspirin"));
        assert!(!names.contains_key(&2));
    }
}
