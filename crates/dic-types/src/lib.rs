//! # DIC Types
//!
//! Domain types shared by every crate in the drug interaction checker.
//!
//! - [`Drug`] and [`Interaction`] mirror the rows of the `drugs` and `interactions` tables.
//!   Nullable columns stay `None` and serialize as `null`.
//! - [`PairKey`] is the order-independent identity of an interaction.
//! - [`Severity`] is the parsed form of the free-text severity label.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Identifier of a row in the `drugs` table.
pub type DrugId = i64;

/// A drug as exposed by search.
///
/// Columns of the `drugs` row other than `id` and `name` are kept in `columns` and serialized
/// alongside them, so the row reaches the client whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Drug {
    pub id: DrugId,
    pub name: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub columns: BTreeMap<String, serde_json::Value>,
}

impl Drug {
    pub fn new(id: DrugId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            columns: BTreeMap::new(),
        }
    }
}

/// A stored interaction between two drugs.
///
/// The relation is unordered: a row for `(a, b)` describes the same relationship as one for
/// `(b, a)`. Use [`Interaction::pair_key`] whenever two rows need to be compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Interaction {
    pub id: i64,
    pub drug1_id: DrugId,
    pub drug2_id: DrugId,
    /// Free-text label such as `severe` or `moderate`. Not validated.
    pub severity: Option<String>,
    pub description: Option<String>,
}

impl Interaction {
    /// The unordered pair of drugs this interaction relates.
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.drug1_id, self.drug2_id)
    }

    /// The severity label parsed case-insensitively. A missing label parses as `Other("")`.
    pub fn severity_level(&self) -> Severity {
        Severity::parse(self.severity.as_deref().unwrap_or_default())
    }

    /// Whether this row relates `first` and `second`, in either order.
    pub fn relates(&self, first: DrugId, second: DrugId) -> bool {
        self.pair_key() == PairKey::new(first, second)
    }
}

/// Order-independent key for a pair of drug ids.
///
/// `PairKey::new(a, b) == PairKey::new(b, a)` for all `a` and `b`. Displays as `"low-high"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: DrugId,
    high: DrugId,
}

impl PairKey {
    pub fn new(a: DrugId, b: DrugId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// True when both ends of the pair are the same drug.
    pub fn is_self_pair(&self) -> bool {
        self.low == self.high
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Severity categories the client knows how to style.
///
/// Anything else is kept verbatim in [`Severity::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Severe,
    High,
    Moderate,
    Mild,
    Low,
    Other(String),
}

impl Severity {
    /// Parses a stored label. Matching ignores surrounding whitespace and case.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "severe" => Severity::Severe,
            "high" => Severity::High,
            "moderate" => Severity::Moderate,
            "mild" => Severity::Mild,
            "low" => Severity::Low,
            _ => Severity::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Severe => "severe",
            Severity::High => "high",
            Severity::Moderate => "moderate",
            Severity::Mild => "mild",
            Severity::Low => "low",
            Severity::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(id: i64, a: DrugId, b: DrugId) -> Interaction {
        Interaction {
            id,
            drug1_id: a,
            drug2_id: b,
            severity: Some("Severe".into()),
            description: Some("bleeding risk".into()),
        }
    }

    #[test]
    fn pair_key_ignores_order() {
        assert_eq!(PairKey::new(1, 2), PairKey::new(2, 1));
        assert_eq!(PairKey::new(9, 10).to_string(), "9-10");
        assert_eq!(PairKey::new(10, 9).to_string(), "9-10");
    }

    #[test]
    fn pair_key_detects_self_pairs() {
        assert!(PairKey::new(4, 4).is_self_pair());
        assert!(!PairKey::new(4, 5).is_self_pair());
    }

    #[test]
    fn relates_matches_both_orders() {
        let row = interaction(1, 1, 2);
        assert!(row.relates(1, 2));
        assert!(row.relates(2, 1));
        assert!(!row.relates(1, 3));
    }

    #[test]
    fn severity_parsing_is_case_insensitive() {
        assert_eq!(Severity::parse("Severe"), Severity::Severe);
        assert_eq!(Severity::parse(" MILD "), Severity::Mild);
        assert_eq!(
            Severity::parse("Unknown"),
            Severity::Other("Unknown".to_string())
        );
        assert_eq!(interaction(1, 1, 2).severity_level(), Severity::Severe);
    }

    #[test]
    fn interaction_serializes_with_column_names() {
        let json = serde_json::to_value(interaction(7, 1, 2)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["drug1_id"], 1);
        assert_eq!(json["drug2_id"], 2);
        assert_eq!(json["severity"], "Severe");
    }

    #[test]
    fn missing_severity_serializes_as_null() {
        let row = Interaction {
            severity: None,
            description: None,
            ..interaction(3, 1, 2)
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json["severity"].is_null());
        assert!(json["description"].is_null());
        assert_eq!(row.severity_level(), Severity::Other(String::new()));

        let parsed: Interaction =
            serde_json::from_str(r#"{"id":3,"drug1_id":1,"drug2_id":2}"#).unwrap();
        assert_eq!(parsed, row);
    }

    #[test]
    fn extra_drug_columns_round_through_json() {
        let drug = Drug {
            columns: BTreeMap::from([("class".to_string(), serde_json::json!("NSAID"))]),
            ..Drug::new(1, "Aspirin")
        };
        let json = serde_json::to_value(&drug).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Aspirin", "class": "NSAID"}));

        let parsed: Drug =
            serde_json::from_str(r#"{"id":1,"name":"Aspirin","class":"NSAID"}"#).unwrap();
        assert_eq!(parsed, drug);
        assert_eq!(
            serde_json::from_str::<Drug>(r#"{"id":2,"name":"Insulin"}"#).unwrap(),
            Drug::new(2, "Insulin")
        );
    }
}
