//! Request and response bodies.

use dic_types::DrugId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /interactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckInteractionsReq {
    /// Ids of the drugs to check against each other. Order and duplicates are allowed.
    pub drugs: Vec<DrugId>,
}

/// Query string of `GET /drugs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DrugSearchParams {
    /// Case-insensitive substring of the drug name. Missing or empty returns every drug.
    #[serde(default)]
    pub q: Option<String>,
}

impl DrugSearchParams {
    pub fn term(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

/// Generic error body returned with HTTP 500.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}
