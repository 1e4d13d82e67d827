use api_shared::ErrorRes;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use dic_core::StoreError;

/// Handler failures.
///
/// Every variant maps to HTTP 500 with a generic JSON body; the cause is only logged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("drug search failed: {0}")]
    Search(#[source] StoreError),
    #[error("interaction check failed: {0}")]
    Check(#[source] StoreError),
    #[error("malformed interaction check body: {0}")]
    MalformedCheck(#[source] JsonRejection),
    #[error("listing interactions failed: {0}")]
    List(#[source] StoreError),
}

impl ApiError {
    /// Client-facing message for this failure.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Search(_) => "Server Error",
            ApiError::Check(_) | ApiError::MalformedCheck(_) => "Error checking interactions",
            ApiError::List(_) => "server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorRes::new(self.public_message())),
        )
            .into_response()
    }
}
