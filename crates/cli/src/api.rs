//! HTTP client for the REST API.

use crate::{ClientError, ClientResult};
use api_shared::{paths, CheckInteractionsReq, ErrorRes};
use dic_types::{Drug, DrugId, Interaction};
use reqwest::Response;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Thin wrapper over `reqwest::Client` bound to one server.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Plain-text liveness message from `/`.
    pub async fn liveness(&self) -> ClientResult<String> {
        let response = self.http.get(self.url(paths::ROOT)).send().await?;
        Ok(check_status(response).await?.text().await?)
    }

    /// Drugs whose name contains `term`. The term is sent URL-encoded.
    pub async fn search_drugs(&self, term: &str) -> ClientResult<Vec<Drug>> {
        let response = self
            .http
            .get(self.url(paths::DRUGS))
            .query(&[("q", term)])
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Deduplicated interactions among `ids`.
    pub async fn check_interactions(&self, ids: &[DrugId]) -> ClientResult<Vec<Interaction>> {
        let body = CheckInteractionsReq {
            drugs: ids.to_vec(),
        };
        let response = self
            .http
            .post(self.url(paths::INTERACTIONS))
            .json(&body)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Every stored interaction.
    pub async fn all_interactions(&self) -> ClientResult<Vec<Interaction>> {
        let response = self.http.get(self.url(paths::INTERACTIONS)).send().await?;
        Ok(check_status(response).await?.json().await?)
    }
}

async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text).unwrap_or(text);
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorRes>(body).ok().map(|e| e.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url(paths::DRUGS), "http://localhost:5000/drugs");
    }

    #[test]
    fn error_bodies_are_unwrapped() {
        assert_eq!(
            error_message(r#"{"error":"Server Error"}"#).as_deref(),
            Some("Server Error")
        );
        assert_eq!(error_message("<html>"), None);
    }
}
