//! HTTP implementation of [`TodosApi`]

use super::TodosApi;
use crate::error::ApiError;
use crate::types::Todo;
use async_trait::async_trait;
use reqwest::Client;

/// Todos API client over HTTP
///
/// Fetches `GET {base_url}/todos`, expecting a JSON array of todos.
#[derive(Clone, Debug)]
pub struct HttpTodosApi {
    client: Client,
    base_url: String,
}

impl HttpTodosApi {
    /// Create a client for the API rooted at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// The API root this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TodosApi for HttpTodosApi {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_all(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self
            .client
            .get(format!("{}/todos", self.base_url))
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let todos = response
                .json::<Vec<Todo>>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))?;
            tracing::debug!(count = todos.len(), "Fetched todos");
            Ok(todos)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::ApiStatus {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}
