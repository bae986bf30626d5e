//! Typed HTTP client for the progress API, used by the smoke runner.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::dto::{CompleteDayRequest, MessageResponse, ProgressResponse, ResetResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressClient {
    http: Client,
    base_url: String,
    user_id: Option<String>,
}

impl ProgressClient {
    /// `base_url` points at the API prefix, e.g. `http://localhost:8001/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: None,
        }
    }

    /// Sends `X-User-Id` on progress calls instead of relying on the
    /// server's default user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let req = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.user_id {
            Some(id) => req.header("x-user-id", id),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(resp.json().await?)
    }

    pub async fn root(&self) -> Result<MessageResponse, ClientError> {
        Self::send(self.request(reqwest::Method::GET, "/")).await
    }

    pub async fn reset(&self) -> Result<ResetResponse, ClientError> {
        Self::send(self.request(reqwest::Method::POST, "/progress/reset")).await
    }

    pub async fn progress(&self) -> Result<ProgressResponse, ClientError> {
        Self::send(self.request(reqwest::Method::GET, "/progress")).await
    }

    pub async fn complete_day(&self, day_number: i64) -> Result<ProgressResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/progress/complete")
            .json(&CompleteDayRequest { day_number });
        Self::send(req).await
    }
}
