// BookSmith backend API client

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::models::{GenerationRequest, JobHandle};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct BookSmithClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub job_id: JobHandle,
}

/// Job phase as reported by `GET /status/{job_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStatus {
    Pending,
    CreatingOutline,
    Researching,
    Writing,
    Finalizing,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: RemoteStatus,
}

#[derive(Debug, Deserialize)]
pub struct ResultResponse {
    pub content: String,
}

/// Strip a single trailing slash so paths can be appended with `/`.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.strip_suffix('/').unwrap_or(base_url).to_string()
}

impl BookSmithClient {
    pub fn new(base_url: &str, request_timeout: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: normalize_base_url(base_url),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate_book(&self, request: &GenerationRequest) -> Result<JobHandle, ApiError> {
        let url = format!("{}/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        let body: GenerateResponse = Self::decode(url, response).await?;
        Ok(body.job_id)
    }

    pub async fn job_status(&self, handle: &JobHandle) -> Result<RemoteStatus, ApiError> {
        let url = format!("{}/status/{handle}", self.base_url);
        let body: StatusResponse = self.get_json(url).await?;
        Ok(body.status)
    }

    pub async fn job_result(&self, handle: &JobHandle) -> Result<String, ApiError> {
        let url = format!("{}/result/{handle}", self.base_url);
        let body: ResultResponse = self.get_json(url).await?;
        Ok(body.content)
    }

    /// Location of the rendered PDF. Fetched by the browser, not by us.
    pub fn download_url(&self, handle: &JobHandle) -> String {
        format!("{}/download/pdf/{handle}", self.base_url)
    }

    pub async fn health_check(&self) -> bool {
        let url = format!("{}/", self.base_url);

        self.client
            .get(&url)
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(
        url: String,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}
