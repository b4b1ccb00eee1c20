// src/api/client.rs
//! Thin HTTP client for the Notion API.
//!
//! Handles authentication and the raw request/response exchange. Parsing
//! lives in [`super::parser`]; nothing here knows what a block is.

use crate::constants::{NOTION_API_BASE, NOTION_API_VERSION};
use crate::error::AppError;
use crate::types::ApiKey;
use reqwest::{header, Client, Response, StatusCode};
use serde_json::Value;

/// Raw response text with the status and URL it came from.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub url: String,
}

/// The ability to exchange raw requests with the Notion API.
///
/// Both the live client and the revalidation cache speak this; the
/// repository on top never knows which one it holds.
#[async_trait::async_trait]
pub trait NotionTransport: Send + Sync {
    async fn get(&self, endpoint: &str) -> Result<ApiResponse<String>, AppError>;
    async fn post(&self, endpoint: &str, body: &Value) -> Result<ApiResponse<String>, AppError>;
}

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE)
    }

    /// Same as [`NotionHttpClient::new`] against another API origin.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl NotionTransport for NotionHttpClient {
    async fn get(&self, endpoint: &str) -> Result<ApiResponse<String>, AppError> {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        extract_response_text(response).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<ApiResponse<String>, AppError> {
        let url = self.url(endpoint);
        log::debug!("POST {} {}", url, body);

        let response = self.client.post(url).json(body).send().await?;
        let result = extract_response_text(response).await?;
        log::debug!("POST {} answered {}", endpoint, result.status);
        Ok(result)
    }
}

/// Reads the response body as text, keeping status and URL for the parser.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
