// src/api/parser.rs
//! Turns raw API responses into domain values or typed errors.
//!
//! The envelope (list wrapper, error body) is read with serde; the objects
//! inside it go through the lenient decoders in [`super::decode`].

use super::client::ApiResponse;
use super::decode;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Entry};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// One page of a paginated list endpoint.
#[derive(Debug, Clone)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[derive(Deserialize)]
struct ListEnvelope {
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Error body of a failed request.
#[derive(Deserialize)]
struct NotionErrorBody {
    code: String,
    message: String,
}

/// Parses a response body, or the error it carries.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    if result.status.is_success() {
        serde_json::from_str(&result.data).map_err(|e| {
            log::error!("Failed to parse response from {}: {}", result.url, e);
            AppError::MalformedResponse(format!("{} ({})", e, preview(&result.data)))
        })
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    match serde_json::from_str::<NotionErrorBody>(body) {
        Ok(error) => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status,
        },
        Err(_) => AppError::NotionService {
            code: NotionErrorCode::from_http_status(status.as_u16()),
            message: format!("HTTP {} from {}", status, url),
            status,
        },
    }
}

fn preview(body: &str) -> String {
    let head: String = body.chars().take(200).collect();
    if head.len() < body.len() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Parses a page object into an [`Entry`].
pub fn parse_page_response(result: ApiResponse<String>) -> Result<Entry, AppError> {
    let value: Value = parse_api_response(result)?;
    decode::decode_entry(&value)
}

/// Parses one page of `blocks/{id}/children`.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let envelope: ListEnvelope = parse_api_response(result)?;
    Ok(PaginatedResponse {
        results: decode::decode_blocks(&envelope.results),
        has_more: envelope.has_more,
        next_cursor: envelope.next_cursor,
    })
}

/// Parses one page of `databases/{id}/query`.
pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Entry>, AppError> {
    let envelope: ListEnvelope = parse_api_response(result)?;
    Ok(PaginatedResponse {
        results: decode::decode_entries(&envelope.results),
        has_more: envelope.has_more,
        next_cursor: envelope.next_cursor,
    })
}
