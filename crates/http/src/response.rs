//! Uniform JSON envelope shared by every endpoint.
//!
//! Success bodies carry `message`, failures carry `error`; both may carry an
//! ordered `data` list and, for paged queries, `metadata`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shelf_db::Page;

/// Figures describing one page of a larger result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub page_number: u32,
    pub page_size: u32,
    pub number_of_elements: u64,
    pub total_pages: u64,
    pub total_elements: u64,
}

impl<T> From<&Page<T>> for PageMetadata {
    fn from(page: &Page<T>) -> Self {
        Self {
            page_number: page.page_number(),
            page_size: page.page_size(),
            number_of_elements: page.number_of_elements() as u64,
            total_pages: page.total_pages(),
            total_elements: page.total_elements(),
        }
    }
}

/// Wire shape of every response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
}

/// Builds the envelope for `status`: `text` lands in `message` for 1xx-3xx and
/// in `error` otherwise.
pub fn envelope<T>(
    status: StatusCode,
    text: impl Into<String>,
    data: Option<Vec<T>>,
    metadata: Option<PageMetadata>,
) -> Envelope<T> {
    let text = text.into();
    let (message, error) = if status.is_client_error() || status.is_server_error() {
        (None, Some(text))
    } else {
        (Some(text), None)
    };

    Envelope {
        message,
        error,
        data,
        metadata,
    }
}

/// Wraps a result into the envelope and pairs it with `status`.
pub fn send_response<T: Serialize>(
    status: StatusCode,
    text: impl Into<String>,
    data: Option<Vec<T>>,
    metadata: Option<PageMetadata>,
) -> Response {
    let body = envelope(status, text, data, metadata);
    tracing::debug!(
        status = status.as_u16(),
        text = body.message.as_deref().or(body.error.as_deref()),
        items = body.data.as_ref().map(Vec::len),
        "sending response"
    );

    (status, Json(body)).into_response()
}

/// A page of items plus its metadata.
pub fn send_page<T: Serialize>(status: StatusCode, text: &str, page: Page<T>) -> Response {
    let metadata = PageMetadata::from(&page);
    send_response(status, text, Some(page.into_content()), Some(metadata))
}

/// A single item wrapped in a one-element `data` list.
pub fn send_one<T: Serialize>(status: StatusCode, text: &str, item: T) -> Response {
    send_response(status, text, Some(vec![item]), None)
}

/// Text only, no `data`.
pub fn send_message(status: StatusCode, text: &str) -> Response {
    send_response::<()>(status, text, None, None)
}
