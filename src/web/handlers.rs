//! HTTP request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::config::DeliveryMode;
use crate::export::{download_url, ExportArtifact, STREAM_FILENAME, XLSX_CONTENT_TYPE};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Header listing providers that failed and were treated as empty
pub const UNRESPONSIVE_PROVIDERS: &str = "x-unresponsive-providers";

/// Query parameters for restaurant search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Occasion tag selecting the search text
    pub occasion: String,
}

/// Body returned for persisted exports
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub download_url: String,
}

/// Liveness handler
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Restaurant search handler
pub async fn search_restaurants(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let results = state.search.search_restaurants(&params.occasion).await?;

    let mut response = Json(results.listings).into_response();

    if !results.unresponsive.is_empty() {
        let names = results
            .unresponsive
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(",");
        if let Ok(value) = HeaderValue::from_str(&names) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(UNRESPONSIVE_PROVIDERS), value);
        }
    }

    Ok(response)
}

/// Favourites export handler
pub async fn export_list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let request_host = headers.get(header::HOST).and_then(|h| h.to_str().ok());

    // Resolve where the file will be served before anything is written
    let base = match state.exporter.delivery() {
        DeliveryMode::Persist => Some(state.download_base(request_host)?),
        DeliveryMode::Stream => None,
    };

    match state.exporter.export().await? {
        ExportArtifact::Streamed(bytes) => {
            let disposition = format!("attachment; filename=\"{STREAM_FILENAME}\"");
            Ok((
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
        ExportArtifact::Persisted(export) => {
            let url = base
                .map_or_else(|| state.download_base(request_host), Ok)
                .and_then(|base| download_url(&base, &export.filename));
            let url = match url {
                Ok(url) => url,
                Err(e) => {
                    state.exporter.store().discard(&export).await;
                    return Err(e.into());
                }
            };

            Ok(Json(DownloadResponse { download_url: url }).into_response())
        }
    }
}
