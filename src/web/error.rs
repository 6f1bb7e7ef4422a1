//! Error responses

use crate::export::ExportError;
use crate::search::SearchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors a handler can return
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Search(e) => {
                tracing::warn!("Search failed: {}", e);
                let body = json!({
                    "error": e.to_string(),
                    "provider": e.provider.as_str(),
                });
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
            Self::Export(e) => {
                tracing::error!("Export failed: {}", e);
                let body = json!({ "error": e.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
