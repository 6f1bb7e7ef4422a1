//! Web server module
//!
//! Provides the HTTP API for restaurant search and favourites export.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::{DownloadResponse, SearchParams, UNRESPONSIVE_PROVIDERS};
pub use routes::create_router;
pub use state::AppState;
