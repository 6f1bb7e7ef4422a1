//! restaurant-finder: occasion-based restaurant search across Google Places
//! and Yelp, with favourites export to xlsx.
//!
//! An occasion tag is mapped to a canned query, both providers are searched
//! concurrently, and their hits are merged into one deduplicated list.

pub mod config;
pub mod export;
pub mod network;
pub mod providers;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use providers::Provider;
pub use query::{Occasion, SearchQuery};
pub use results::{MergedListing, ProviderHit};
pub use search::Search;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
