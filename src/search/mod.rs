//! Search orchestration module
//!
//! Runs an occasion query against every provider concurrently and merges
//! the results in provider priority order.

mod executor;
mod models;

pub use executor::{RestaurantSearch, Search, SearchError};
pub use models::*;
