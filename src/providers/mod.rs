//! Upstream search providers
//!
//! Defines the Provider trait and the two restaurant search backends.

mod loader;
mod traits;

pub mod google_places;
pub mod yelp;

pub use google_places::GooglePlaces;
pub use loader::ProviderLoader;
pub use traits::*;
pub use yelp::Yelp;
