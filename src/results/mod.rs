//! Result types and merging for restaurant search
//!
//! Provider hits are normalized into [`ProviderHit`] and folded into
//! [`MergedListing`]s, one per distinct name.

mod container;
mod types;

pub use container::{merge_hits, ListingMerger};
pub use types::*;
