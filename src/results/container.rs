//! Merging provider hits into a deduplicated listing

use super::types::{MergedListing, ProviderHit};
use std::collections::HashSet;

/// Accumulates hits in priority order, keeping the first listing per name
#[derive(Debug, Clone)]
pub struct ListingMerger {
    listings: Vec<MergedListing>,
    seen: HashSet<String>,
    address_limit: usize,
    max_results: usize,
}

impl ListingMerger {
    pub fn new(address_limit: usize, max_results: usize) -> Self {
        Self {
            listings: Vec::new(),
            seen: HashSet::new(),
            address_limit,
            max_results,
        }
    }

    /// Add a hit unless its exact name was already accepted.
    /// Returns whether the hit was kept.
    pub fn add_hit(&mut self, hit: ProviderHit) -> bool {
        if self.seen.contains(&hit.name) {
            return false;
        }
        self.seen.insert(hit.name.clone());
        self.listings
            .push(MergedListing::from_hit(hit, self.address_limit));
        true
    }

    /// Add hits from one provider in that provider's order
    pub fn extend_hits(&mut self, hits: impl IntoIterator<Item = ProviderHit>) {
        for hit in hits {
            self.add_hit(hit);
        }
    }

    /// Number of distinct listings accumulated so far
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listings in accumulation order, capped at `max_results`
    pub fn into_listings(self) -> Vec<MergedListing> {
        let mut listings = self.listings;
        listings.truncate(self.max_results);
        listings
    }
}

/// Merge hit lists given in provider priority order
pub fn merge_hits<I>(hit_lists: I, address_limit: usize, max_results: usize) -> Vec<MergedListing>
where
    I: IntoIterator<Item = Vec<ProviderHit>>,
{
    let mut merger = ListingMerger::new(address_limit, max_results);
    for hits in hit_lists {
        merger.extend_hits(hits);
    }
    merger.into_listings()
}
