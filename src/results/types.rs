//! Result type definitions

use serde::Serialize;
use std::fmt;

/// Upstream provider that produced a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    GooglePlaces,
    Yelp,
}

impl ProviderKind {
    /// Stable name used in logs, headers and error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GooglePlaces => "google_places",
            Self::Yelp => "yelp",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single hit from one provider, normalized to a common shape
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderHit {
    /// Display name, used as the deduplication key
    pub name: String,
    /// Full address as the provider reports it
    pub address: String,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub provider: ProviderKind,
}

impl ProviderHit {
    pub fn new(name: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            rating: None,
            review_count: None,
            provider,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_review_count(mut self, review_count: Option<u64>) -> Self {
        self.review_count = review_count;
        self
    }
}

/// Rating fields of a listing, keyed by the provider that supplied them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListingRatings {
    Google {
        rating_google: Option<f64>,
        reviews_google: Option<u64>,
    },
    Yelp {
        rating_yelp: Option<f64>,
        reviews_yelp: Option<u64>,
    },
}

impl ListingRatings {
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::Google { .. } => ProviderKind::GooglePlaces,
            Self::Yelp { .. } => ProviderKind::Yelp,
        }
    }
}

/// One deduplicated restaurant in a search response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedListing {
    pub name: String,
    /// Display address
    pub city: String,
    #[serde(flatten)]
    pub ratings: ListingRatings,
}

impl MergedListing {
    /// Build a listing from a hit. `address_limit` caps the Google address
    /// in characters; Yelp addresses are kept whole.
    pub fn from_hit(hit: ProviderHit, address_limit: usize) -> Self {
        match hit.provider {
            ProviderKind::GooglePlaces => Self {
                name: hit.name,
                city: truncate_chars(&hit.address, address_limit),
                ratings: ListingRatings::Google {
                    rating_google: hit.rating,
                    reviews_google: hit.review_count,
                },
            },
            ProviderKind::Yelp => Self {
                name: hit.name,
                city: hit.address,
                ratings: ListingRatings::Yelp {
                    rating_yelp: hit.rating,
                    reviews_yelp: hit.review_count,
                },
            },
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.ratings.provider()
    }
}

fn truncate_chars(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Provider failure types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("API error: {0}")]
    Api(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_address_truncation() {
        let address = "1234 Collins Avenue, Miami Beach, FL 33140, United States";
        let hit = ProviderHit::new("Delilah Miami", ProviderKind::GooglePlaces)
            .with_address(address)
            .with_rating(Some(4.6));

        let listing = MergedListing::from_hit(hit, 40);
        assert_eq!(listing.city.chars().count(), 40);
        assert_eq!(listing.city, &address[..40]);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let address = "Café Señor, Calle Ocho ñññññññññññññññññññññññññ";
        let hit = ProviderHit::new("Señor", ProviderKind::GooglePlaces).with_address(address);

        let listing = MergedListing::from_hit(hit, 40);
        assert_eq!(listing.city.chars().count(), 40);
        assert!(address.starts_with(&listing.city));
    }

    #[test]
    fn test_yelp_address_kept_whole() {
        let address = "1234 Collins Avenue, Miami Beach, FL 33140, United States";
        let hit = ProviderHit::new("Joe's", ProviderKind::Yelp).with_address(address);

        let listing = MergedListing::from_hit(hit, 40);
        assert_eq!(listing.city, address);
    }

    #[test]
    fn test_listing_json_shape() {
        let hit = ProviderHit::new("Delilah Miami", ProviderKind::GooglePlaces)
            .with_address("Miami")
            .with_rating(Some(4.6))
            .with_review_count(Some(812));

        let json = serde_json::to_value(MergedListing::from_hit(hit, 40)).unwrap();
        assert_eq!(json["name"], "Delilah Miami");
        assert_eq!(json["city"], "Miami");
        assert_eq!(json["rating_google"], 4.6);
        assert_eq!(json["reviews_google"], 812);
        assert!(json.get("rating_yelp").is_none());
        assert!(json.get("reviews_yelp").is_none());
    }

    #[test]
    fn test_missing_rating_serializes_null() {
        let hit = ProviderHit::new("Joe's", ProviderKind::Yelp);
        let json = serde_json::to_value(MergedListing::from_hit(hit, 40)).unwrap();
        assert!(json["rating_yelp"].is_null());
        assert!(json.get("rating_google").is_none());
    }
}
