//! Yelp Fusion business search provider

use super::traits::*;
use crate::config::YelpSettings;
use crate::results::{ProviderError, ProviderHit, ProviderKind};
use serde::Deserialize;
use tracing::debug;

/// Yelp business search
pub struct Yelp {
    base_url: String,
    api_key: Option<String>,
    location: String,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
struct Business {
    name: Option<String>,
    #[serde(default)]
    location: Location,
    rating: Option<f64>,
    review_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    #[serde(default)]
    display_address: Vec<String>,
}

impl Yelp {
    pub fn new(api_key: Option<String>) -> Self {
        Self::from_settings(&YelpSettings {
            api_key,
            ..Default::default()
        })
    }

    pub fn from_settings(settings: &YelpSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            location: settings.location.clone(),
            limit: settings.limit,
        }
    }

    /// Point the provider at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Provider for Yelp {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Yelp
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn request(&self, query: &str) -> Result<ProviderRequest, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Api("missing API key".to_string()))?;

        Ok(ProviderRequest::get(&self.base_url)
            .header("Authorization", format!("Bearer {key}"))
            .param("term", query)
            .param("location", &self.location)
            .param("limit", self.limit.to_string()))
    }

    fn response(&self, response: ProviderResponse) -> Result<Vec<ProviderHit>, ProviderError> {
        response.error_for_status()?;
        let body: SearchResponse = response.json()?;

        let hits = body
            .businesses
            .into_iter()
            .filter_map(|business| {
                let Some(name) = business.name else {
                    debug!("Skipping business without a name");
                    return None;
                };
                Some(
                    ProviderHit::new(name, ProviderKind::Yelp)
                        .with_address(business.location.display_address.join(", "))
                        .with_rating(business.rating)
                        .with_review_count(business.review_count),
                )
            })
            .collect();

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yelp_request() {
        let yelp = Yelp::new(Some("token".to_string()));
        let request = yelp.request("romantic fine dining Florida").unwrap();

        assert!(request.url.contains("api.yelp.com"));
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer token")
        );
        assert_eq!(request.param_value("term"), Some("romantic fine dining Florida"));
        assert_eq!(request.param_value("location"), Some("Florida"));
        assert_eq!(request.param_value("limit"), Some("10"));
    }

    #[test]
    fn test_parse_businesses() {
        let yelp = Yelp::new(Some("token".to_string()));
        let body = serde_json::json!({
            "businesses": [
                {
                    "name": "Joe's Stone Crab",
                    "location": { "display_address": ["11 Washington Ave", "Miami Beach, FL 33139"] },
                    "rating": 4.5,
                    "review_count": 5120
                },
                { "name": "No Location" }
            ]
        });

        let hits = yelp
            .response(ProviderResponse {
                status: 200,
                text: body.to_string(),
            })
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].address, "11 Washington Ave, Miami Beach, FL 33139");
        assert_eq!(hits[0].rating, Some(4.5));
        assert_eq!(hits[0].review_count, Some(5120));
        assert_eq!(hits[1].address, "");
    }

    #[test]
    fn test_unauthorized() {
        let yelp = Yelp::new(Some("bad".to_string()));
        let err = yelp
            .response(ProviderResponse {
                status: 401,
                text: r#"{"error":{"code":"TOKEN_INVALID"}}"#.to_string(),
            })
            .unwrap_err();
        assert_eq!(err, ProviderError::Http(401));
    }
}
