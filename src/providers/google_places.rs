//! Google Places text search provider
//!
//! Uses the official Places API text search endpoint. The API key travels
//! as the `key` query parameter.

use super::traits::*;
use crate::config::GooglePlacesSettings;
use crate::results::{ProviderError, ProviderHit, ProviderKind};
use serde::Deserialize;
use tracing::debug;

/// Google Places text search
pub struct GooglePlaces {
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
}

impl GooglePlaces {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            base_url: GooglePlacesSettings::default().base_url,
            api_key,
        }
    }

    pub fn from_settings(settings: &GooglePlacesSettings) -> Self {
        Self::new(settings.api_key.clone()).with_base_url(&settings.base_url)
    }

    /// Point the provider at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Provider for GooglePlaces {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GooglePlaces
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
            .param("query", query)
            .param("key", key))
    }

    fn response(&self, response: ProviderResponse) -> Result<Vec<ProviderHit>, ProviderError> {
        response.error_for_status()?;
        let body: TextSearchResponse = response.json()?;

        // Places reports quota and key problems with a 200 and a status field
        match body.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(status) => {
                let message = match body.error_message {
                    Some(msg) => format!("{status}: {msg}"),
                    None => status.to_string(),
                };
                return Err(ProviderError::Api(message));
            }
        }

        let hits = body
            .results
            .into_iter()
            .filter_map(|place| {
                let Some(name) = place.name else {
                    debug!("Skipping place without a name");
                    return None;
                };
                Some(
                    ProviderHit::new(name, ProviderKind::GooglePlaces)
                        .with_address(place.formatted_address.unwrap_or_default())
                        .with_rating(place.rating)
                        .with_review_count(place.user_ratings_total),
                )
            })
            .collect();

        Ok(hits)
    }
}
