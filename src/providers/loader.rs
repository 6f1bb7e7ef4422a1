//! Provider loader for initializing providers from configuration

use super::traits::Provider;
use super::{GooglePlaces, Yelp};
use crate::config::Settings;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for building the provider list from settings
pub struct ProviderLoader;

impl ProviderLoader {
    /// Build providers in merge priority order: Google Places, then Yelp
    pub fn load(settings: &Settings) -> Vec<Arc<dyn Provider>> {
        let providers: Vec<Arc<dyn Provider>> = vec![
            Arc::new(GooglePlaces::from_settings(&settings.providers.google_places)),
            Arc::new(Yelp::from_settings(&settings.providers.yelp)),
        ];

        for provider in &providers {
            if provider.is_configured() {
                info!("Loaded provider: {}", provider.name());
            } else {
                warn!(
                    "Provider {} has no credential and will return no results",
                    provider.name()
                );
            }
        }

        providers
    }
}
