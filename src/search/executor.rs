//! Search execution and orchestration

use super::models::{ProviderOutcome, ProviderReport, SearchOutcome};
use crate::config::Settings;
use crate::network::HttpClient;
use crate::providers::Provider;
use crate::query::SearchQuery;
use crate::results::{MergedListing, ProviderError, ProviderKind};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A provider failed and the search is configured to fail with it
#[derive(Debug, Clone, thiserror::Error)]
#[error("provider {provider} failed: {source}")]
pub struct SearchError {
    pub provider: ProviderKind,
    #[source]
    pub source: ProviderError,
}

/// Merged listings plus the providers that failed along the way
#[derive(Debug, Clone)]
pub struct RestaurantSearch {
    pub query: SearchQuery,
    pub listings: Vec<MergedListing>,
    /// Providers that failed and were treated as empty
    pub unresponsive: Vec<ProviderKind>,
}

/// Search executor that fans a query out to every provider
pub struct Search {
    /// HTTP client for making requests
    client: HttpClient,
    /// Providers in merge priority order
    providers: Vec<Arc<dyn Provider>>,
    address_limit: usize,
    max_results: usize,
    fail_on_provider_error: bool,
}

impl Search {
    /// Create a new search executor
    pub fn new(client: HttpClient, providers: Vec<Arc<dyn Provider>>) -> Self {
        let defaults = Settings::default();
        Self {
            client,
            providers,
            address_limit: defaults.providers.google_places.address_limit,
            max_results: defaults.search.max_results,
            fail_on_provider_error: defaults.search.fail_on_provider_error,
        }
    }

    /// Create an executor using the limits and failure policy from settings
    pub fn from_settings(
        client: HttpClient,
        providers: Vec<Arc<dyn Provider>>,
        settings: &Settings,
    ) -> Self {
        Self::new(client, providers)
            .with_address_limit(settings.providers.google_places.address_limit)
            .with_max_results(settings.search.max_results)
            .with_fail_on_provider_error(settings.search.fail_on_provider_error)
    }

    pub fn with_address_limit(mut self, limit: usize) -> Self {
        self.address_limit = limit;
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn with_fail_on_provider_error(mut self, fail: bool) -> Self {
        self.fail_on_provider_error = fail;
        self
    }

    /// Resolve the occasion, query every provider and merge the hits
    pub async fn search_restaurants(&self, occasion: &str) -> Result<RestaurantSearch, SearchError> {
        let query = SearchQuery::for_occasion(occasion);
        let outcome = self.execute(&query).await;

        let failures: Vec<(ProviderKind, ProviderError)> = outcome
            .failures()
            .into_iter()
            .map(|(p, e)| (p, e.clone()))
            .collect();

        if self.fail_on_provider_error {
            if let Some((provider, source)) = failures.first().cloned() {
                return Err(SearchError { provider, source });
            }
        }

        let unresponsive = failures.iter().map(|(p, _)| *p).collect();
        let listings = outcome.into_listings(self.address_limit, self.max_results);

        info!(
            "Search '{}' returned {} listings",
            query.text,
            listings.len()
        );

        Ok(RestaurantSearch {
            query,
            listings,
            unresponsive,
        })
    }

    /// Query all providers concurrently. Reports keep provider order
    /// regardless of which call finishes first.
    pub async fn execute(&self, query: &SearchQuery) -> SearchOutcome {
        let futures = self
            .providers
            .iter()
            .map(|provider| self.search_provider(provider.as_ref(), &query.text));

        let reports = join_all(futures).await;

        SearchOutcome {
            query: query.clone(),
            reports,
        }
    }

    /// Search a single provider
    async fn search_provider(&self, provider: &dyn Provider, text: &str) -> ProviderReport {
        let start = Instant::now();
        let outcome = self.call_provider(provider, text).await;
        let elapsed = start.elapsed();

        match &outcome {
            ProviderOutcome::Hits(hits) => debug!(
                "Provider {} returned {} hits in {:?}",
                provider.name(),
                hits.len(),
                elapsed
            ),
            ProviderOutcome::Disabled => {
                debug!("Provider {} not configured, skipping", provider.name())
            }
            ProviderOutcome::Failed(e) => {
                warn!("Provider {} failed after {:?}: {}", provider.name(), elapsed, e)
            }
        }

        ProviderReport {
            provider: provider.kind(),
            outcome,
            elapsed,
        }
    }

    async fn call_provider(&self, provider: &dyn Provider, text: &str) -> ProviderOutcome {
        if !provider.is_configured() {
            return ProviderOutcome::Disabled;
        }

        let request = match provider.request(text) {
            Ok(req) => req,
            Err(e) => return ProviderOutcome::Failed(e),
        };

        match self.client.execute(&request).await {
            Ok(response) => match provider.response(response) {
                Ok(hits) => ProviderOutcome::Hits(hits),
                Err(e) => ProviderOutcome::Failed(e),
            },
            Err(e) => ProviderOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ProviderRequest, ProviderResponse};
    use crate::results::ProviderHit;

    /// Provider that never reaches the network
    struct Unreachable;

    impl Provider for Unreachable {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Yelp
        }

        fn is_configured(&self) -> bool {
            false
        }

        fn request(&self, _query: &str) -> Result<ProviderRequest, ProviderError> {
            panic!("request built for an unconfigured provider")
        }

        fn response(&self, _response: ProviderResponse) -> Result<Vec<ProviderHit>, ProviderError> {
            panic!("response parsed for an unconfigured provider")
        }
    }

    #[tokio::test]
    async fn test_search_executor_creation() {
        let client = HttpClient::new().unwrap();
        let search = Search::new(client, Vec::new());

        let results = search.search_restaurants("WorkLunch").await.unwrap();

        assert_eq!(results.query.text, "healthy bowl salad Florida");
        assert!(results.listings.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_disabled() {
        let client = HttpClient::new().unwrap();
        let search = Search::new(client, vec![Arc::new(Unreachable)]);

        let outcome = search.execute(&SearchQuery::text("anything")).await;

        assert_eq!(outcome.reports.len(), 1);
        assert!(outcome.reports[0].outcome.is_disabled());
        assert!(outcome.failures().is_empty());
    }
}
