//! Search outcome models

use crate::query::SearchQuery;
use crate::results::{MergedListing, ProviderError, ProviderHit, ProviderKind};
use std::time::Duration;

/// What one provider contributed to a search
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// The provider answered; the list may be empty
    Hits(Vec<ProviderHit>),
    /// No credential configured; no request was made
    Disabled,
    /// The provider was called and failed
    Failed(ProviderError),
}

impl ProviderOutcome {
    /// Hits contributed to the merge; disabled and failed providers give none
    pub fn into_hits(self) -> Vec<ProviderHit> {
        match self {
            Self::Hits(hits) => hits,
            Self::Disabled | Self::Failed(_) => Vec::new(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Outcome and timing of one provider call
#[derive(Debug, Clone)]
pub struct ProviderReport {
    pub provider: ProviderKind,
    pub outcome: ProviderOutcome,
    pub elapsed: Duration,
}

/// Everything a search produced, before merging
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    /// One report per provider, in merge priority order
    pub reports: Vec<ProviderReport>,
}

impl SearchOutcome {
    /// Providers that were called and failed
    pub fn failures(&self) -> Vec<(ProviderKind, &ProviderError)> {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.error().map(|e| (r.provider, e)))
            .collect()
    }

    /// Merge hits across providers in priority order
    pub fn into_listings(self, address_limit: usize, max_results: usize) -> Vec<MergedListing> {
        crate::results::merge_hits(
            self.reports.into_iter().map(|r| r.outcome.into_hits()),
            address_limit,
            max_results,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(provider: ProviderKind, outcome: ProviderOutcome) -> ProviderReport {
        ProviderReport {
            provider,
            outcome,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_disabled_and_empty_are_distinct() {
        let empty = ProviderOutcome::Hits(Vec::new());
        assert!(!empty.is_disabled());
        assert!(ProviderOutcome::Disabled.is_disabled());
        assert_ne!(empty, ProviderOutcome::Disabled);
    }

    #[test]
    fn test_failed_provider_contributes_nothing() {
        let outcome = SearchOutcome {
            query: SearchQuery::text("q"),
            reports: vec![
                report(
                    ProviderKind::GooglePlaces,
                    ProviderOutcome::Failed(ProviderError::Http(500)),
                ),
                report(
                    ProviderKind::Yelp,
                    ProviderOutcome::Hits(vec![ProviderHit::new("Versailles", ProviderKind::Yelp)]),
                ),
            ],
        };

        let failures = outcome.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, ProviderKind::GooglePlaces);

        let listings = outcome.into_listings(40, 15);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].provider(), ProviderKind::Yelp);
    }
}
