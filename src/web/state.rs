//! Application state shared across handlers

use crate::config::Settings;
use crate::export::{download_base, DemoFavourites, ExportError, Exporter, FavouritesSource};
use crate::network::HttpClient;
use crate::providers::ProviderLoader;
use crate::search::Search;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Settings loaded at startup
    pub settings: Arc<Settings>,
    /// Search executor
    pub search: Arc<Search>,
    /// Favourites exporter
    pub exporter: Arc<Exporter>,
}

impl AppState {
    /// Create new application state exporting the demo favourites
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        Self::with_favourites(settings, client, Arc::new(DemoFavourites))
    }

    /// Create new application state with a specific favourites source
    pub fn with_favourites(
        settings: Settings,
        client: HttpClient,
        favourites: Arc<dyn FavouritesSource>,
    ) -> anyhow::Result<Self> {
        let providers = ProviderLoader::load(&settings);
        let search = Arc::new(Search::from_settings(client, providers, &settings));
        let exporter = Arc::new(Exporter::from_settings(favourites, &settings.export));

        Ok(Self {
            settings: Arc::new(settings),
            search,
            exporter,
        })
    }

    /// Hostname for download URLs: the configured one, else the request's
    /// Host header if it is a bare `host[:port]`, else the fallback
    pub fn public_host<'a>(&'a self, request_host: Option<&'a str>) -> &'a str {
        let server = &self.settings.server;
        if let Some(host) = server.public_hostname.as_deref() {
            return host;
        }

        match request_host {
            Some(host) if is_bare_host(&server.public_scheme, host) => host,
            Some(host) => {
                debug!("Ignoring Host header {:?} for download URLs", host);
                &server.fallback_hostname
            }
            None => &server.fallback_hostname,
        }
    }

    /// Base URL for persisted workbooks as seen by this request
    pub fn download_base(&self, request_host: Option<&str>) -> Result<Url, ExportError> {
        download_base(&self.settings.server.public_scheme, self.public_host(request_host))
    }
}

fn is_bare_host(scheme: &str, host: &str) -> bool {
    if host.is_empty() {
        return false;
    }

    Url::parse(&format!("{scheme}://{host}/")).is_ok_and(|url| {
        url.host().is_some()
            && url.username().is_empty()
            && url.password().is_none()
            && url.path() == "/"
            && url.query().is_none()
            && url.fragment().is_none()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(public_hostname: Option<&str>) -> AppState {
        let mut settings = Settings::default();
        settings.server.public_hostname = public_hostname.map(str::to_string);
        AppState::new(settings, HttpClient::new().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_public_host_resolution() {
        let configured = state(Some("eats.example.com"));
        assert_eq!(configured.public_host(Some("internal:8000")), "eats.example.com");

        let inferred = state(None);
        assert_eq!(inferred.public_host(Some("internal:8000")), "internal:8000");
        assert_eq!(inferred.public_host(Some("")), "localhost:8000");
        assert_eq!(inferred.public_host(None), "localhost:8000");
    }

    #[tokio::test]
    async fn test_public_host_rejects_malformed_header() {
        let state = state(None);

        for host in [
            "bad host",
            "evil.com/phish",
            "user@evil.com",
            "user:pw@evil.com",
            "evil.com?x=1",
            "evil.com#top",
            ":8000",
        ] {
            assert_eq!(state.public_host(Some(host)), "localhost:8000", "{host}");
        }

        assert_eq!(state.public_host(Some("127.0.0.1:9000")), "127.0.0.1:9000");
        assert_eq!(state.public_host(Some("[::1]:9000")), "[::1]:9000");
    }

    #[tokio::test]
    async fn test_download_base() {
        let state = state(None);

        let base = state.download_base(Some("user@evil.com")).unwrap();
        assert_eq!(base.as_str(), "https://localhost:8000/static/");

        let base = state.download_base(Some("api.local:9000")).unwrap();
        assert_eq!(base.as_str(), "https://api.local:9000/static/");
    }
}
