//! HTTP client for making requests to search providers

use crate::config::OutgoingSettings;
use crate::providers::{ProviderRequest, ProviderResponse};
use crate::results::ProviderError;
use anyhow::{bail, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// User agent sent with every outbound request
pub const USER_AGENT: &str = concat!("restaurant-finder/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper shared by all providers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let timeout = match Duration::try_from_secs_f64(settings.request_timeout) {
            Ok(timeout) if !timeout.is_zero() => timeout,
            _ => bail!(
                "outgoing.request_timeout must be a positive number of seconds, got {}",
                settings.request_timeout
            ),
        };

        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .gzip(true);

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            max_retries: settings.max_retries,
            retry_backoff: Duration::from_millis(settings.retry_backoff_ms),
        })
    }

    /// Execute a provider request, retrying transport errors and 5xx
    /// responses up to the configured limit
    pub async fn execute(&self, request: &ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut attempt = 0;
        loop {
            let outcome = self.execute_once(request).await;
            let retryable = match &outcome {
                Ok(response) => response.status >= 500,
                Err(ProviderError::Timeout) | Err(ProviderError::Network(_)) => true,
                Err(_) => false,
            };

            if !retryable || attempt >= self.max_retries {
                return outcome;
            }

            attempt += 1;
            warn!(
                "Retrying {} (attempt {} of {})",
                request.url,
                attempt,
                self.max_retries
            );
            tokio::time::sleep(self.retry_backoff).await;
        }
    }

    async fn execute_once(&self, request: &ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut req_builder = self.client.get(&request.url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await.map_err(transport_error)?;

        Self::parse_response(response).await
    }

    /// Parse response into ProviderResponse
    async fn parse_response(response: Response) -> Result<ProviderResponse, ProviderError> {
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;

        debug!("Received {} ({} bytes)", status, text.len());

        Ok(ProviderResponse { status, text })
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_retry_client(max_retries: u32) -> HttpClient {
        HttpClient::with_settings(&OutgoingSettings {
            max_retries,
            retry_backoff_ms: 1,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        for request_timeout in [-1.0, 0.0, f64::NAN, f64::INFINITY, 1e300] {
            let result = HttpClient::with_settings(&OutgoingSettings {
                request_timeout,
                ..Default::default()
            });
            assert!(result.is_err(), "{request_timeout}");
        }
    }

    #[tokio::test]
    async fn test_sends_params_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "tacos"))
            .and(header("Authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let request = ProviderRequest::get(format!("{}/search", server.uri()))
            .header("Authorization", "Bearer abc")
            .param("term", "tacos");

        let response = fast_retry_client(0).execute(&request).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.text, "{}");
    }

    #[tokio::test]
    async fn test_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let request = ProviderRequest::get(server.uri());
        let response = fast_retry_client(2).execute(&request).await.unwrap();
        assert_eq!(response.status, 503);
    }

    #[tokio::test]
    async fn test_client_errors_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let request = ProviderRequest::get(server.uri());
        let response = fast_retry_client(3).execute(&request).await.unwrap();
        assert_eq!(response.status, 403);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = ProviderRequest::get(format!("http://{addr}/"));
        let err = fast_retry_client(0).execute(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
