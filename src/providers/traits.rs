//! Provider traits and types

use crate::results::{ProviderError, ProviderHit, ProviderKind};
use std::collections::HashMap;

/// HTTP request to be made on behalf of a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: Vec<(String, String)>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up a query parameter by name
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl ProviderResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ProviderError> {
        serde_json::from_str(&self.text).map_err(|e| ProviderError::Parse(e.to_string()))
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with the status code unless the response is 2xx
    pub fn error_for_status(&self) -> Result<(), ProviderError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ProviderError::Http(self.status))
        }
    }
}

/// An upstream restaurant search provider
///
/// Providers only build requests and parse responses; the
/// [`HttpClient`](crate::network::HttpClient) performs the I/O.
pub trait Provider: Send + Sync {
    /// Which provider this is
    fn kind(&self) -> ProviderKind;

    /// Provider name
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Whether a credential is configured. Unconfigured providers are
    /// skipped without any request.
    fn is_configured(&self) -> bool;

    /// Build the HTTP request for a free-text search
    fn request(&self, query: &str) -> Result<ProviderRequest, ProviderError>;

    /// Parse the HTTP response into hits, preserving the provider's order
    fn response(&self, response: ProviderResponse) -> Result<Vec<ProviderHit>, ProviderError>;
}
