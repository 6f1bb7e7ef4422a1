//! Settings structures for restaurant-finder configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub providers: ProvidersSettings,
    pub outgoing: OutgoingSettings,
    pub export: ExportSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(val) = non_empty("GOOGLE_API_KEY") {
            self.providers.google_places.api_key = Some(val);
        }
        if let Some(val) = non_empty("YELP_API_KEY") {
            self.providers.yelp.api_key = Some(val);
        }
        if let Some(val) = non_empty("PUBLIC_HOSTNAME") {
            self.server.public_hostname = Some(val);
        }
        if let Some(val) = non_empty("PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = non_empty("BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = non_empty("EXPORT_DIR") {
            self.export.dir = PathBuf::from(val);
        }
        if let Some(val) = non_empty("EXPORT_DELIVERY") {
            match val.to_ascii_lowercase().as_str() {
                "stream" => self.export.delivery = DeliveryMode::Stream,
                "persist" => self.export.delivery = DeliveryMode::Persist,
                other => tracing::warn!("Ignoring unknown EXPORT_DELIVERY value: {}", other),
            }
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Externally visible hostname used in download URLs
    pub public_hostname: Option<String>,
    /// Scheme used in download URLs
    pub public_scheme: String,
    /// Hostname used when neither the setting nor a Host header is available
    pub fallback_hostname: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "0.0.0.0".to_string(),
            public_hostname: None,
            public_scheme: "https".to_string(),
            fallback_hostname: "localhost:8000".to_string(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Fail the whole request when a configured provider errors
    pub fail_on_provider_error: bool,
    /// Maximum number of merged listings returned
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fail_on_provider_error: false,
            max_results: 15,
        }
    }
}

/// Upstream provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersSettings {
    pub google_places: GooglePlacesSettings,
    pub yelp: YelpSettings,
}

/// Google Places text search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GooglePlacesSettings {
    /// API key; the provider is disabled without one
    pub api_key: Option<String>,
    /// Text search endpoint
    pub base_url: String,
    /// Maximum characters kept from the formatted address
    pub address_limit: usize,
}

impl Default for GooglePlacesSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://maps.googleapis.com/maps/api/place/textsearch/json".to_string(),
            address_limit: 40,
        }
    }
}

/// Yelp Fusion business search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YelpSettings {
    /// Bearer token; the provider is disabled without one
    pub api_key: Option<String>,
    /// Business search endpoint
    pub base_url: String,
    /// Location bias sent with every search
    pub location: String,
    /// Result count cap
    pub limit: u32,
}

impl Default for YelpSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.yelp.com/v3/businesses/search".to_string(),
            location: "Florida".to_string(),
            limit: 10,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Extra attempts after a transport error or 5xx response
    pub max_retries: u32,
    /// Pause between attempts in milliseconds
    pub retry_backoff_ms: u64,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            max_retries: 1,
            retry_backoff_ms: 200,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// How a generated spreadsheet reaches the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Workbook bytes are the response body
    #[default]
    Stream,
    /// Workbook is written under the export dir and served from /static
    Persist,
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub delivery: DeliveryMode,
    /// Directory holding persisted workbooks
    pub dir: PathBuf,
    /// Age after which persisted workbooks are removed
    pub retention_secs: Option<u64>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            delivery: DeliveryMode::Stream,
            dir: PathBuf::from("exports"),
            retention_secs: Some(24 * 60 * 60),
        }
    }
}
