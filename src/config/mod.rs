//! Configuration module for restaurant-finder
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are built once at startup and handed to the web state.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "RESTAURANT_FINDER_SETTINGS_PATH";

/// Load settings from the first settings file found, or defaults,
/// then apply environment overrides.
pub fn load() -> Result<Settings> {
    let mut settings = match find_settings_file() {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    Ok(settings)
}

fn find_settings_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SETTINGS_PATH_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/restaurant-finder/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("restaurant-finder/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}
