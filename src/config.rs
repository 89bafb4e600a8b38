//! Configuration management for the `PadelScout` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::PadelScoutError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `PadelScout` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PadelScoutConfig {
    /// TenUp search API configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// Geocoding API configuration
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// TenUp search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL for the FFT mobile API
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    /// Application id sent in the X-APPLICATION-ID header
    #[serde(default = "default_application_id")]
    pub application_id: String,
    /// Bearer token for the mobile API (optional; some endpoints are open)
    pub access_token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of records requested per search
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

/// Geocoding API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoder_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Search radius in kilometers
    #[serde(default = "default_radius")]
    pub radius_km: u32,
    /// Maximum number of results printed by the CLI
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

// Default value functions
fn default_search_base_url() -> String {
    "https://api.fft.fr/fft/v1".to_string()
}

fn default_application_id() -> String {
    "tenup-app".to_string()
}

fn default_geocoder_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_search_limit() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_radius() -> u32 {
    100
}

fn default_max_results() -> u32 {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            application_id: default_application_id(),
            access_token: None,
            timeout_seconds: default_timeout(),
            limit: default_search_limit(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius(),
            max_results: default_max_results(),
        }
    }
}

impl PadelScoutConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides with PADELSCOUT_ prefix, e.g.
        // PADELSCOUT_SEARCH__ACCESS_TOKEN
        builder = builder.add_source(
            Environment::with_prefix("PADELSCOUT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: PadelScoutConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("padelscout").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.search.timeout_seconds == 0 || self.search.timeout_seconds > 300 {
            return Err(
                PadelScoutError::config("Search timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.geocoder.timeout_seconds == 0 || self.geocoder.timeout_seconds > 300 {
            return Err(PadelScoutError::config(
                "Geocoder timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.search.limit == 0 || self.search.limit > 500 {
            return Err(
                PadelScoutError::config("Search limit must be between 1 and 500").into(),
            );
        }

        if self.defaults.radius_km == 0 || self.defaults.radius_km > 500 {
            return Err(
                PadelScoutError::config("Search radius must be between 1 and 500 km").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PadelScoutError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for url in [&self.search.base_url, &self.geocoder.base_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PadelScoutError::config(
                    "API base URLs must be valid HTTP or HTTPS URLs",
                )
                .into());
            }
        }

        if let Some(token) = &self.search.access_token {
            if token.trim().is_empty() {
                return Err(PadelScoutError::config(
                    "Access token cannot be empty if provided. Either remove it or provide a valid token.",
                )
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PadelScoutConfig::default();
        assert_eq!(config.search.base_url, "https://api.fft.fr/fft/v1");
        assert_eq!(config.search.application_id, "tenup-app");
        assert_eq!(config.search.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.radius_km, 100);
        assert!(config.search.access_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = PadelScoutConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = PadelScoutConfig::default();
        config.search.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));

        let mut config = PadelScoutConfig::default();
        config.defaults.radius_km = 9999;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_token() {
        let mut config = PadelScoutConfig::default();
        config.search.access_token = Some("  ".to_string());
        assert!(config.validate().is_err());

        config.search.access_token = Some("a-real-token".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = PadelScoutConfig::default();
        config.geocoder.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = PadelScoutConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("padelscout"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
