//! Error types and handling for the `PadelScout` application

use thiserror::Error;

use crate::tournament::TournamentError;

/// Main error type for the `PadelScout` application
#[derive(Error, Debug)]
pub enum PadelScoutError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Geocoding failures, including "place not found"
    #[error("Geocoding error: {message}")]
    Geocode { message: String },

    /// Search API failures
    #[error("Search error: {source}")]
    Search {
        #[from]
        source: TournamentError,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl PadelScoutError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new geocoding error
    pub fn geocode<S: Into<String>>(message: S) -> Self {
        Self::Geocode {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PadelScoutError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PadelScoutError::Geocode { message } => {
                format!("Could not locate that place: {message}")
            }
            PadelScoutError::Search { source } => match source {
                TournamentError::AuthenticationError(_) => {
                    "TenUp session expired. Refresh your access token and retry.".to_string()
                }
                TournamentError::RateLimitError(_) => {
                    "TenUp is rate-limiting requests. Wait a moment and retry.".to_string()
                }
                _ => "Tournament search failed. Your previous results are unchanged.".to_string(),
            },
            PadelScoutError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PadelScoutError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            PadelScoutError::General { message } => message.clone(),
        }
    }
}
