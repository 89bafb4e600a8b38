use thiserror::Error;

/// Error type for the tournament module
#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Rate limit error: {0}")]
    RateLimitError(String),
}

pub type Result<T> = std::result::Result<T, TournamentError>;
