//! Error types for the quote board

use crate::types::Group;
use thiserror::Error;

/// Errors that can occur when fetching a quote from a provider
///
/// Every variant is a per-ticker fetch failure: the refresh cycle logs it and
/// moves on to the next instrument.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Invalid response from provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A numeric field could not be turned into a finite number
    #[error("Unparseable field {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Ticker not known to this provider
    #[error("Ticker not supported: {0}")]
    UnsupportedTicker(String),

    /// Provider API error
    #[error("Provider API error: {0}")]
    ApiError(String),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,
}

impl FetchError {
    /// Creates an InvalidField error
    pub fn invalid_field(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
        }
    }
}

/// Errors raised by the snapshot store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The ticker is not a member of the group. Group membership is fixed at
    /// startup, so this means a broken invariant.
    #[error("Unknown ticker {ticker} in {group} group")]
    UnknownTicker { group: Group, ticker: String },
}

impl StoreError {
    /// Creates an UnknownTicker error
    pub fn unknown_ticker(group: Group, ticker: &str) -> Self {
        Self::UnknownTicker {
            group,
            ticker: ticker.to_string(),
        }
    }
}

/// Fatal errors that end the board
#[derive(Debug, Error)]
pub enum BoardError {
    /// The terminal could not be put into raw / alternate-screen mode
    #[error("Failed to initialize display: {0}")]
    DisplayInit(#[source] std::io::Error),

    /// Writing to an initialized terminal failed
    #[error("Display error: {0}")]
    Display(#[from] std::io::Error),

    /// Store invariant violated
    #[error(transparent)]
    Store(#[from] StoreError),
}
