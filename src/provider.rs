//! Provider abstraction for fetching quotes from external sources

use crate::{error::FetchError, types::Snapshot};
use async_trait::async_trait;

/// Trait for quote providers
///
/// Implementations fetch a complete [`Snapshot`] for a ticker from some
/// source (an HTTP quote API, a simulator, ...). A provider never returns a
/// partial snapshot and never retries on its own.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches the current snapshot for a single ticker
    ///
    /// # Arguments
    /// * `ticker` - Non-empty ticker symbol
    ///
    /// # Returns
    /// A complete snapshot, or an error if any part of the fetch fails
    async fn fetch_quote(&self, ticker: &str) -> Result<Snapshot, FetchError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock provider for testing
    ///
    /// Tickers without a scripted response fail with `UnsupportedTicker`.
    pub struct MockProvider {
        responses: Arc<Mutex<HashMap<String, Result<Snapshot, FetchError>>>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Default for MockProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self {
                responses: Arc::new(Mutex::new(HashMap::new())),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn set_quote(&self, ticker: &str, snapshot: Snapshot) {
            self.responses
                .lock()
                .unwrap()
                .insert(ticker.to_string(), Ok(snapshot));
        }

        /// Scripts a quote with the given last price and percent change
        pub fn set_change(&self, ticker: &str, last: f64, change_percent: f64) {
            self.set_quote(
                ticker,
                Snapshot {
                    name: format!("{ticker} Inc"),
                    last,
                    change: last * change_percent / 100.0,
                    change_percent,
                    ..Default::default()
                },
            );
        }

        pub fn set_error(&self, ticker: &str, error: FetchError) {
            self.responses
                .lock()
                .unwrap()
                .insert(ticker.to_string(), Err(error));
        }

        /// Tickers fetched so far, in call order
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl QuoteProvider for MockProvider {
        async fn fetch_quote(&self, ticker: &str) -> Result<Snapshot, FetchError> {
            self.calls.lock().unwrap().push(ticker.to_string());
            let responses = self.responses.lock().unwrap();
            match responses.get(ticker) {
                Some(Ok(snapshot)) => Ok(snapshot.clone()),
                // FetchError holds a reqwest::Error and can't derive Clone
                Some(Err(err)) => Err(match err {
                    FetchError::NetworkError(e) => {
                        FetchError::ApiError(format!("Network error (cloned): {}", e))
                    }
                    FetchError::InvalidResponse(s) => FetchError::InvalidResponse(s.clone()),
                    FetchError::InvalidField { field, value } => {
                        FetchError::invalid_field(*field, value.clone())
                    }
                    FetchError::RateLimitExceeded => FetchError::RateLimitExceeded,
                    FetchError::UnsupportedTicker(s) => FetchError::UnsupportedTicker(s.clone()),
                    FetchError::ApiError(s) => FetchError::ApiError(s.clone()),
                    FetchError::Timeout => FetchError::Timeout,
                }),
                None => Err(FetchError::UnsupportedTicker(ticker.to_string())),
            }
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
