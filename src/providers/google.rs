//! Google Finance quote provider implementation

use crate::{
    constants::{GOOGLE_FINANCE_API_URL, REQUEST_TIMEOUT_SECS, USER_AGENT},
    error::FetchError,
    provider::QuoteProvider,
    types::Snapshot,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Google Finance quote object. Every value arrives as a string.
#[derive(Debug, Deserialize)]
struct GoogleQuote {
    name: String,
    exchange: String,
    l: String,
    c: String,
    cp: String,
    op: String,
    hi: String,
    lo: String,
    hi52: String,
    lo52: String,
    eps: String,
    pe: String,
    ldiv: String,
    dy: String,
    shares: String,
    vo: String,
    avvo: String,
}

impl GoogleQuote {
    fn into_snapshot(self) -> Result<Snapshot, FetchError> {
        Ok(Snapshot {
            last: parse_number("l", &self.l)?,
            change: parse_number("c", &self.c)?,
            change_percent: parse_number("cp", &self.cp)?,
            open: parse_number("op", &self.op)?,
            high: parse_number("hi", &self.hi)?,
            low: parse_number("lo", &self.lo)?,
            high_52: parse_number("hi52", &self.hi52)?,
            low_52: parse_number("lo52", &self.lo52)?,
            eps: parse_number("eps", &self.eps)?,
            pe: parse_number("pe", &self.pe)?,
            dividend: parse_number("ldiv", &self.ldiv)?,
            dividend_yield: parse_number("dy", &self.dy)?,
            shares: parse_number("shares", &self.shares)?,
            volume: parse_number("vo", &self.vo)?,
            avg_volume: parse_number("avvo", &self.avvo)?,
            name: self.name,
            exchange: self.exchange,
        })
    }
}

/// Parses a quote number such as `"1,021.50"`, `"+0.75"`, `"-1.2%"` or `"3.4M"`
///
/// Empty values and `-` mean "not applicable" and read as 0.0.
fn parse_number(field: &'static str, raw: &str) -> Result<f64, FetchError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim_start_matches('+').trim_end_matches('%');
    if cleaned.is_empty() || cleaned == "-" {
        return Ok(0.0);
    }

    let (digits, scale) = match cleaned.chars().last() {
        Some('K') | Some('k') => (&cleaned[..cleaned.len() - 1], 1e3),
        Some('M') | Some('m') => (&cleaned[..cleaned.len() - 1], 1e6),
        Some('B') | Some('b') => (&cleaned[..cleaned.len() - 1], 1e9),
        _ => (cleaned, 1.0),
    };

    let value = digits
        .parse::<f64>()
        .map(|v| v * scale)
        .map_err(|_| FetchError::invalid_field(field, raw))?;
    if !value.is_finite() {
        return Err(FetchError::invalid_field(field, raw));
    }
    Ok(value)
}

/// Cuts the quote object out of the `// [ {...} ]` wrapper the API sends
fn extract_object(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (start < end).then(|| &body[start..=end])
}

/// Google Finance quote provider
pub struct GoogleFinanceProvider {
    client: Client,
    base_url: String,
}

impl GoogleFinanceProvider {
    /// Creates a new provider against the public API
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(GOOGLE_FINANCE_API_URL)
    }

    /// Creates a provider against another endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::NetworkError)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn parse_body(body: &str) -> Result<Snapshot, FetchError> {
        let object = extract_object(body).ok_or_else(|| {
            FetchError::InvalidResponse(format!("No quote object in response: {}", body))
        })?;
        let quote: GoogleQuote = serde_json::from_str(object).map_err(|e| {
            FetchError::InvalidResponse(format!(
                "Failed to parse quote: {}. Response: {}",
                e, object
            ))
        })?;
        quote.into_snapshot()
    }
}

fn network_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::NetworkError(e)
    }
}

#[async_trait]
impl QuoteProvider for GoogleFinanceProvider {
    async fn fetch_quote(&self, ticker: &str) -> Result<Snapshot, FetchError> {
        if ticker.is_empty() {
            return Err(FetchError::UnsupportedTicker(ticker.to_string()));
        }

        tracing::debug!(ticker, url = %self.base_url, "Fetching quote");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", ticker), ("output", "json")])
            .send()
            .await
            .map_err(network_error)?;

        // Check for rate limiting
        if response.status().as_u16() == 429 {
            return Err(FetchError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(FetchError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body = response.text().await.map_err(network_error)?;
        let snapshot = Self::parse_body(&body)?;

        tracing::debug!(ticker, last = snapshot.last, "Fetched quote");
        Ok(snapshot)
    }

    fn provider_name(&self) -> &'static str {
        "google"
    }
}
