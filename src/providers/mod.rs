//! Quote provider implementations

pub mod demo;
pub mod google;

pub use demo::DemoProvider;
pub use google::GoogleFinanceProvider;

use crate::{
    constants::{DEMO_VOLATILITY, PROVIDER_ENV},
    provider::QuoteProvider,
};
use std::sync::Arc;

/// Builds the provider named by the `QUOTE_BOARD_PROVIDER` environment
/// variable ("google" or "demo"). Defaults to google.
pub fn from_env() -> anyhow::Result<Arc<dyn QuoteProvider>> {
    let provider_name = std::env::var(PROVIDER_ENV).unwrap_or_else(|_| "google".to_string());
    from_name(&provider_name)
}

/// Builds a provider by name; unknown names fall back to google
///
/// If the HTTP client cannot be built the board runs on demo quotes, so
/// this only fails when no provider can be built at all.
pub fn from_name(name: &str) -> anyhow::Result<Arc<dyn QuoteProvider>> {
    let provider: Arc<dyn QuoteProvider> = match name.to_lowercase().as_str() {
        "demo" => Arc::new(DemoProvider::new(DEMO_VOLATILITY)?),
        "google" => google_or_demo()?,
        other => {
            tracing::warn!(provider = other, "Unknown provider, using google");
            google_or_demo()?
        }
    };
    tracing::info!(provider = provider.provider_name(), "Quote provider selected");
    Ok(provider)
}

fn google_or_demo() -> anyhow::Result<Arc<dyn QuoteProvider>> {
    match GoogleFinanceProvider::new() {
        Ok(provider) => Ok(Arc::new(provider)),
        Err(e) => {
            tracing::warn!(error = %e, "Google provider unavailable, using demo quotes");
            Ok(Arc::new(DemoProvider::new(DEMO_VOLATILITY)?))
        }
    }
}
