//! Offline demo provider
//!
//! Produces a log-normal random walk per ticker so the board can run without
//! network access. Each ticker gets its own RNG seeded from its symbol, so a
//! fresh provider replays the same sequence.

use crate::{error::FetchError, provider::QuoteProvider, types::Snapshot};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, NormalError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Walk state for one ticker
#[derive(Debug)]
struct Walk {
    rng: StdRng,
    previous_close: f64,
    snapshot: Snapshot,
}

impl Walk {
    fn new(ticker: &str) -> Self {
        let seed = ticker
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| (h ^ b as u64).wrapping_mul(0x0100_0000_01b3));
        let mut rng = StdRng::seed_from_u64(seed);

        let price = rng.gen_range(20.0..1500.0);
        let eps = rng.gen_range(0.5..40.0);
        let shares = rng.gen_range(100.0..3000.0) * 1e6;
        let avg_volume = rng.gen_range(0.5..20.0) * 1e6;
        let dividend = if rng.gen_bool(0.5) { rng.gen_range(0.1..3.0) } else { 0.0 };

        let snapshot = Snapshot {
            name: format!("{} (demo)", ticker),
            exchange: "DEMO".to_string(),
            last: price,
            open: price,
            high: price,
            low: price,
            high_52: price * 1.25,
            low_52: price * 0.75,
            eps,
            pe: price / eps,
            dividend,
            dividend_yield: dividend * 4.0 / price * 100.0,
            shares,
            avg_volume,
            ..Default::default()
        };

        Self {
            rng,
            previous_close: price,
            snapshot,
        }
    }

    fn step(&mut self, moves: &LogNormal<f64>) -> Snapshot {
        let s = &mut self.snapshot;
        s.last *= moves.sample(&mut self.rng);
        s.change = s.last - self.previous_close;
        s.change_percent = s.change / self.previous_close * 100.0;
        s.high = s.high.max(s.last);
        s.low = s.low.min(s.last);
        s.high_52 = s.high_52.max(s.last);
        s.low_52 = s.low_52.min(s.last);
        s.pe = s.last / s.eps;
        s.volume += s.avg_volume * self.rng.gen_range(0.0..0.01);
        s.clone()
    }
}

/// Random-walk quote provider
pub struct DemoProvider {
    moves: LogNormal<f64>,
    walks: Mutex<HashMap<String, Walk>>,
}

impl DemoProvider {
    /// Creates a demo provider
    ///
    /// # Arguments
    /// * `volatility` - standard deviation of the per-fetch log-normal move,
    ///   finite and not negative
    pub fn new(volatility: f64) -> Result<Self, NormalError> {
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(NormalError::BadVariance);
        }
        Ok(Self {
            moves: LogNormal::new(0.0, volatility)?,
            walks: Mutex::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl QuoteProvider for DemoProvider {
    async fn fetch_quote(&self, ticker: &str) -> Result<Snapshot, FetchError> {
        if ticker.is_empty() {
            return Err(FetchError::UnsupportedTicker(ticker.to_string()));
        }
        let mut walks = self
            .walks
            .lock()
            .map_err(|_| FetchError::ApiError("demo state poisoned".to_string()))?;
        let walk = walks
            .entry(ticker.to_string())
            .or_insert_with(|| Walk::new(ticker));
        Ok(walk.step(&self.moves))
    }

    fn provider_name(&self) -> &'static str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_complete(s: &Snapshot) -> bool {
        !s.name.is_empty()
            && [
                s.last, s.change, s.change_percent, s.open, s.high, s.low, s.high_52, s.low_52,
                s.eps, s.pe, s.dividend, s.dividend_yield, s.shares, s.volume, s.avg_volume,
            ]
            .iter()
            .all(|v| v.is_finite())
    }

    #[tokio::test]
    async fn test_snapshots_are_complete_and_consistent() {
        let provider = DemoProvider::new(0.01).unwrap();
        let mut previous = None;
        for _ in 0..20 {
            let s = provider.fetch_quote("EA").await.unwrap();
            assert!(is_complete(&s));
            assert!(s.last > 0.0);
            assert!(s.low <= s.last && s.last <= s.high);
            assert!((s.change - (s.last - s.open)).abs() < 1e-9);
            if let Some(prev) = previous {
                assert!(s.volume >= prev);
            }
            previous = Some(s.volume);
        }
    }

    #[tokio::test]
    async fn test_same_ticker_replays_same_walk() {
        let a = DemoProvider::new(0.01).unwrap();
        let b = DemoProvider::new(0.01).unwrap();
        assert_eq!(a.fetch_quote("IBM").await.unwrap(), b.fetch_quote("IBM").await.unwrap());
        assert_ne!(a.fetch_quote("IBM").await.unwrap(), a.fetch_quote("TSLA").await.unwrap());
    }

    #[test]
    fn test_rejects_invalid_volatility() {
        assert!(DemoProvider::new(-1.0).is_err());
        assert!(DemoProvider::new(-0.001).is_err());
        assert!(DemoProvider::new(f64::NAN).is_err());
        assert!(DemoProvider::new(f64::INFINITY).is_err());
        assert!(DemoProvider::new(0.0).is_ok());
    }

    #[tokio::test]
    async fn test_empty_ticker_fails() {
        let provider = DemoProvider::new(0.01).unwrap();
        assert!(provider.fetch_quote("").await.is_err());
    }
}
