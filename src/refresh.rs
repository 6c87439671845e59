//! Refresh cycle: fetch every instrument, rank, render
//!
//! ```text
//! lock store
//!   ├─ fetch exchanges (in order) ─→ summary line
//!   ├─ fetch tracked (in order)
//!   ├─ rank tracked
//!   └─ present frame
//! unlock store
//! ```
//!
//! Fetches run one at a time while the store lock is held, so cycles never
//! overlap and a frame always shows data from a single cycle.

use crate::{
    display::Display,
    error::{BoardError, StoreError},
    metrics::FetchMetrics,
    provider::QuoteProvider,
    ranker::DisplayRanker,
    render::{exchange_summary, BoardFrame},
    store::{SnapshotStore, StoreGuard},
    types::{Attribute, Group},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument as _;

/// Outcome of one refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Cycle number, starting at 1
    pub cycle: u64,
    /// Number of successful fetches
    pub succeeded: usize,
    /// Tickers whose fetch failed, in fetch order
    pub failed: Vec<String>,
    /// Wall time of the whole cycle
    pub elapsed: Duration,
}

/// Drives refresh cycles against a store and a provider
pub struct Refresher {
    store: Arc<SnapshotStore>,
    provider: Arc<dyn QuoteProvider>,
    ranker: DisplayRanker,
    metrics: FetchMetrics,
    cycles: u64,
}

impl Refresher {
    /// Creates a refresher with the default sort key list
    pub fn new(store: Arc<SnapshotStore>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_ranker(store, provider, DisplayRanker::default())
    }

    pub fn with_ranker(
        store: Arc<SnapshotStore>,
        provider: Arc<dyn QuoteProvider>,
        ranker: DisplayRanker,
    ) -> Self {
        Self {
            store,
            provider,
            ranker,
            metrics: FetchMetrics::new(),
            cycles: 0,
        }
    }

    /// Advances the sort key; the new order shows up on the next cycle
    pub fn toggle_sort(&mut self) -> Attribute {
        let key = self.ranker.toggle();
        tracing::info!(sort_key = key.label(), "Sort key changed");
        key
    }

    pub fn sort_key(&self) -> Attribute {
        self.ranker.key()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn metrics(&self) -> &FetchMetrics {
        &self.metrics
    }

    /// Runs one full cycle and presents the result
    ///
    /// Fetch failures are logged and leave the previous data in place. Only
    /// a broken store invariant or a dead display ends the cycle with an
    /// error.
    pub async fn refresh<D: Display + ?Sized>(
        &mut self,
        display: &mut D,
    ) -> Result<CycleReport, BoardError> {
        self.cycles += 1;
        let span = tracing::info_span!("refresh", cycle = self.cycles);
        self.run_cycle(display).instrument(span).await
    }

    async fn run_cycle<D: Display + ?Sized>(
        &mut self,
        display: &mut D,
    ) -> Result<CycleReport, BoardError> {
        let start = Instant::now();
        let mut report = CycleReport {
            cycle: self.cycles,
            succeeded: 0,
            failed: Vec::new(),
            elapsed: Duration::ZERO,
        };

        let store = Arc::clone(&self.store);
        let mut guard = store.lock().await;

        self.fetch_group(&mut guard, Group::Exchanges, &mut report)
            .await?;
        let summary = exchange_summary(&guard.snapshot_all(Group::Exchanges));

        self.fetch_group(&mut guard, Group::Tracked, &mut report)
            .await?;
        let ranked = self.ranker.rank(guard.snapshot_all(Group::Tracked));

        display.present(&BoardFrame::build(summary, &ranked))?;
        drop(guard);

        report.elapsed = start.elapsed();
        let summary = self.metrics.summary();
        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            sort_key = self.ranker.key().label(),
            "Refresh complete"
        );
        tracing::debug!(
            provider = self.provider.provider_name(),
            latency_p50_ms = summary.latency_p50_ms,
            latency_p99_ms = summary.latency_p99_ms,
            success_rate = summary.success_rate,
            "Fetch metrics"
        );

        Ok(report)
    }

    /// Fetches every instrument of a group in insertion order
    async fn fetch_group(
        &mut self,
        guard: &mut StoreGuard<'_>,
        group: Group,
        report: &mut CycleReport,
    ) -> Result<(), StoreError> {
        for ticker in guard.tickers(group) {
            let start = Instant::now();
            match self.provider.fetch_quote(&ticker).await {
                Ok(snapshot) => {
                    self.metrics.record(start.elapsed(), true);
                    guard.update_instrument(group, &ticker, snapshot)?;
                    report.succeeded += 1;
                }
                Err(e) => {
                    self.metrics.record(start.elapsed(), false);
                    tracing::warn!(
                        %group,
                        ticker = %ticker,
                        provider = self.provider.provider_name(),
                        error = %e,
                        "Failed to fetch quote"
                    );
                    guard.update_instrument_failed(group, &ticker)?;
                    report.failed.push(ticker);
                }
            }
        }
        Ok(())
    }
}
