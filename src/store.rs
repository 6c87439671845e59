//! In-memory snapshot store for the two instrument groups

use crate::{
    constants::{EXCHANGES, TRACKED_TICKERS},
    error::StoreError,
    types::{Group, Instrument, Snapshot},
};
use tokio::sync::{Mutex, MutexGuard};

/// Both instrument groups, in insertion order
#[derive(Debug)]
struct Groups {
    exchanges: Vec<Instrument>,
    tracked: Vec<Instrument>,
}

impl Groups {
    fn group(&self, group: Group) -> &[Instrument] {
        match group {
            Group::Exchanges => &self.exchanges,
            Group::Tracked => &self.tracked,
        }
    }

    fn find_mut(&mut self, group: Group, ticker: &str) -> Result<&mut Instrument, StoreError> {
        let instruments = match group {
            Group::Exchanges => &mut self.exchanges,
            Group::Tracked => &mut self.tracked,
        };
        instruments
            .iter_mut()
            .find(|i| i.ticker == ticker)
            .ok_or_else(|| StoreError::unknown_ticker(group, ticker))
    }
}

/// Shared store for instrument snapshots
///
/// Every access goes through a single exclusive lock. A refresh cycle holds
/// the lock from its first fetch to the end of its render, so a frame never
/// mixes data from two cycles.
#[derive(Debug)]
pub struct SnapshotStore {
    groups: Mutex<Groups>,
}

impl SnapshotStore {
    /// Creates a store with fixed group membership
    pub fn new(exchanges: Vec<Instrument>, tracked: Vec<Instrument>) -> Self {
        Self {
            groups: Mutex::new(Groups { exchanges, tracked }),
        }
    }

    /// Creates a store holding the configured exchanges and tracked tickers
    pub fn with_default_instruments() -> Self {
        let exchanges = EXCHANGES
            .iter()
            .map(|(label, ticker)| Instrument::with_label(*label, *ticker))
            .collect();
        let tracked = TRACKED_TICKERS.iter().map(|t| Instrument::new(*t)).collect();
        Self::new(exchanges, tracked)
    }

    /// Acquires the exclusive section
    pub async fn lock(&self) -> StoreGuard<'_> {
        StoreGuard {
            groups: self.groups.lock().await,
        }
    }

    /// Copies a whole group under a short-lived lock
    pub async fn snapshot_all(&self, group: Group) -> Vec<Instrument> {
        self.lock().await.snapshot_all(group)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::with_default_instruments()
    }
}

/// Exclusive access to the store, released on drop
pub struct StoreGuard<'a> {
    groups: MutexGuard<'a, Groups>,
}

impl StoreGuard<'_> {
    /// Replaces the instrument's attributes with the snapshot and marks it valid
    ///
    /// # Arguments
    /// * `group` - Group the ticker belongs to
    /// * `ticker` - The instrument to update
    /// * `snapshot` - Complete snapshot from the provider
    pub fn update_instrument(
        &mut self,
        group: Group,
        ticker: &str,
        snapshot: Snapshot,
    ) -> Result<(), StoreError> {
        let instrument = self.groups.find_mut(group, ticker)?;
        instrument.apply(snapshot);
        tracing::debug!(
            %group,
            ticker,
            last = instrument.snapshot().last,
            "Updated instrument"
        );
        Ok(())
    }

    /// Records a failed fetch
    ///
    /// Attributes and validity are left as they are, so the instrument keeps
    /// showing its last known values, or the fallback if it never had any.
    pub fn update_instrument_failed(&mut self, group: Group, ticker: &str) -> Result<(), StoreError> {
        let instrument = self.groups.find_mut(group, ticker)?;
        tracing::debug!(%group, ticker, valid = instrument.is_valid(), "Keeping previous data");
        Ok(())
    }

    /// Returns a copy of the group in insertion order
    pub fn snapshot_all(&self, group: Group) -> Vec<Instrument> {
        self.groups.group(group).to_vec()
    }

    /// Tickers of the group in insertion order
    pub fn tickers(&self, group: Group) -> Vec<String> {
        self.groups
            .group(group)
            .iter()
            .map(|i| i.ticker.clone())
            .collect()
    }
}
