//! # Quote Board
//!
//! A live terminal board for a fixed set of stocks and exchange indices.
//!
//! Every few seconds the board polls a quote provider for each instrument,
//! one ticker at a time, then redraws a color-coded table:
//!
//! ```text
//! Dow(24000.00 120.50 0.50%)  S&P500(2600.10 -3.20 -0.12%)  NASDAQ(...)
//! Name        Last  Change Percent    Open  52w Hi  52w Lo     EPS      PE  Volume VolumeA
//! GOOGL    1021.50   10.25   1.01% 1012.00 1100.00  800.00   32.50   31.43   12.50   20.00
//! ...
//! ```
//!
//! Rows above +0.5% are green, rows below -0.5% red, the rest yellow.
//!
//! ## Keys
//!
//! - `q`, `Esc`, `Ctrl+C`: quit
//! - `s`, `Ctrl+R`: cycle the sort key (percent change, ticker, volume)
//! - `r`: refresh now
//!
//! ## Configuration
//!
//! Instruments, refresh interval and color rule are compile-time constants in
//! [`constants`]. At startup the board reads:
//!
//! - `QUOTE_BOARD_PROVIDER`: `google` (default) or `demo` for offline quotes
//! - `QUOTE_BOARD_LOG`: log file path (default `quote-board.log`)
//! - `RUST_LOG`: log filter
//!
//! ## Architecture
//!
//! ```text
//! app::run (timer + keyboard)
//!     ↓
//! Refresher::refresh ── QuoteProvider (google / demo)
//!     ↓
//! SnapshotStore (locked for the whole cycle)
//!     ↓
//! DisplayRanker → render::BoardFrame → Display (ratatui)
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use quote_board::{providers::DemoProvider, store::SnapshotStore, Refresher};
//! use quote_board::{display::TerminalDisplay, types::Group};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(SnapshotStore::with_default_instruments());
//! let mut refresher = Refresher::new(store.clone(), Arc::new(DemoProvider::new(0.01)?));
//! let mut display = TerminalDisplay::init()?;
//!
//! let report = refresher.refresh(&mut display).await?;
//! println!("cycle {} failed tickers: {:?}", report.cycle, report.failed);
//!
//! for inst in store.snapshot_all(Group::Tracked).await {
//!     println!("{}: {:.2}", inst.ticker, inst.snapshot().last);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod constants;
pub mod display;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod provider;
pub mod providers;
pub mod ranker;
pub mod refresh;
pub mod render;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{BoardError, FetchError, StoreError};
pub use provider::QuoteProvider;
pub use ranker::DisplayRanker;
pub use refresh::{CycleReport, Refresher};
pub use store::SnapshotStore;
pub use types::{Attribute, Group, Instrument, Snapshot};
