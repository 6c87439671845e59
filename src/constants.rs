//! Constants for the quote board
//!
//! All configuration for the board is centralized here. No runtime
//! configuration file is used - the instrument lists, the refresh interval
//! and the color rule are compile-time constants. The only knobs read at
//! startup are the environment variables named below.

use crate::types::Attribute;

/// How often to refresh every instrument (in seconds)
pub const REFRESH_INTERVAL_SECS: u64 = 5;

/// HTTP request timeout when fetching a quote (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Exchange indices shown on the summary line, as (label, ticker), in display order
pub const EXCHANGES: &[(&str, &str)] = &[("Dow", ".DJI"), ("S&P500", ".INX"), ("NASDAQ", ".IXIC")];

/// Tickers shown as ranked table rows
pub const TRACKED_TICKERS: &[&str] = &["EA", "GOOGL", "TSLA", "AMZN", "SPY", "IBM"];

/// Attribute read to pick a row's color
pub const COLOR_ATTRIBUTE: Attribute = Attribute::ChangePercent;

/// Rows move past this absolute value of the color attribute before they are tinted
pub const COLOR_THRESHOLD: f64 = 0.5;

/// Volume columns are shown divided by this
pub const VOLUME_DIVISOR: f64 = 100_000.0;

/// Sort keys reachable with the toggle key, in cycle order. The first one is the default.
pub const SORT_KEYS: &[Attribute] = &[Attribute::ChangePercent, Attribute::Ticker, Attribute::Volume];

/// Quote API base URL
pub const GOOGLE_FINANCE_API_URL: &str = "https://finance.google.com/finance";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "quote-board/0.1.0";

/// Environment variable selecting the quote provider ("google" or "demo")
pub const PROVIDER_ENV: &str = "QUOTE_BOARD_PROVIDER";

/// Environment variable naming the log file
pub const LOG_FILE_ENV: &str = "QUOTE_BOARD_LOG";

/// Log file used when `QUOTE_BOARD_LOG` is not set
pub const DEFAULT_LOG_FILE: &str = "quote-board.log";

/// Number of fetch latency samples kept for percentile reporting
pub const METRICS_WINDOW: usize = 100;

/// Per-fetch volatility of the offline demo provider
pub const DEMO_VOLATILITY: f64 = 0.004;
