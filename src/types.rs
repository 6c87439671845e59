//! Types for the quote board

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two fixed instrument groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Exchange indices shown on the summary line
    Exchanges,
    /// Tickers shown as ranked table rows
    Tracked,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Exchanges => write!(f, "exchanges"),
            Group::Tracked => write!(f, "tracked"),
        }
    }
}

/// Attribute kinds an instrument can be queried for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Ticker symbol, served by the instrument itself
    Ticker,
    /// Company or index name
    Name,
    /// Listing exchange
    Exchange,
    /// Last traded price
    Last,
    /// Absolute change since previous close
    Change,
    /// Percent change since previous close
    ChangePercent,
    /// Session open
    Open,
    /// Session high
    High,
    /// Session low
    Low,
    /// 52 week high
    High52,
    /// 52 week low
    Low52,
    /// Earnings per share
    Eps,
    /// Price / earnings ratio
    Pe,
    /// Last dividend
    Dividend,
    /// Dividend yield
    Yield,
    /// Shares outstanding
    Shares,
    /// Session volume
    Volume,
    /// Average volume
    AvgVolume,
}

impl Attribute {
    /// Short label used in logs and the UI
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Ticker => "ticker",
            Attribute::Name => "name",
            Attribute::Exchange => "exchange",
            Attribute::Last => "last",
            Attribute::Change => "change",
            Attribute::ChangePercent => "percent",
            Attribute::Open => "open",
            Attribute::High => "high",
            Attribute::Low => "low",
            Attribute::High52 => "52w high",
            Attribute::Low52 => "52w low",
            Attribute::Eps => "eps",
            Attribute::Pe => "pe",
            Attribute::Dividend => "dividend",
            Attribute::Yield => "yield",
            Attribute::Shares => "shares",
            Attribute::Volume => "volume",
            Attribute::AvgVolume => "avg volume",
        }
    }

    /// True for attributes holding text rather than a number
    pub fn is_text(&self) -> bool {
        matches!(self, Attribute::Ticker | Attribute::Name | Attribute::Exchange)
    }

    /// Reads this attribute from an instrument
    pub fn value<'a>(&self, instrument: &'a Instrument) -> AttributeValue<'a> {
        let s = &instrument.snapshot;
        match self {
            Attribute::Ticker => AttributeValue::Text(&instrument.ticker),
            Attribute::Name => AttributeValue::Text(&s.name),
            Attribute::Exchange => AttributeValue::Text(&s.exchange),
            Attribute::Last => AttributeValue::Number(s.last),
            Attribute::Change => AttributeValue::Number(s.change),
            Attribute::ChangePercent => AttributeValue::Number(s.change_percent),
            Attribute::Open => AttributeValue::Number(s.open),
            Attribute::High => AttributeValue::Number(s.high),
            Attribute::Low => AttributeValue::Number(s.low),
            Attribute::High52 => AttributeValue::Number(s.high_52),
            Attribute::Low52 => AttributeValue::Number(s.low_52),
            Attribute::Eps => AttributeValue::Number(s.eps),
            Attribute::Pe => AttributeValue::Number(s.pe),
            Attribute::Dividend => AttributeValue::Number(s.dividend),
            Attribute::Yield => AttributeValue::Number(s.dividend_yield),
            Attribute::Shares => AttributeValue::Number(s.shares),
            Attribute::Volume => AttributeValue::Number(s.volume),
            Attribute::AvgVolume => AttributeValue::Number(s.avg_volume),
        }
    }
}

/// Value of a single attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl AttributeValue<'_> {
    /// Numeric view of the value; text reads as 0.0
    pub fn as_number(&self) -> f64 {
        match self {
            AttributeValue::Number(n) => *n,
            AttributeValue::Text(_) => 0.0,
        }
    }
}

/// A complete set of attribute values for one instrument at one point in time
///
/// Providers only ever hand out complete snapshots. `Default` is the
/// "no data" fallback: blank text and zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub exchange: String,
    pub last: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub high_52: f64,
    pub low_52: f64,
    pub eps: f64,
    pub pe: f64,
    pub dividend: f64,
    pub dividend_yield: f64,
    pub shares: f64,
    pub volume: f64,
    pub avg_volume: f64,
}

/// A tracked ticker or exchange index with its latest fetched attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Ticker symbol sent to the quote provider
    pub ticker: String,

    /// Display label
    pub label: String,

    /// Latest snapshot, or the fallback snapshot until the first successful fetch
    snapshot: Snapshot,

    /// False until the first successful fetch
    valid: bool,

    /// Time of the last successful fetch
    last_updated: Option<DateTime<Utc>>,
}

impl Instrument {
    /// Creates an instrument with no data, labelled with its ticker
    pub fn new(ticker: impl Into<String>) -> Self {
        let ticker = ticker.into();
        Self::with_label(ticker.clone(), ticker)
    }

    /// Creates an instrument with no data and a display label
    pub fn with_label(label: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            label: label.into(),
            snapshot: Snapshot::default(),
            valid: false,
            last_updated: None,
        }
    }

    /// Replaces every attribute with the snapshot and marks the instrument valid
    pub fn apply(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.valid = true;
        self.last_updated = Some(Utc::now());
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Reads a numeric attribute
    pub fn number(&self, attribute: Attribute) -> f64 {
        attribute.value(self).as_number()
    }
}
