//! Display ordering for the tracked instruments

use crate::{
    constants::SORT_KEYS,
    types::{Attribute, AttributeValue, Instrument},
};
use std::cmp::Ordering;

/// Orders tracked instruments by a sort key that cycles through a fixed list
#[derive(Debug, Clone)]
pub struct DisplayRanker {
    keys: Vec<Attribute>,
    current: usize,
}

impl DisplayRanker {
    /// Creates a ranker cycling through `keys`, starting at the first one
    ///
    /// An empty list falls back to sorting by percent change.
    pub fn new(keys: &[Attribute]) -> Self {
        let keys = if keys.is_empty() {
            vec![Attribute::ChangePercent]
        } else {
            keys.to_vec()
        };
        Self { keys, current: 0 }
    }

    /// Current sort key
    pub fn key(&self) -> Attribute {
        self.keys[self.current]
    }

    /// Advances to the next sort key, wrapping, and returns it
    pub fn toggle(&mut self) -> Attribute {
        self.current = (self.current + 1) % self.keys.len();
        self.key()
    }

    /// Stable sort by the current key
    ///
    /// Numeric keys sort descending, text keys ascending. Ties keep the
    /// relative order of the input.
    pub fn rank(&self, mut instruments: Vec<Instrument>) -> Vec<Instrument> {
        let key = self.key();
        instruments.sort_by(|a, b| compare(key, a, b));
        instruments
    }
}

impl Default for DisplayRanker {
    fn default() -> Self {
        Self::new(SORT_KEYS)
    }
}

fn compare(key: Attribute, a: &Instrument, b: &Instrument) -> Ordering {
    match (key.value(a), key.value(b)) {
        (AttributeValue::Text(x), AttributeValue::Text(y)) => x.cmp(y),
        // `+ 0.0` folds -0.0 into 0.0 so the two tie
        (x, y) => (y.as_number() + 0.0).total_cmp(&(x.as_number() + 0.0)),
    }
}
