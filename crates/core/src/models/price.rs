use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single price data point (date → close price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// The most recent daily open and close of an instrument, used for the
/// daily-change figures on the portfolio snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyQuote {
    pub open: f64,
    pub close: f64,
}

impl DailyQuote {
    /// Absolute change since the open: `close - open`.
    #[must_use]
    pub fn change(&self) -> f64 {
        self.close - self.open
    }

    /// Percentage change since the open. Returns 0 when the open is 0,
    /// so a degenerate quote never poisons an additive sum.
    #[must_use]
    pub fn change_percent(&self) -> f64 {
        if self.open == 0.0 {
            0.0
        } else {
            (self.close - self.open) / self.open * 100.0
        }
    }
}
