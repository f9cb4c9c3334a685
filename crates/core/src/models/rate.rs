use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached exchange rate relative to the base currency (USD).
///
/// Rates expire after [`ExchangeRate::MAX_AGE_SECS`]; a stale rate must
/// be re-fetched before it is used for conversion. USD itself is never
/// cached: its rate is implicitly 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Target currency code, uppercased (e.g., "EUR")
    pub currency: String,

    /// Units of `currency` per 1 USD
    pub rate: f64,

    /// When this rate was fetched
    pub fetched_at: DateTime<Utc>,
}

impl ExchangeRate {
    /// Staleness window: a rate older than this many seconds must be
    /// refreshed before use.
    pub const MAX_AGE_SECS: i64 = 600;

    pub fn new(currency: impl Into<String>, rate: f64, fetched_at: DateTime<Utc>) -> Self {
        Self {
            currency: currency.into().to_uppercase(),
            rate,
            fetched_at,
        }
    }

    /// True when the rate is older than the staleness window as of `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        (now - self.fetched_at).num_seconds() > Self::MAX_AGE_SECS
    }
}
