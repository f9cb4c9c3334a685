use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::news::{NewsArticle, TrendingStock};
use crate::models::price::{DailyQuote, PricePoint};
use crate::models::search::SymbolMatch;

/// Trait abstraction for the market-data feed (SOLID: Dependency Inversion).
///
/// The aggregation engine and the series builder only ever talk to this
/// trait. If the feed stops working or changes, we replace one
/// implementation and the rest of the codebase is untouched.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Get the current (latest) price of an instrument, in USD.
    async fn current_price(&self, symbol: &str) -> Result<f64, CoreError>;

    /// Get the most recent daily open and close of an instrument.
    async fn daily_open_close(&self, symbol: &str) -> Result<DailyQuote, CoreError>;

    /// Get daily close prices over a date range (inclusive on both
    /// ends). Returns points sorted ascending by date; may be empty
    /// when the feed has no data in range.
    async fn history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError>;
}

/// Exchange-rate feed: units of `target` per one unit of `base`.
#[async_trait]
pub trait RateProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn rate(&self, base: &str, target: &str) -> Result<f64, CoreError>;
}

/// Symbol/company search feed, backing autocomplete and display-name
/// resolution.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, CoreError>;
}

/// Trending-news feed for the dashboard.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn trending(&self, limit: usize) -> Result<Vec<NewsArticle>, CoreError>;
}

/// Market-movers feed for the dashboard's biggest-gainers list.
#[async_trait]
pub trait MoversProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn biggest_gainers(&self, limit: usize) -> Result<Vec<TrendingStock>, CoreError>;
}
