use serde::{Deserialize, Serialize};

/// One article from the trending-news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,

    /// Short teaser text; feeds sometimes omit it
    pub description: Option<String>,

    pub url: String,

    /// Publisher name (e.g., "Reuters")
    pub source: String,

    /// Publication timestamp as reported by the feed (RFC 3339)
    pub published_at: Option<String>,
}

/// One of the day's biggest gainers, for the dashboard's trending list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingStock {
    pub symbol: String,
    pub name: String,

    /// Last traded price in USD
    pub price: f64,

    /// Absolute price change on the day
    pub change: f64,

    /// Percentage price change on the day
    pub change_percent: f64,
}
