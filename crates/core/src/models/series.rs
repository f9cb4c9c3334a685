use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of the reconstructed portfolio value curve.
/// `value` is the summed `close * units` contribution of every holding
/// with data on that date, in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Lookback window for the portfolio value chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    /// 7 days
    Week,
    /// 30 days
    Month,
    /// 90 days
    ThreeMonths,
    /// 180 days
    SixMonths,
    /// 365 days
    Year,
    /// 730 days
    TwoYears,
    /// 1825 days
    FiveYears,
    /// Everything since 2000-01-01
    Max,
}

impl Timeframe {
    /// All timeframes in display order (for selector widgets).
    pub const ALL: [Timeframe; 8] = [
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::ThreeMonths,
        Timeframe::SixMonths,
        Timeframe::Year,
        Timeframe::TwoYears,
        Timeframe::FiveYears,
        Timeframe::Max,
    ];

    /// Parse a selector label ("1wk", "1mo", "3mo", "6mo", "1y", "2y",
    /// "5y", "max"). Unrecognized labels fall back to one month.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "1wk" => Timeframe::Week,
            "1mo" => Timeframe::Month,
            "3mo" => Timeframe::ThreeMonths,
            "6mo" => Timeframe::SixMonths,
            "1y" => Timeframe::Year,
            "2y" => Timeframe::TwoYears,
            "5y" => Timeframe::FiveYears,
            "max" => Timeframe::Max,
            _ => Timeframe::Month,
        }
    }

    /// The selector label for this timeframe.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Week => "1wk",
            Timeframe::Month => "1mo",
            Timeframe::ThreeMonths => "3mo",
            Timeframe::SixMonths => "6mo",
            Timeframe::Year => "1y",
            Timeframe::TwoYears => "2y",
            Timeframe::FiveYears => "5y",
            Timeframe::Max => "max",
        }
    }

    /// The window start for a chart ending on `end`.
    #[must_use]
    pub fn start_date(&self, end: NaiveDate) -> NaiveDate {
        let days = match self {
            Timeframe::Week => 7,
            Timeframe::Month => 30,
            Timeframe::ThreeMonths => 90,
            Timeframe::SixMonths => 180,
            Timeframe::Year => 365,
            Timeframe::TwoYears => 730,
            Timeframe::FiveYears => 1825,
            Timeframe::Max => {
                // Epoch of the chart: far enough back to cover any holding.
                return NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(end);
            }
        };
        end - chrono::Duration::days(days)
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
