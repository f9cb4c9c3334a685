use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated view of every lot of one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Company name resolved via symbol search; the symbol itself when
    /// no match was found or the lookup failed
    pub display_name: String,

    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Sum of units across all lots
    pub total_units: f64,

    /// Current value of the position in the display currency
    pub total_value: f64,

    /// `total_value` formatted with the display currency's symbol,
    /// two decimals (e.g., "$2250.00")
    pub total_value_display: String,

    /// Signed percentage: position profit/loss over its cost basis.
    /// 0 when the cost basis is 0.
    pub profit_loss_percent: f64,

    /// Category of the first lot added for this symbol
    pub category: String,

    /// Purchase date of the first lot added for this symbol
    pub purchase_date: NaiveDate,
}

/// Display-ready result of one full aggregation pass.
///
/// Fully recomputed every pass, never patched incrementally. Monetary
/// totals are converted to `currency`; percentages are computed on the
/// USD amounts (a linear conversion leaves them unchanged).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Display currency this snapshot was computed for
    pub currency: String,

    /// Current value of all positions, converted
    pub total_value: f64,

    /// Profit/loss across all positions, converted
    pub total_profit_loss: f64,

    /// `total_profit_loss / total_cost_basis * 100`; 0 when the cost
    /// basis is 0
    pub total_profit_loss_percent: f64,

    /// Portfolio-wide change percentage. Computed with the same
    /// aggregate formula as `total_profit_loss_percent`.
    pub total_portfolio_change_percent: f64,

    /// Sum of `close - open` of each position's latest daily quote, in
    /// the quote feed's native currency (USD)
    pub daily_change: f64,

    /// Sum of each position's `(close - open) / open * 100`.
    /// An unweighted additive sum across positions, not a true
    /// portfolio-level percentage.
    pub daily_change_percent: f64,

    /// One entry per distinct symbol, in first-seen symbol order
    pub positions: Vec<PositionSnapshot>,

    /// Non-fatal per-symbol failures collected during the pass, for the
    /// UI to surface as notifications
    pub warnings: Vec<String>,
}
