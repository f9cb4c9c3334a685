use log::warn;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::currency::format_amount;
use crate::models::portfolio::Portfolio;
use crate::models::snapshot::{PortfolioSnapshot, PositionSnapshot};
use crate::providers::traits::{QuoteProvider, SearchProvider};
use crate::services::currency_service::CurrencyService;

/// The portfolio aggregation engine.
///
/// Takes the flat list of purchase lots, groups it by symbol, fetches
/// one current price per symbol and produces a display-ready
/// [`PortfolioSnapshot`]: per-position and portfolio-wide valuation,
/// profit/loss percentages, and the daily-change figures.
///
/// The snapshot is best-effort: a symbol whose price cannot be fetched
/// is omitted and a warning recorded, rather than failing the pass.
/// Only a currency-conversion failure aborts the whole aggregation,
/// since every monetary output depends on the rate.
pub struct AggregationService {
    quotes: Arc<dyn QuoteProvider>,
    search: Arc<dyn SearchProvider>,
}

impl AggregationService {
    pub fn new(quotes: Arc<dyn QuoteProvider>, search: Arc<dyn SearchProvider>) -> Self {
        Self { quotes, search }
    }

    /// Run one full aggregation pass over the portfolio.
    ///
    /// Per symbol:
    /// 1. Resolve the display name (falls back to the symbol itself).
    /// 2. Fetch the current price once, reused for every lot.
    /// 3. Per lot: `cost_basis = purchase_price*units - fees`,
    ///    `current_value = current_price*units`.
    /// 4. Sum lots into position totals; profit/loss percent over the
    ///    position's cost basis (0 when the basis is 0).
    ///
    /// Portfolio totals are sums of the per-symbol totals; the overall
    /// profit/loss percent divides by the reconstructed total cost
    /// basis (`total_value - total_profit_loss`). Monetary outputs are
    /// converted to the display currency; percentages are computed on
    /// the USD amounts and are unchanged by the linear conversion.
    pub async fn aggregate(
        &self,
        portfolio: &Portfolio,
        currency_service: &mut CurrencyService,
    ) -> Result<PortfolioSnapshot, CoreError> {
        let currency = portfolio.settings.display_currency.clone();

        let mut positions: Vec<PositionSnapshot> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        // Running portfolio totals, in USD.
        let mut total_value = 0.0;
        let mut total_profit_loss = 0.0;

        for (symbol, lots) in portfolio.grouped_by_symbol() {
            let display_name = self.resolve_display_name(&symbol).await;

            // One price fetch per symbol, shared by all of its lots.
            let current_price = match self.quotes.current_price(&symbol).await {
                Ok(price) => price,
                Err(e) => {
                    warn!("skipping {symbol}: price fetch failed: {e}");
                    warnings.push(format!("Error fetching data for {symbol}: {e}"));
                    continue;
                }
            };

            let mut symbol_units = 0.0;
            let mut symbol_value = 0.0;
            let mut symbol_cost_basis = 0.0;
            let mut symbol_profit_loss = 0.0;

            for lot in &lots {
                let cost_basis = lot.cost_basis();
                let current_value = current_price * lot.units;

                symbol_profit_loss += current_value - cost_basis;
                symbol_value += current_value;
                symbol_cost_basis += cost_basis;
                symbol_units += lot.units;
            }

            let profit_loss_percent = if symbol_cost_basis != 0.0 {
                symbol_profit_loss / symbol_cost_basis * 100.0
            } else {
                0.0
            };

            // Category and purchase date come from the first lot added
            // for this symbol; grouping preserves insertion order.
            let representative = lots[0];

            let position_value = currency_service.convert(symbol_value, &currency).await?;

            positions.push(PositionSnapshot {
                display_name,
                symbol,
                total_units: symbol_units,
                total_value: position_value,
                total_value_display: format_amount(position_value, &currency),
                profit_loss_percent,
                category: representative.category.clone(),
                purchase_date: representative.purchase_date,
            });

            total_value += symbol_value;
            total_profit_loss += symbol_profit_loss;
        }

        // `total_value - total_profit_loss` reconstructs the total cost
        // basis of the included positions.
        let total_cost_basis = total_value - total_profit_loss;
        let total_profit_loss_percent = if total_cost_basis != 0.0 {
            total_profit_loss / total_cost_basis * 100.0
        } else {
            0.0
        };

        // The portfolio-wide change equals the aggregate profit/loss
        // percent over all included positions.
        let total_portfolio_change_percent = total_profit_loss_percent;

        let (daily_change, daily_change_percent) =
            self.daily_change(&positions, &mut warnings).await;

        Ok(PortfolioSnapshot {
            total_value: currency_service.convert(total_value, &currency).await?,
            total_profit_loss: currency_service
                .convert(total_profit_loss, &currency)
                .await?,
            total_profit_loss_percent,
            total_portfolio_change_percent,
            daily_change,
            daily_change_percent,
            positions,
            warnings,
            currency,
        })
    }

    /// Sum each position's `close - open` and `(close - open)/open`
    /// over its latest daily quote.
    ///
    /// Both figures are plain additive sums across positions, not
    /// weighted by position size. A failed quote fetch drops only that
    /// position from the sums; its valuation stays in the snapshot.
    async fn daily_change(
        &self,
        positions: &[PositionSnapshot],
        warnings: &mut Vec<String>,
    ) -> (f64, f64) {
        let mut change = 0.0;
        let mut change_percent = 0.0;

        for position in positions {
            match self.quotes.daily_open_close(&position.symbol).await {
                Ok(quote) => {
                    change += quote.change();
                    change_percent += quote.change_percent();
                }
                Err(e) => {
                    warn!(
                        "daily change for {} unavailable: {e}",
                        position.symbol
                    );
                    warnings.push(format!(
                        "Daily change unavailable for {}: {e}",
                        position.symbol
                    ));
                }
            }
        }

        (change, change_percent)
    }

    /// Resolve a company name for `symbol` via the search feed.
    ///
    /// Takes the first match's name; falls back to the symbol itself on
    /// no match or lookup failure. Never fails the aggregation pass.
    async fn resolve_display_name(&self, symbol: &str) -> String {
        match self.search.search(symbol).await {
            Ok(matches) => matches
                .into_iter()
                .next()
                .map(|m| m.name)
                .unwrap_or_else(|| symbol.to_string()),
            Err(e) => {
                warn!("display-name lookup failed for {symbol}: {e}");
                symbol.to_string()
            }
        }
    }
}
