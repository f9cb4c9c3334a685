use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::models::portfolio::Portfolio;
use crate::models::series::{SeriesPoint, Timeframe};
use crate::providers::traits::QuoteProvider;

/// Upper bound on simultaneous history fetches.
const MAX_CONCURRENT_FETCHES: usize = 8;

/// Reconstructs the portfolio's value over time for charting.
///
/// Each lot contributes `close * units` for every trading day between
/// `max(window start, purchase date)` and now; the per-lot series are
/// fetched concurrently (at most [`MAX_CONCURRENT_FETCHES`] in flight)
/// and merged by date with an outer join. A date missing from one
/// lot's series contributes 0 for that lot — no interpolation, no
/// forward fill.
///
/// A failed fetch excludes only that lot; the rest of the series is
/// still produced. An empty portfolio, or one where no lot has a valid
/// window, yields an empty series rather than an error.
pub struct HistoryService {
    quotes: Arc<dyn QuoteProvider>,
}

impl HistoryService {
    pub fn new(quotes: Arc<dyn QuoteProvider>) -> Self {
        Self { quotes }
    }

    /// Build the portfolio value curve for a lookback window ending now.
    pub async fn build_series(
        &self,
        portfolio: &Portfolio,
        timeframe: Timeframe,
    ) -> Vec<SeriesPoint> {
        let end = Utc::now().date_naive();
        self.build_series_until(portfolio, timeframe, end).await
    }

    /// Build the value curve with an explicit end date (the chart's
    /// "now"). Split out so tests can pin the window.
    pub async fn build_series_until(
        &self,
        portfolio: &Portfolio,
        timeframe: Timeframe,
        end: NaiveDate,
    ) -> Vec<SeriesPoint> {
        let window_start = timeframe.start_date(end);
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));
        let mut fetches = JoinSet::new();

        for (lot_index, holding) in portfolio.holdings.iter().enumerate() {
            // A lot purchased after the chart window ends has nothing
            // to contribute.
            if holding.purchase_date > end {
                debug!(
                    "skipping {} lot {lot_index}: purchased {} after window end {end}",
                    holding.symbol, holding.purchase_date
                );
                continue;
            }

            let start = window_start.max(holding.purchase_date);
            let symbol = holding.symbol.clone();
            let units = holding.units;
            let quotes = Arc::clone(&self.quotes);
            let semaphore = Arc::clone(&semaphore);

            fetches.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (symbol, lot_index, units, Ok(Vec::new())),
                };
                let history = quotes.history(&symbol, start, end).await;
                (symbol, lot_index, units, history)
            });
        }

        // Single-threaded merge once all fetches have settled. The
        // BTreeMap keeps dates ascending for free.
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        while let Some(joined) = fetches.join_next().await {
            match joined {
                Ok((_, _, units, Ok(points))) => {
                    for point in points {
                        *totals.entry(point.date).or_insert(0.0) += point.price * units;
                    }
                }
                Ok((symbol, lot_index, _, Err(e))) => {
                    warn!("excluding {symbol} lot {lot_index} from series: {e}");
                }
                Err(e) => {
                    warn!("history fetch task failed: {e}");
                }
            }
        }

        totals
            .into_iter()
            .map(|(date, value)| SeriesPoint { date, value })
            .collect()
    }
}
