pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::currency::SUPPORTED_CURRENCIES;
use models::holding::{Holding, HoldingInput};
use models::news::{NewsArticle, TrendingStock};
use models::portfolio::Portfolio;
use models::search::SymbolMatch;
use models::series::{SeriesPoint, Timeframe};
use models::settings::Settings;
use models::snapshot::PortfolioSnapshot;
use providers::registry::ProviderSet;
use services::{
    aggregation_service::AggregationService, currency_service::CurrencyService,
    history_service::HistoryService, search_service::SearchService,
};
use storage::csv::CsvStore;

use errors::CoreError;

/// Main entry point for the Investmate core library.
/// Holds the portfolio state and all services needed to operate on it.
///
/// Construction and API-key changes spawn the background search worker,
/// so both must happen inside a Tokio runtime.
#[must_use]
pub struct Investmate {
    portfolio: Portfolio,
    providers: ProviderSet,
    currency_service: CurrencyService,
    aggregation_service: AggregationService,
    history_service: HistoryService,
    search_service: SearchService,
    /// Result of the last aggregation pass, if one has run.
    snapshot: Option<PortfolioSnapshot>,
    /// True when the embedder injected its own providers; API-key
    /// changes then never swap adapters behind its back.
    custom_providers: bool,
}

impl std::fmt::Debug for Investmate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Settings hold API keys; log key names only.
        let api_keys: Vec<&String> = self.portfolio.settings.api_keys.keys().collect();
        f.debug_struct("Investmate")
            .field("holdings", &self.portfolio.holdings.len())
            .field("display_currency", &self.portfolio.settings.display_currency)
            .field("api_keys", &api_keys)
            .field("has_snapshot", &self.snapshot.is_some())
            .finish()
    }
}

impl Investmate {
    /// Create an empty portfolio wired to the real provider adapters.
    pub fn new() -> Result<Self, CoreError> {
        Self::with_settings(Settings::default())
    }

    /// Like [`Investmate::new`] but with explicit settings (display
    /// currency, API keys).
    pub fn with_settings(settings: Settings) -> Result<Self, CoreError> {
        let providers = ProviderSet::new_with_defaults(&settings)?;
        let portfolio = Portfolio {
            holdings: Vec::new(),
            settings,
        };
        Ok(Self::assemble(portfolio, providers, false))
    }

    /// Build against injected providers (embedders, tests).
    pub fn with_providers(settings: Settings, providers: ProviderSet) -> Self {
        let portfolio = Portfolio {
            holdings: Vec::new(),
            settings,
        };
        Self::assemble(portfolio, providers, true)
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Validate raw holding fields and append the lot to the store.
    /// Returns the holding as stored.
    pub fn add_holding(&mut self, input: &HoldingInput) -> Result<Holding, CoreError> {
        let holding = input.validate()?;
        self.portfolio.append_holding(holding.clone());
        Ok(holding)
    }

    /// All purchase lots, oldest-added first.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.portfolio.holdings
    }

    /// Number of stored lots.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.portfolio.holdings.len()
    }

    // ── Aggregation ─────────────────────────────────────────────────

    /// Run a full aggregation pass and cache the resulting snapshot.
    ///
    /// Best-effort: symbols whose price fetch fails are omitted and
    /// listed in the snapshot's warnings. A currency-conversion failure
    /// aborts the pass and leaves the previous snapshot in place.
    pub async fn refresh(&mut self) -> Result<&PortfolioSnapshot, CoreError> {
        let snapshot = self
            .aggregation_service
            .aggregate(&self.portfolio, &mut self.currency_service)
            .await?;
        Ok(self.snapshot.insert(snapshot))
    }

    /// The result of the last successful aggregation pass, if any.
    #[must_use]
    pub fn latest_snapshot(&self) -> Option<&PortfolioSnapshot> {
        self.snapshot.as_ref()
    }

    // ── Charting ────────────────────────────────────────────────────

    /// Reconstruct the portfolio's value curve over a lookback window
    /// ending today. Per-lot fetch failures degrade the curve rather
    /// than failing it; an empty portfolio yields an empty series.
    pub async fn portfolio_series(&self, timeframe: Timeframe) -> Vec<SeriesPoint> {
        self.history_service
            .build_series(&self.portfolio, timeframe)
            .await
    }

    // ── Symbol Search ───────────────────────────────────────────────

    /// Queue an autocomplete query, superseding any still in flight.
    pub fn submit_search(&mut self, query: impl Into<String>) {
        self.search_service.submit(query);
    }

    /// Result of the most recent query, if it has arrived. Results of
    /// superseded queries are discarded, never returned.
    pub fn poll_search(&mut self) -> Option<Result<Vec<SymbolMatch>, CoreError>> {
        self.search_service.poll()
    }

    // ── Dashboard Feeds ─────────────────────────────────────────────

    /// Trending market news, at most `limit` articles.
    pub async fn trending_news(&self, limit: usize) -> Result<Vec<NewsArticle>, CoreError> {
        self.providers.news.trending(limit).await
    }

    /// The day's biggest gainers, at most `limit` entries.
    pub async fn biggest_gainers(&self, limit: usize) -> Result<Vec<TrendingStock>, CoreError> {
        self.providers.movers.biggest_gainers(limit).await
    }

    // ── Import / Export ─────────────────────────────────────────────

    /// Import holdings from CSV text, replacing the whole store.
    /// All-or-nothing: on any error the store is left untouched.
    /// Returns the number of holdings imported.
    pub fn import_csv(&mut self, data: &str) -> Result<usize, CoreError> {
        let holdings = CsvStore::import_from_string(data)?;
        let count = holdings.len();
        self.portfolio.replace_holdings(holdings);
        Ok(count)
    }

    /// Export all holdings as CSV text.
    pub fn export_csv(&self) -> Result<String, CoreError> {
        CsvStore::export_to_string(&self.portfolio.holdings)
    }

    /// Import holdings from a CSV file on disk, replacing the whole
    /// store. All-or-nothing, like [`Investmate::import_csv`].
    pub fn import_csv_file(&mut self, path: &str) -> Result<usize, CoreError> {
        let holdings = CsvStore::import_from_file(path)?;
        let count = holdings.len();
        self.portfolio.replace_holdings(holdings);
        Ok(count)
    }

    /// Export all holdings to a CSV file on disk.
    pub fn export_csv_file(&self, path: &str) -> Result<(), CoreError> {
        CsvStore::export_to_file(&self.portfolio.holdings, path)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the display currency. Must be one of [`SUPPORTED_CURRENCIES`].
    /// Takes effect on the next aggregation pass.
    pub fn set_display_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let code = currency.trim().to_uppercase();
        if !SUPPORTED_CURRENCIES.contains(&code.as_str()) {
            return Err(CoreError::InvalidInput(format!(
                "Unsupported display currency '{currency}' (supported: {})",
                SUPPORTED_CURRENCIES.join(", ")
            )));
        }
        self.portfolio.settings.display_currency = code;
        Ok(())
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.portfolio.settings
    }

    /// Set an API key for a provider (e.g., "finnhub", "fxratesapi",
    /// "newsapi", "fmp"). Rebuilds the default adapters so the new key
    /// takes effect immediately; injected providers are left alone.
    pub fn set_api_key(&mut self, provider: String, key: String) -> Result<(), CoreError> {
        self.portfolio.settings.api_keys.insert(provider, key);
        self.rebuild_default_providers()
    }

    /// Remove an API key for a provider. Returns whether a key was
    /// present. Rebuilds the default adapters on removal.
    pub fn remove_api_key(&mut self, provider: &str) -> Result<bool, CoreError> {
        let removed = self.portfolio.settings.api_keys.remove(provider).is_some();
        if removed {
            self.rebuild_default_providers()?;
        }
        Ok(removed)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn assemble(portfolio: Portfolio, providers: ProviderSet, custom_providers: bool) -> Self {
        let currency_service = CurrencyService::new(Arc::clone(&providers.rates));
        let aggregation_service =
            AggregationService::new(Arc::clone(&providers.quotes), Arc::clone(&providers.search));
        let history_service = HistoryService::new(Arc::clone(&providers.quotes));
        let search_service = SearchService::new(Arc::clone(&providers.search));

        Self {
            portfolio,
            providers,
            currency_service,
            aggregation_service,
            history_service,
            search_service,
            snapshot: None,
            custom_providers,
        }
    }

    /// Swap in freshly keyed adapters after an API-key change. The old
    /// search worker exits on its own once its channel closes.
    fn rebuild_default_providers(&mut self) -> Result<(), CoreError> {
        if self.custom_providers {
            return Ok(());
        }
        let providers = ProviderSet::new_with_defaults(&self.portfolio.settings)?;
        self.currency_service = CurrencyService::new(Arc::clone(&providers.rates));
        self.aggregation_service =
            AggregationService::new(Arc::clone(&providers.quotes), Arc::clone(&providers.search));
        self.history_service = HistoryService::new(Arc::clone(&providers.quotes));
        self.search_service = SearchService::new(Arc::clone(&providers.search));
        self.providers = providers;
        Ok(())
    }
}
