use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::settings::Settings;

use super::finnhub::FinnhubProvider;
use super::fmp::FmpProvider;
use super::fxrates::FxRatesProvider;
use super::newsapi::NewsApiProvider;
use super::traits::{
    MoversProvider, NewsProvider, QuoteProvider, RateProvider, SearchProvider,
};
use super::yahoo_finance::YahooFinanceProvider;

/// The full set of provider adapters the facade runs against, one
/// handle per external concern.
///
/// Services hold their own clones of the handles they need; cloning the
/// set is cheap (reference-count bumps only).
#[derive(Clone)]
pub struct ProviderSet {
    pub quotes: Arc<dyn QuoteProvider>,
    pub rates: Arc<dyn RateProvider>,
    pub search: Arc<dyn SearchProvider>,
    pub news: Arc<dyn NewsProvider>,
    pub movers: Arc<dyn MoversProvider>,
}

impl ProviderSet {
    /// Wire up the real adapters, pulling API keys from settings.
    ///
    /// Yahoo Finance (quotes) and fxratesapi (rates) work without keys.
    /// Finnhub (search), NewsAPI (news) and Financial Modeling Prep
    /// (movers) are still constructed when their key is missing; their
    /// calls then fail with a descriptive error until one is configured.
    pub fn new_with_defaults(settings: &Settings) -> Result<Self, CoreError> {
        let key = |name: &str| settings.api_key(name).map(str::to_string);

        Ok(Self {
            quotes: Arc::new(YahooFinanceProvider::new()?),
            rates: Arc::new(FxRatesProvider::new(key("fxratesapi"))),
            search: Arc::new(FinnhubProvider::new(key("finnhub"))),
            news: Arc::new(NewsApiProvider::new(key("newsapi"))),
            movers: Arc::new(FmpProvider::new(key("fmp"))),
        })
    }
}

impl std::fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSet")
            .field("quotes", &self.quotes.name())
            .field("rates", &self.rates.name())
            .field("search", &self.search.name())
            .field("news", &self.news.name())
            .field("movers", &self.movers.name())
            .finish()
    }
}
