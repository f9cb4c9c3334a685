use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::SearchProvider;
use crate::errors::CoreError;
use crate::models::search::SymbolMatch;

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER: &str = "Finnhub";

/// Finnhub symbol/company search feed.
///
/// - **Free tier**: 60 requests/minute.
/// - **Requires**: API key (settings name "finnhub"). Without one,
///   every search fails with `SearchUnavailable` and display names fall
///   back to the raw symbol.
/// - **Endpoint**: `/search?q=apple`
pub struct FinnhubProvider {
    client: Client,
    api_key: Option<String>,
}

impl FinnhubProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(5));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }
}

// ── Finnhub API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct SearchResponse {
    count: usize,
    result: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    description: String,
    symbol: String,
}

#[async_trait]
impl SearchProvider for FinnhubProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, CoreError> {
        let Some(api_key) = &self.api_key else {
            return Err(CoreError::SearchUnavailable(
                "no Finnhub API key configured".to_string(),
            ));
        };

        let url = format!("{BASE_URL}/search");
        let resp: SearchResponse = self
            .client
            .get(&url)
            .query(&[("q", query), ("token", api_key)])
            .send()
            .await
            .map_err(|e| {
                // Strip the URL (it carries the token) before surfacing
                CoreError::SearchUnavailable(e.without_url().to_string())
            })?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse search results for '{query}': {e}"),
            })?;

        if resp.count == 0 {
            return Ok(Vec::new());
        }

        Ok(resp
            .result
            .into_iter()
            .map(|r| SymbolMatch::new(r.symbol, r.description))
            .collect())
    }
}
