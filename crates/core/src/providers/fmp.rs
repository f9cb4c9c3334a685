use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::MoversProvider;
use crate::errors::CoreError;
use crate::models::news::TrendingStock;

const BASE_URL: &str = "https://financialmodelingprep.com/stable";
const PROVIDER: &str = "Financial Modeling Prep";

/// Financial Modeling Prep market-movers feed.
///
/// - **Free tier**: 250 requests/day.
/// - **Requires**: API key (settings name "fmp").
/// - **Endpoint**: `/biggest-gainers`
pub struct FmpProvider {
    client: Client,
    api_key: Option<String>,
}

impl FmpProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(5));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }
}

// ── FMP API response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct GainerPayload {
    symbol: String,
    name: String,
    price: f64,
    change: f64,
    #[serde(rename = "changesPercentage")]
    changes_percentage: f64,
}

#[async_trait]
impl MoversProvider for FmpProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn biggest_gainers(&self, limit: usize) -> Result<Vec<TrendingStock>, CoreError> {
        let Some(api_key) = &self.api_key else {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: "no Financial Modeling Prep API key configured".to_string(),
            });
        };

        let url = format!("{BASE_URL}/biggest-gainers");
        let resp_text = self
            .client
            .get(&url)
            .query(&[("apikey", api_key)])
            .send()
            .await?
            .text()
            .await?;

        // FMP signals problems (bad key, exhausted quota) as a JSON
        // object with "Error Message" under HTTP 200, not as an error
        // status, so the body shape has to be inspected first.
        let parsed: serde_json::Value =
            serde_json::from_str(&resp_text).map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse biggest-gainers feed: {e}"),
            })?;

        if let Some(message) = parsed.get("Error Message").and_then(|v| v.as_str()) {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: message.to_string(),
            });
        }

        let gainers: Vec<GainerPayload> =
            serde_json::from_value(parsed).map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse biggest-gainers feed: {e}"),
            })?;

        Ok(gainers
            .into_iter()
            .take(limit)
            .map(|g| TrendingStock {
                symbol: g.symbol,
                name: g.name,
                price: g.price,
                change: g.change,
                change_percent: g.changes_percentage,
            })
            .collect())
    }
}
