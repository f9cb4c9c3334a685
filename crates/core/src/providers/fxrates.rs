use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::traits::RateProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://api.fxratesapi.com/latest";
const PROVIDER: &str = "FxRatesApi";

/// fxratesapi.com exchange-rate feed.
///
/// - **Free tier**: works without a key at a low request budget; an API
///   key (settings name "fxratesapi") raises the limits.
/// - **Coverage**: 170+ currencies, minute resolution.
/// - **Endpoint**: `/latest?base=USD&currencies=EUR`
pub struct FxRatesProvider {
    client: Client,
    api_key: Option<String>,
}

impl FxRatesProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(5));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }
}

// ── fxratesapi response types ───────────────────────────────────────

#[derive(Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for FxRatesProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn rate(&self, base: &str, target: &str) -> Result<f64, CoreError> {
        let base = base.to_uppercase();
        let target = target.to_uppercase();

        // Same currency → rate is 1.0
        if base == target {
            return Ok(1.0);
        }

        let mut query: Vec<(&str, String)> = vec![
            ("base", base.clone()),
            ("currencies", target.clone()),
            ("resolution", "1m".to_string()),
            ("format", "json".to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }

        let resp: LatestRatesResponse = self
            .client
            .get(BASE_URL)
            .query(&query)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse rates for {base}/{target}: {e}"),
            })?;

        resp.rates
            .get(&target)
            .copied()
            .ok_or_else(|| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("No rate found for {base} to {target}"),
            })
    }
}
