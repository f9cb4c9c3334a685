use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::currency::BASE_CURRENCY;
use crate::models::rate::ExchangeRate;
use crate::providers::traits::RateProvider;

/// Converts USD amounts into the display currency.
///
/// Rates come from a [`RateProvider`] and are cached per currency for
/// [`ExchangeRate::MAX_AGE_SECS`] seconds. A stale rate is refreshed
/// synchronously before the conversion; if the refresh fails, the
/// conversion fails — a stale or missing rate is never silently used.
///
/// USD is the base currency: converting to USD is the identity and
/// touches neither the cache nor the provider.
pub struct CurrencyService {
    provider: Arc<dyn RateProvider>,
    cache: HashMap<String, ExchangeRate>,
}

impl CurrencyService {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self {
            provider,
            cache: HashMap::new(),
        }
    }

    /// Convert `amount` (USD) into `target` currency.
    ///
    /// Identity for USD, for any amount including zero and negative.
    /// For other currencies: `amount * rate`, where the rate is at most
    /// 600 seconds old. Fails with `RateFetchError` when a fresh rate
    /// cannot be obtained.
    pub async fn convert(&mut self, amount: f64, target: &str) -> Result<f64, CoreError> {
        let target = target.trim().to_uppercase();
        if target == BASE_CURRENCY {
            return Ok(amount);
        }

        let rate = self.fresh_rate(&target).await?;
        Ok(amount * rate)
    }

    /// Get a rate for `target` that is within the staleness window,
    /// refreshing it from the provider if needed.
    async fn fresh_rate(&mut self, target: &str) -> Result<f64, CoreError> {
        let now = Utc::now();

        if let Some(cached) = self.cache.get(target) {
            if !cached.is_stale(now) {
                debug!("using cached {target} rate {}", cached.rate);
                return Ok(cached.rate);
            }
            debug!("cached {target} rate is stale, refreshing");
        }

        let rate = self
            .provider
            .rate(BASE_CURRENCY, target)
            .await
            .map_err(|e| match e {
                err @ CoreError::RateFetchError { .. } => err,
                other => CoreError::RateFetchError {
                    currency: target.to_string(),
                    message: other.to_string(),
                },
            })?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::RateFetchError {
                currency: target.to_string(),
                message: format!("provider returned invalid rate {rate}"),
            });
        }

        self.cache
            .insert(target.to_string(), ExchangeRate::new(target, rate, now));
        Ok(rate)
    }

    /// Look at the cached rate for a currency without refreshing it.
    #[must_use]
    pub fn cached_rate(&self, currency: &str) -> Option<&ExchangeRate> {
        self.cache.get(&currency.trim().to_uppercase())
    }

    /// Manually insert a rate into the cache with an explicit fetch
    /// timestamp (useful for testing and offline use).
    pub fn set_cached_rate(&mut self, currency: &str, rate: f64, fetched_at: DateTime<Utc>) {
        let code = currency.trim().to_uppercase();
        self.cache
            .insert(code.clone(), ExchangeRate::new(code, rate, fetched_at));
    }

    /// Drop all cached rates, forcing a refresh on the next conversion.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
