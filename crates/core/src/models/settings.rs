use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User-configurable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// The currency in which portfolio values are displayed (e.g., "USD", "EUR").
    /// Storage values stay in USD regardless of this setting.
    pub display_currency: String,

    /// Optional API keys for providers that require them.
    /// Keys: provider name (e.g., "finnhub", "fxratesapi", "newsapi", "fmp").
    /// Values: the API key string.
    pub api_keys: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: "USD".to_string(),
            api_keys: HashMap::new(),
        }
    }
}

impl Settings {
    /// Look up the API key configured for a provider, if any.
    #[must_use]
    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }
}
