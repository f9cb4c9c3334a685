use thiserror::Error;

/// Unified error type for the entire investmate-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ingestion / Input ───────────────────────────────────────────
    #[error("Holding validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── Import / Export ─────────────────────────────────────────────
    #[error("Import format error: {0}")]
    ImportFormatError(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Market data / FX / Search ───────────────────────────────────
    #[error("Price not available for {symbol}")]
    PriceUnavailable {
        symbol: String,
    },

    #[error("Exchange rate fetch failed for {currency}: {message}")]
    RateFetchError {
        currency: String,
        message: String,
    },

    #[error("Symbol search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("History fetch failed for {symbol}: {message}")]
    HistoryFetchError {
        symbol: String,
        message: String,
    },
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
