use serde::{Deserialize, Serialize};

/// One symbol-search (autocomplete) result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,

    /// Company or instrument name (e.g., "Apple Inc")
    pub name: String,
}

impl SymbolMatch {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}
