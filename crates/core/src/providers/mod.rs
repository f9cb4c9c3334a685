pub mod registry;
pub mod traits;

// API provider implementations
pub mod finnhub;
pub mod fmp;
pub mod fxrates;
pub mod newsapi;
pub mod yahoo_finance;
