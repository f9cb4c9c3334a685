pub mod aggregation_service;
pub mod currency_service;
pub mod history_service;
pub mod search_service;
