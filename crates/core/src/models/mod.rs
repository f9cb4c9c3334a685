pub mod currency;
pub mod holding;
pub mod news;
pub mod portfolio;
pub mod price;
pub mod rate;
pub mod search;
pub mod series;
pub mod settings;
pub mod snapshot;
