//! External data provider clients

mod duckduckgo;
mod yahoo;

pub use duckduckgo::DuckDuckGoClient;
pub use yahoo::YahooFinanceClient;
