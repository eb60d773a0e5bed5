//! Multi-agent stock analysis swarm for Indian equities
//!
//! Given a natural-language query ("Should I buy RELIANCE.NS?") the swarm
//! resolves a ticker, fans out to four independent analysts (technical,
//! fundamental, sentiment, risk) that each combine fetched data with one
//! model round-trip, and synthesizes their outputs into a final
//! buy/hold/sell verdict through a judge node.
//!
//! # Architecture
//!
//! The orchestration lives in `swarm-graph`: a fixed DAG
//! `supervisor → {4 analysts in parallel} → judge` over the shared
//! `TradingState` record from `swarm-core`. This crate supplies the
//! application pieces:
//!
//! - Data shims ([`api::YahooFinanceClient`], [`api::DuckDuckGoClient`])
//!   behind the [`market::MarketData`] / [`market::NewsSearch`] seams
//! - Indicator computation ([`indicators`])
//! - The six graph nodes ([`agents`]) and [`agents::build_graph`]
//! - Configuration, caching, the optional document store, and the REST
//!   surface ([`server`])
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use swarm_core::TradingState;
//! use swarm_llm::providers::GeminiProvider;
//! use swarm_stock::{agents, api, SwarmConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(SwarmConfig::builder().with_env().build()?);
//!     let provider = Arc::new(GeminiProvider::from_env()?);
//!     let market = Arc::new(api::YahooFinanceClient::new(&config)?);
//!     let news = Arc::new(api::DuckDuckGoClient::new(config.news_rate_limit)?);
//!
//!     let graph = agents::build_graph(provider, market, news, config)?;
//!     let state = graph
//!         .invoke(TradingState::from_query("Should I buy RELIANCE.NS?"))
//!         .await?;
//!     println!("{}", state.final_recommendation);
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod indicators;
pub mod market;
pub mod server;
pub mod store;

// Re-export main types for convenience
pub use agents::{
    build_graph, FundamentalAnalystNode, JudgeNode, RiskAnalystNode, SentimentAnalystNode,
    SupervisorNode, TechnicalAnalystNode,
};
pub use config::SwarmConfig;
pub use error::{Result, StockError};
pub use market::{Candle, MarketData, NewsItem, NewsSearch, StockMetrics};
