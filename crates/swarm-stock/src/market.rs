//! Data-access seams: market data and news search
//!
//! The analyst nodes depend on these traits, never on concrete clients.
//! Implementations must be best-effort: unknown or delisted tickers and
//! provider failures yield empty/default results, not errors. The nodes
//! translate "insufficient data" into explanatory text in their own output
//! fields; nothing at this boundary aborts a run.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Fundamental metrics with typed optional fields.
///
/// Every field is optional because the upstream response is loosely typed;
/// the per-role required-field predicates below decide hard-fail versus
/// soft-degrade instead of ad hoc key checks inside node bodies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMetrics {
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub eps: Option<f64>,
    pub forward_eps: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub profit_margins: Option<f64>,
    pub operating_margins: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub free_cashflow: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

impl StockMetrics {
    /// Required-field predicate for the fundamental analyst: missing market
    /// cap means the whole metric set is treated as unavailable.
    pub fn has_fundamental_core(&self) -> bool {
        self.market_cap.is_some()
    }

    /// Required-field predicate for the risk analyst: a missing beta
    /// degrades the data block but does not abort the node.
    pub fn has_risk_core(&self) -> bool {
        self.beta.is_some()
    }
}

/// One news search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub snippet: String,
    pub date: String,
    pub source: String,
    pub url: String,
}

/// Market data provider boundary (history + fundamentals)
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch OHLCV history for a ticker; empty on failure or unknown symbol
    async fn history(&self, ticker: &str, range: &str, interval: &str) -> Vec<Candle>;

    /// Fetch fundamental metrics; default (all-`None`) on failure
    async fn metrics(&self, ticker: &str) -> StockMetrics;
}

/// News search provider boundary
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Fetch recent news, freshness-ranked; empty on failure
    async fn news(&self, query: &str, max_results: usize) -> Vec<NewsItem>;
}
