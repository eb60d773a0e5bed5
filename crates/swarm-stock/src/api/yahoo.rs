//! Yahoo Finance client: OHLCV history and fundamental metrics
//!
//! History goes through the `yahoo_finance_api` crate; fundamentals come
//! from the quote-summary JSON endpoint, which the crate does not expose.
//! Both paths sit behind TTL caches. The [`MarketData`] impl at the bottom
//! converts every failure into an empty/default result, which is the
//! contract the analyst nodes rely on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::warn;
use yahoo_finance_api as yahoo;

use crate::cache::{CacheKey, CacheManager};
use crate::config::SwarmConfig;
use crate::error::{Result, StockError};
use crate::market::{Candle, MarketData, StockMetrics};

const QUOTE_SUMMARY_BASE: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const QUOTE_SUMMARY_MODULES: &str = "summaryDetail,defaultKeyStatistics,financialData,assetProfile";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Yahoo Finance client with TTL-tiered caching
pub struct YahooFinanceClient {
    http: reqwest::Client,
    caches: Arc<CacheManager>,
}

impl YahooFinanceClient {
    /// Create a client with cache TTLs taken from the configuration
    pub fn new(config: &SwarmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(StockError::NetworkError)?;

        Ok(Self {
            http,
            caches: Arc::new(CacheManager::new(
                config.cache_ttl_realtime,
                config.cache_ttl_fundamental,
            )),
        })
    }

    /// Fetch historical OHLCV data, going through the realtime cache tier.
    pub async fn get_history(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<Candle>> {
        let key = CacheKey::new(symbol, "history", (range, interval));
        let symbol_owned = symbol.to_string();
        let range_owned = range.to_string();
        let interval_owned = interval.to_string();

        let value = self
            .caches
            .realtime
            .get_or_fetch(key, || async move {
                let candles =
                    fetch_history(&symbol_owned, &range_owned, &interval_owned).await?;
                serde_json::to_value(candles).map_err(StockError::JsonError)
            })
            .await?;

        serde_json::from_value(value).map_err(StockError::JsonError)
    }

    /// Fetch fundamental metrics, going through the fundamental cache tier.
    pub async fn get_metrics(&self, symbol: &str) -> Result<StockMetrics> {
        let key = CacheKey::new(symbol, "metrics", ());
        let http = self.http.clone();
        let symbol_owned = symbol.to_string();

        let value = self
            .caches
            .fundamental
            .get_or_fetch(key, || async move {
                let metrics = fetch_metrics(&http, &symbol_owned).await?;
                serde_json::to_value(metrics).map_err(StockError::JsonError)
            })
            .await?;

        serde_json::from_value(value).map_err(StockError::JsonError)
    }
}

/// Map a named range onto a start timestamp relative to now.
fn range_start(range: &str, end: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let start = match range {
        "5d" => end - chrono::Duration::days(5),
        "1mo" => end - chrono::Duration::days(30),
        "3mo" => end - chrono::Duration::days(90),
        "6mo" => end - chrono::Duration::days(180),
        "1y" => end - chrono::Duration::days(365),
        _ => return Err(StockError::InvalidSymbol(format!("Invalid range: {range}"))),
    };
    Ok(start)
}

async fn fetch_history(symbol: &str, range: &str, interval: &str) -> Result<Vec<Candle>> {
    let provider =
        yahoo::YahooConnector::new().map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

    let end = Utc::now();
    let start = range_start(range, end)?;

    // Convert chrono DateTime to the time crate's OffsetDateTime
    let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
        .map_err(|e| StockError::YahooFinanceError(format!("Invalid start timestamp: {e}")))?;
    let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
        .map_err(|e| StockError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

    let response = provider
        .get_quote_history_interval(symbol, start_odt, end_odt, interval)
        .await
        .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

    let quotes = response
        .quotes()
        .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

    Ok(quotes
        .iter()
        .map(|q| Candle {
            symbol: symbol.to_string(),
            timestamp: DateTime::from_timestamp(q.timestamp as i64, 0).unwrap_or_else(Utc::now),
            open: q.open,
            high: q.high,
            low: q.low,
            close: q.close,
            volume: q.volume,
        })
        .collect())
}

async fn fetch_metrics(http: &reqwest::Client, symbol: &str) -> Result<StockMetrics> {
    let url = format!("{QUOTE_SUMMARY_BASE}/{symbol}");
    let response = http
        .get(url)
        .query(&[("modules", QUOTE_SUMMARY_MODULES)])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(StockError::YahooFinanceError(format!(
            "quote summary HTTP {}",
            response.status()
        )));
    }

    let body: Value = response.json().await?;
    let result = &body["quoteSummary"]["result"][0];
    if result.is_null() {
        // Unknown or delisted ticker: empty metrics, not an error
        return Ok(StockMetrics::default());
    }

    Ok(metrics_from_summary(result))
}

/// Pull the typed metric subset out of a quote-summary result object.
///
/// Numeric fields arrive as `{ "raw": f64, "fmt": "..." }` wrappers; any
/// missing module or key simply leaves the field `None`.
fn metrics_from_summary(result: &Value) -> StockMetrics {
    let summary = &result["summaryDetail"];
    let key_stats = &result["defaultKeyStatistics"];
    let financial = &result["financialData"];
    let profile = &result["assetProfile"];

    let raw = |module: &Value, key: &str| module[key]["raw"].as_f64();

    StockMetrics {
        market_cap: raw(summary, "marketCap"),
        pe_ratio: raw(summary, "trailingPE"),
        forward_pe: raw(summary, "forwardPE"),
        eps: raw(key_stats, "trailingEps"),
        forward_eps: raw(key_stats, "forwardEps"),
        dividend_yield: raw(summary, "dividendYield"),
        beta: raw(summary, "beta").or_else(|| raw(key_stats, "beta")),
        fifty_two_week_high: raw(summary, "fiftyTwoWeekHigh"),
        fifty_two_week_low: raw(summary, "fiftyTwoWeekLow"),
        profit_margins: raw(key_stats, "profitMargins"),
        operating_margins: raw(financial, "operatingMargins"),
        revenue_growth: raw(financial, "revenueGrowth"),
        free_cashflow: raw(financial, "freeCashflow"),
        debt_to_equity: raw(financial, "debtToEquity"),
        return_on_equity: raw(financial, "returnOnEquity"),
        return_on_assets: raw(financial, "returnOnAssets"),
        sector: profile["sector"].as_str().map(String::from),
        industry: profile["industry"].as_str().map(String::from),
    }
}

#[async_trait]
impl MarketData for YahooFinanceClient {
    async fn history(&self, ticker: &str, range: &str, interval: &str) -> Vec<Candle> {
        match self.get_history(ticker, range, interval).await {
            Ok(candles) => candles,
            Err(e) => {
                warn!(ticker, range, error = %e, "history fetch failed");
                Vec::new()
            }
        }
    }

    async fn metrics(&self, ticker: &str) -> StockMetrics {
        match self.get_metrics(ticker).await {
            Ok(metrics) => metrics,
            Err(e) => {
                warn!(ticker, error = %e, "metrics fetch failed");
                StockMetrics::default()
            }
        }
    }
}
