//! Shared test doubles for the agent and graph suites
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use swarm_llm::{ChatRequest, ChatResponse, LlmError, LlmProvider, Result as LlmResult};
use swarm_stock::{Candle, MarketData, NewsItem, NewsSearch, StockMetrics};

/// Provider double that records every request and replies with a fixed text.
pub struct RecordingProvider {
    reply: String,
    calls: Mutex<Vec<ChatRequest>>,
}

impl RecordingProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for RecordingProvider {
    async fn complete(&self, request: ChatRequest) -> LlmResult<ChatResponse> {
        self.calls.lock().unwrap().push(request);
        Ok(ChatResponse {
            text: self.reply.clone(),
            usage: None,
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Provider double that always fails, simulating a network error.
pub struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    async fn complete(&self, _request: ChatRequest) -> LlmResult<ChatResponse> {
        Err(LlmError::RequestFailed("connection reset by peer".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Market-data double with canned history and metrics plus call counters.
pub struct StaticMarket {
    candles: Vec<Candle>,
    metrics: StockMetrics,
    pub history_calls: AtomicUsize,
    pub metrics_calls: AtomicUsize,
}

impl StaticMarket {
    pub fn new(candles: Vec<Candle>, metrics: StockMetrics) -> Self {
        Self {
            candles,
            metrics,
            history_calls: AtomicUsize::new(0),
            metrics_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MarketData for StaticMarket {
    async fn history(&self, _ticker: &str, _range: &str, _interval: &str) -> Vec<Candle> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.candles.clone()
    }

    async fn metrics(&self, _ticker: &str) -> StockMetrics {
        self.metrics_calls.fetch_add(1, Ordering::SeqCst);
        self.metrics.clone()
    }
}

/// News-search double with canned items, recording every query.
pub struct StaticNews {
    items: Vec<NewsItem>,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl StaticNews {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self {
            items,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NewsSearch for StaticNews {
    async fn news(&self, query: &str, max_results: usize) -> Vec<NewsItem> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        self.items.iter().take(max_results).cloned().collect()
    }
}

/// A deterministic daily candle series long enough for every indicator.
pub fn sample_candles(len: usize) -> Vec<Candle> {
    let start = Utc::now() - Duration::days(len as i64);
    (0..len)
        .map(|i| {
            let close = 100.0 + (i as f64) * 0.5;
            Candle {
                symbol: "RELIANCE.NS".to_string(),
                timestamp: start + Duration::days(i as i64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000_000 + (i as u64) * 1_000,
            }
        })
        .collect()
}

/// A fully populated metric set.
pub fn sample_metrics() -> StockMetrics {
    StockMetrics {
        market_cap: Some(1.9e13),
        pe_ratio: Some(27.4),
        forward_pe: Some(22.1),
        eps: Some(51.47),
        forward_eps: Some(60.2),
        dividend_yield: Some(0.0035),
        beta: Some(1.1),
        fifty_two_week_high: Some(1608.8),
        fifty_two_week_low: Some(1114.85),
        profit_margins: Some(0.073),
        operating_margins: Some(0.11),
        revenue_growth: Some(0.08),
        free_cashflow: Some(2.1e11),
        debt_to_equity: Some(41.5),
        return_on_equity: Some(0.089),
        return_on_assets: Some(0.042),
        sector: Some("Energy".to_string()),
        industry: Some("Oil & Gas Refining & Marketing".to_string()),
    }
}

/// A small batch of news items.
pub fn sample_news(len: usize) -> Vec<NewsItem> {
    (0..len)
        .map(|i| NewsItem {
            title: format!("Reliance headline {i}"),
            snippet: format!("Snippet body {i}..."),
            date: "2026-08-01".to_string(),
            source: "Example Wire".to_string(),
            url: format!("https://example.com/story/{i}"),
        })
        .collect()
}
