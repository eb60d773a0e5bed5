//! DuckDuckGo news search client
//!
//! Two-step scrape: the HTML front page hands out a `vqd` token which the
//! `news.js` endpoint requires. Results are freshness-ranked by the
//! provider. Rate-limited with a per-minute quota; all failures degrade to
//! an empty result list at the [`NewsSearch`] boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;

use crate::error::{Result, StockError};
use crate::market::{NewsItem, NewsSearch};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const SEARCH_BASE: &str = "https://duckduckgo.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// DuckDuckGo news client with rate limiting
pub struct DuckDuckGoClient {
    client: Client,
    rate_limiter: SharedRateLimiter,
}

impl DuckDuckGoClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `rate_limit` - Requests per minute allowed against the provider
    pub fn new(rate_limit: u32) -> Result<Self> {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(30).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(StockError::NetworkError)?;

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Search recent news for a query, newest first.
    pub async fn search_news(&self, query: &str, max_results: usize) -> Result<Vec<NewsItem>> {
        self.rate_limiter.until_ready().await;

        // Step 1: the front page embeds the vqd token for this query
        let html = self
            .client
            .get(format!("{SEARCH_BASE}/"))
            .query(&[("q", query), ("iar", "news"), ("ia", "news")])
            .send()
            .await?
            .text()
            .await?;

        let vqd = extract_vqd(&html).ok_or_else(|| {
            StockError::SearchError("could not obtain search token".to_string())
        })?;

        // Step 2: the JSON news endpoint
        let payload: Value = self
            .client
            .get(format!("{SEARCH_BASE}/news.js"))
            .query(&[
                ("l", "in-en"),
                ("o", "json"),
                ("noamp", "1"),
                ("q", query),
                ("vqd", vqd.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        Ok(items_from_payload(&payload, max_results))
    }
}

/// Pull the vqd token out of the search front page.
fn extract_vqd(html: &str) -> Option<String> {
    for quote in ['"', '\''] {
        let marker = format!("vqd={quote}");
        if let Some(start) = html.find(&marker) {
            let rest = &html[start + marker.len()..];
            if let Some(end) = rest.find(quote) {
                let token = &rest[..end];
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

/// Map the news.js payload onto typed items, newest first.
fn items_from_payload(payload: &Value, max_results: usize) -> Vec<NewsItem> {
    let Some(results) = payload["results"].as_array() else {
        return Vec::new();
    };

    results
        .iter()
        .take(max_results)
        .map(|item| NewsItem {
            title: item["title"].as_str().unwrap_or_default().to_string(),
            snippet: item["excerpt"].as_str().unwrap_or_default().to_string(),
            date: item["date"]
                .as_i64()
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            source: item["source"].as_str().unwrap_or_default().to_string(),
            url: item["url"].as_str().unwrap_or_default().to_string(),
        })
        .collect()
}

#[async_trait]
impl NewsSearch for DuckDuckGoClient {
    async fn news(&self, query: &str, max_results: usize) -> Vec<NewsItem> {
        match self.search_news(query, max_results).await {
            Ok(items) => items,
            Err(e) => {
                warn!(query, error = %e, "news search failed");
                Vec::new()
            }
        }
    }
}
