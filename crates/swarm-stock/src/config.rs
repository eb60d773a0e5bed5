//! Configuration for the analysis swarm

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration shared by the graph nodes and the data shims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// Model identifier passed to the provider
    pub model: String,

    /// Gemini API key; may also be overridden per request at the API layer
    pub gemini_api_key: Option<String>,

    /// Maximum tokens the model may generate per node invocation
    pub max_tokens: usize,

    /// Cache TTL for real-time data (price history)
    pub cache_ttl_realtime: Duration,

    /// Cache TTL for fundamental data (metrics)
    pub cache_ttl_fundamental: Duration,

    /// News search requests allowed per minute
    pub news_rate_limit: u32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            gemini_api_key: None,
            max_tokens: 2048,
            cache_ttl_realtime: Duration::from_secs(60), // 1 minute
            cache_ttl_fundamental: Duration::from_secs(3600), // 1 hour
            news_rate_limit: 30,
        }
    }
}

impl SwarmConfig {
    /// Create a new configuration builder
    pub fn builder() -> SwarmConfigBuilder {
        SwarmConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(StockError::ConfigError("model must not be empty".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(StockError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        if self.news_rate_limit == 0 {
            return Err(StockError::ConfigError(
                "news_rate_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for SwarmConfig
#[derive(Debug, Default)]
pub struct SwarmConfigBuilder {
    model: Option<String>,
    gemini_api_key: Option<String>,
    max_tokens: Option<usize>,
    cache_ttl_realtime: Option<Duration>,
    cache_ttl_fundamental: Option<Duration>,
    news_rate_limit: Option<u32>,
}

impl SwarmConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Set the maximum output tokens per node invocation
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set cache TTL for real-time data
    pub fn cache_ttl_realtime(mut self, ttl: Duration) -> Self {
        self.cache_ttl_realtime = Some(ttl);
        self
    }

    /// Set cache TTL for fundamental data
    pub fn cache_ttl_fundamental(mut self, ttl: Duration) -> Self {
        self.cache_ttl_fundamental = Some(ttl);
        self
    }

    /// Set the news search rate limit (requests per minute)
    pub fn news_rate_limit(mut self, limit: u32) -> Self {
        self.news_rate_limit = Some(limit);
        self
    }

    /// Load model and API key from the environment
    ///
    /// Reads `GEMINI_API_KEY` and, when set, `SWARM_MODEL`.
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Ok(model) = std::env::var("SWARM_MODEL") {
            self.model = Some(model);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SwarmConfig> {
        let defaults = SwarmConfig::default();

        let config = SwarmConfig {
            model: self.model.unwrap_or(defaults.model),
            gemini_api_key: self.gemini_api_key,
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            cache_ttl_realtime: self.cache_ttl_realtime.unwrap_or(defaults.cache_ttl_realtime),
            cache_ttl_fundamental: self
                .cache_ttl_fundamental
                .unwrap_or(defaults.cache_ttl_fundamental),
            news_rate_limit: self.news_rate_limit.unwrap_or(defaults.news_rate_limit),
        };

        config.validate()?;
        Ok(config)
    }
}
