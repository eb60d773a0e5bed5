//! Shared server state
//!
//! The graph is compiled once at startup and shared across requests; the
//! wiring is stateless, only the per-request `TradingState` flows. If any
//! part of initialization fails the process still starts, in a degraded
//! mode where the health probe reports the failure and analysis requests
//! are rejected with an explanatory error.

use std::sync::Arc;

use swarm_graph::AnalysisGraph;
use swarm_llm::providers::GeminiProvider;
use swarm_llm::LlmProvider;
use tracing::{error, info};

use crate::agents::build_graph;
use crate::api::{DuckDuckGoClient, YahooFinanceClient};
use crate::config::SwarmConfig;
use crate::market::{MarketData, NewsSearch};
use crate::server::error::ApiError;
use crate::store::DocumentStore;

/// Data-shim handles kept for per-request graph rebuilds
pub struct DataClients {
    pub market: Arc<dyn MarketData>,
    pub news: Arc<dyn NewsSearch>,
}

/// State shared by all request handlers
pub struct AppState {
    pub config: Arc<SwarmConfig>,
    pub graph: Option<Arc<AnalysisGraph>>,
    pub data: Option<DataClients>,
    pub store: Arc<DocumentStore>,
    init_error: Option<String>,
}

impl AppState {
    /// Build the state, degrading instead of failing.
    pub fn initialize(config: SwarmConfig) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(DocumentStore::new());

        match Self::try_build(&config) {
            Ok((graph, data)) => {
                info!(model = %config.model, "analysis graph initialized");
                Self {
                    config,
                    graph: Some(Arc::new(graph)),
                    data: Some(data),
                    store,
                    init_error: None,
                }
            }
            Err(reason) => {
                error!(%reason, "analysis graph failed to initialize, starting degraded");
                Self {
                    config,
                    graph: None,
                    data: None,
                    store,
                    init_error: Some(reason),
                }
            }
        }
    }

    fn try_build(config: &Arc<SwarmConfig>) -> Result<(AnalysisGraph, DataClients), String> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| "GEMINI_API_KEY not configured".to_string())?;

        let provider: Arc<dyn LlmProvider> =
            Arc::new(GeminiProvider::new(api_key).map_err(|e| e.to_string())?);
        let market: Arc<dyn MarketData> =
            Arc::new(YahooFinanceClient::new(config).map_err(|e| e.to_string())?);
        let news: Arc<dyn NewsSearch> =
            Arc::new(DuckDuckGoClient::new(config.news_rate_limit).map_err(|e| e.to_string())?);

        let graph = build_graph(
            provider,
            Arc::clone(&market),
            Arc::clone(&news),
            Arc::clone(config),
        )
        .map_err(|e| e.to_string())?;

        Ok((graph, DataClients { market, news }))
    }

    /// True when the shared graph compiled at startup.
    pub fn graph_initialized(&self) -> bool {
        self.graph.is_some()
    }

    /// Resolve the graph for one request.
    ///
    /// Without an override this is the shared startup graph. With a
    /// per-request API key a one-off provider and graph are built for that
    /// request only; process-wide configuration is never mutated.
    pub fn graph_for(&self, api_key: Option<&str>) -> Result<Arc<AnalysisGraph>, ApiError> {
        if let Some(key) = api_key {
            let data = self.data.as_ref().ok_or_else(|| self.init_failure())?;

            let provider: Arc<dyn LlmProvider> = Arc::new(
                GeminiProvider::new(key).map_err(|e| ApiError::Internal(e.to_string()))?,
            );
            let graph = build_graph(
                provider,
                Arc::clone(&data.market),
                Arc::clone(&data.news),
                Arc::clone(&self.config),
            )
            .map_err(|e| ApiError::Internal(e.to_string()))?;

            return Ok(Arc::new(graph));
        }

        self.graph.clone().ok_or_else(|| self.init_failure())
    }

    fn init_failure(&self) -> ApiError {
        ApiError::GraphUnavailable(
            self.init_error
                .clone()
                .unwrap_or_else(|| "unknown initialization failure".to_string()),
        )
    }
}
