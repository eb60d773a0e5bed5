//! Graph node contract

use crate::{Result, StateField, StateUpdate, TradingState};
use async_trait::async_trait;

/// Contract every node in the analysis graph must honor.
///
/// A node receives the full current state and returns only the subset of
/// fields it changed. Recoverable problems (missing ticker, failed fetch,
/// insufficient data) become explanatory text in the node's own output
/// field; only model-invocation failures surface as `Err`, which is fatal
/// for the whole request.
#[async_trait]
pub trait GraphNode: Send + Sync {
    /// Node name as it appears in events and traces
    fn name(&self) -> &str;

    /// Scalar state fields this node is allowed to write.
    ///
    /// The executor rejects any update touching a field outside this set,
    /// making per-field ownership structural rather than conventional.
    fn writes(&self) -> &'static [StateField];

    /// Run the node against the current state
    async fn run(&self, state: &TradingState) -> Result<StateUpdate>;
}
