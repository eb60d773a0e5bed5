//! Model provider trait definition

use crate::{ChatRequest, ChatResponse, Result};
use async_trait::async_trait;

/// Trait for model providers
///
/// Implementations of this trait provide access to different model services
/// (e.g., Gemini, OpenAI-compatible endpoints). The call is a single
/// blocking round-trip; streaming is a presentation-layer concern and does
/// not appear at this boundary.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a single-turn chat request
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Get the provider name (e.g., "gemini", "openai")
    fn name(&self) -> &str;
}
