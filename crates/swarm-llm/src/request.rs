//! Chat request and response types

use serde::{Deserialize, Serialize};

/// A single-turn chat completion request.
///
/// The graph nodes never hold a conversation: each invocation is one system
/// instruction plus one data-bearing user instruction, so the request type
/// stays deliberately flat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Role-fixed system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Data-bearing user instruction
    pub prompt: String,

    /// Sampling temperature in [0, 1]; 0.0 for strict extraction
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: usize,
}

impl ChatRequest {
    /// Create a builder for chat requests
    pub fn builder(model: impl Into<String>) -> ChatRequestBuilder {
        ChatRequestBuilder::new(model)
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Plain response text
    pub text: String,

    /// Token usage, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: usize,

    /// Number of output tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

/// Builder for ChatRequest
pub struct ChatRequestBuilder {
    model: String,
    system: Option<String>,
    prompt: String,
    temperature: f32,
    max_tokens: usize,
}

impl ChatRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            prompt: String::new(),
            temperature: 0.2,
            max_tokens: 2048,
        }
    }

    /// Set the system instruction
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the user instruction
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum tokens to generate
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Build the chat request
    pub fn build(self) -> ChatRequest {
        ChatRequest {
            model: self.model,
            system: self.system,
            prompt: self.prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}
