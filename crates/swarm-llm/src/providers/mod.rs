//! Concrete model provider implementations

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider};

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};
