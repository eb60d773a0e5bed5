//! Model invocation layer for swarm-rs
//!
//! Every node in the analysis graph talks to the model through the same
//! narrow boundary: a role-fixed system instruction, a data-bearing user
//! instruction, and a sampling temperature in, plain response text out.
//! This crate provides:
//!
//! - [`ChatRequest`] / [`ChatResponse`] types with a request builder
//! - The [`LlmProvider`] trait
//! - Concrete providers behind feature flags (`gemini` by default)

pub mod error;
pub mod provider;
pub mod request;

pub use error::{LlmError, Result};
pub use provider::LlmProvider;
pub use request::{ChatRequest, ChatResponse, TokenUsage};

// Provider implementations (feature-gated)
#[cfg(any(feature = "gemini", feature = "openai"))]
pub mod providers;
