//! LLM — Anthropic Messages API client for script generation.
//!
//! DESIGN
//! ======
//! One provider, one call shape: a single-turn user message, full awaited
//! response, no streaming. The `LlmChat` trait in `types` is the seam the
//! rest of the app depends on, so services can be tested against mocks.

pub mod anthropic;
pub mod config;
pub mod types;

use std::sync::Arc;

use types::{LlmChat, LlmError};

/// Build the LLM client from environment variables.
///
/// # Errors
///
/// Returns an error if the API key is missing or the HTTP client fails to
/// build. Callers treat this as non-fatal: generation degrades to the
/// built-in fallback scripts.
pub fn client_from_env() -> Result<Arc<dyn LlmChat>, LlmError> {
    let config = config::LlmConfig::from_env()?;
    let client = anthropic::AnthropicClient::new(&config)?;
    tracing::info!(model = client.model(), "LLM client initialized");
    Ok(Arc::new(client))
}
