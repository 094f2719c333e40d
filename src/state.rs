//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional LLM client and the demo schedule config. All demo
//! session state (transcript, pipeline) is per-connection and lives in the
//! websocket handler, so nothing here needs locking.

use std::sync::Arc;
use std::time::Duration;

use crate::llm::types::LlmChat;
use crate::services::pipeline::{DEFAULT_STEPS, PipelineStep};

// =============================================================================
// DEMO CONFIG
// =============================================================================

const DEFAULT_TICK_MS: u64 = 100;
const DEFAULT_COMPLETION_DELAY_MS: u64 = 500;

/// Timing knobs for the simulated pipeline. The step schedule itself is
/// fixed; `DEMO_TIME_SCALE` divides every duration so demos and tests can
/// compress the run.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub steps: Vec<PipelineStep>,
    /// Interval at which the session runner advances the pipeline clock.
    pub tick: Duration,
    /// Pause between the `completed` event and result delivery.
    pub completion_delay: Duration,
}

impl DemoConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let scale = env_parse("DEMO_TIME_SCALE", 1_u32).max(1);
        let tick = Duration::from_millis(env_parse("DEMO_TICK_MS", DEFAULT_TICK_MS));
        let completion_delay =
            Duration::from_millis(env_parse("DEMO_COMPLETION_DELAY_MS", DEFAULT_COMPLETION_DELAY_MS));
        Self::scaled(scale, tick, completion_delay)
    }

    /// A schedule with every step duration divided by `scale`.
    #[must_use]
    pub fn scaled(scale: u32, tick: Duration, completion_delay: Duration) -> Self {
        let steps = DEFAULT_STEPS
            .iter()
            .map(|s| PipelineStep { label: s.label, duration: s.duration / scale })
            .collect();
        Self { steps, tick, completion_delay }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS.to_vec(),
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            completion_delay: Duration::from_millis(DEFAULT_COMPLETION_DELAY_MS),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if LLM env vars are not configured;
    /// generation then serves the built-in fallback scripts.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub demo: DemoConfig,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, demo: DemoConfig) -> Self {
        Self { llm, demo }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
