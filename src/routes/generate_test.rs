use super::*;
use crate::llm::types::{ChatResponse, ContentBlock, LlmChat, LlmError, Message};
use crate::state::DemoConfig;
use std::sync::Arc;

struct FixedLlm(&'static str);

#[async_trait::async_trait]
impl LlmChat for FixedLlm {
    async fn chat(&self, _messages: &[Message]) -> Result<ChatResponse, LlmError> {
        Ok(ChatResponse {
            content: vec![ContentBlock::Text { text: self.0.into() }],
            model: "mock".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 0,
            output_tokens: 0,
        })
    }
}

#[tokio::test]
async fn without_llm_serves_fallback_script() {
    let state = AppState::new(None, DemoConfig::default());
    let response = generate_code(State(state), Json(GenerateBody { query: "flood near the river".into() })).await;
    assert_eq!(response.kind, QueryKind::Flood);
    assert!(response.code.contains("S1_GRD"));
}

#[tokio::test]
async fn crop_query_routes_to_crop_fallback() {
    let state = AppState::new(None, DemoConfig::default());
    let response = generate_code(State(state), Json(GenerateBody { query: "wheat acreage".into() })).await;
    assert_eq!(response.kind, QueryKind::Crop);
    assert!(response.code.contains("Hoshiarpur"));
}

#[tokio::test]
async fn with_llm_returns_generated_text() {
    let llm: Arc<dyn LlmChat> = Arc::new(FixedLlm("var generated = true;"));
    let state = AppState::new(Some(llm), DemoConfig::default());
    let response = generate_code(State(state), Json(GenerateBody { query: "anything".into() })).await;
    assert_eq!(response.code, "var generated = true;");
}
