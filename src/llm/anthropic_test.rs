use super::*;
use crate::llm::config::LlmTimeouts;

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "// Generated Earth Engine script" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert_eq!(resp.first_text(), Some("// Generated Earth Engine script"));
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_empty_content() {
    let json = make_response(serde_json::json!([]));
    let resp = parse_response(&json).unwrap();
    assert!(resp.content.is_empty());
    assert_eq!(resp.first_text(), None);
}

#[test]
fn parse_unknown_content_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "hi" },
        { "type": "some_future_type", "data": {} }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { .. }));
}

#[test]
fn parse_thinking_blocks_are_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." },
        { "type": "text", "text": "Here is the script" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert_eq!(resp.first_text(), Some("Here is the script"));
}

#[test]
fn parse_invalid_json() {
    let result = parse_response("not json");
    assert!(matches!(result.unwrap_err(), LlmError::ApiParse(_)));
}

#[test]
fn request_body_wire_shape() {
    let messages = vec![Message::user("classify crops")];
    let body = ApiRequest { model: "claude-sonnet-4-5-20250929", max_tokens: 4096, messages: &messages };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "model": "claude-sonnet-4-5-20250929",
            "max_tokens": 4096,
            "messages": [{ "role": "user", "content": "classify crops" }]
        })
    );
}

#[test]
fn client_builds_from_config() {
    let config = LlmConfig {
        api_key: "secret".into(),
        model: "claude-sonnet-4-5-20250929".into(),
        max_tokens: 4096,
        timeouts: LlmTimeouts { request_secs: 1, connect_secs: 1 },
    };
    let client = AnthropicClient::new(&config).unwrap();
    assert_eq!(client.model(), "claude-sonnet-4-5-20250929");
}
