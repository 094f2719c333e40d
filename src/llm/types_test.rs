use super::*;

#[test]
fn content_block_text_roundtrip() {
    let json = r#"{"type":"text","text":"hello"}"#;
    let block: ContentBlock = serde_json::from_str(json).unwrap();
    assert!(matches!(&block, ContentBlock::Text { text } if text == "hello"));
}

#[test]
fn content_block_unknown_type() {
    let json = r#"{"type":"some_future_type","data":{}}"#;
    let block: ContentBlock = serde_json::from_str(json).unwrap();
    assert!(matches!(block, ContentBlock::Unknown));
}

#[test]
fn message_user_helper() {
    let msg = Message::user("generate a script");
    assert_eq!(msg.role, "user");
    assert_eq!(msg.content, "generate a script");
}

#[test]
fn message_serializes_to_wire_shape() {
    let msg = Message::user("hi");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
}

#[test]
fn first_text_skips_non_text_blocks() {
    let resp = ChatResponse {
        content: vec![
            ContentBlock::Thinking { thinking: "hmm".into() },
            ContentBlock::Text { text: "answer".into() },
        ],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert_eq!(resp.first_text(), Some("answer"));
}

#[test]
fn first_text_none_when_empty() {
    let resp = ChatResponse {
        content: vec![],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert_eq!(resp.first_text(), None);
}

#[test]
fn error_display_includes_status() {
    let err = LlmError::ApiResponse { status: 429, body: "rate limited".into() };
    assert!(err.to_string().contains("429"));
}
