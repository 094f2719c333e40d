use super::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes the env-mutating tests in this module; process environment
/// is shared across test threads.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_API_KEY_ENV");
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_MAX_TOKENS");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("TS_TEST_KEY");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "TS_TEST_KEY");
        std::env::set_var("TS_TEST_KEY", "secret");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.max_tokens, DEFAULT_MAX_TOKENS);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_overrides() {
    let _guard = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "TS_TEST_KEY");
        std::env::set_var("TS_TEST_KEY", "secret");
        std::env::set_var("LLM_MODEL", "claude-3-5-haiku-20241022");
        std::env::set_var("LLM_MAX_TOKENS", "1024");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.model, "claude-3-5-haiku-20241022");
    assert_eq!(cfg.max_tokens, 1024);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_llm_env() };
}

#[test]
fn missing_indirection_var_errors() {
    let _guard = env_guard();
    unsafe { clear_llm_env() };

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { var } if var == "LLM_API_KEY_ENV"));
}

#[test]
fn missing_named_key_var_errors() {
    let _guard = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "TS_TEST_KEY");
    }

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { var } if var == "TS_TEST_KEY"));

    unsafe { clear_llm_env() };
}

#[test]
fn invalid_numeric_override_falls_back_to_default() {
    let _guard = env_guard();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "TS_TEST_KEY");
        std::env::set_var("TS_TEST_KEY", "secret");
        std::env::set_var("LLM_MAX_TOKENS", "not-a-number");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.max_tokens, DEFAULT_MAX_TOKENS);

    unsafe { clear_llm_env() };
}
