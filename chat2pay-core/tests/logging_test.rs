//! Logging system integration tests.

use chat2pay_core::logging::{LogConfig, LogFormat, LogLevel, try_init_logging};
use std::sync::Once;

static INIT: Once = Once::new();

fn setup_logging() {
    INIT.call_once(|| {
        let _ = try_init_logging(&LogConfig::test());
    });
}

#[test]
fn test_log_config_development() {
    let config = LogConfig::development();
    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(config.show_span_events);
}

#[test]
fn test_log_config_production() {
    let config = LogConfig::production();
    assert_eq!(config.level, LogLevel::Info);
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.show_thread_ids);
}

#[test]
fn test_default_directive_covers_workspace_crates() {
    let directive = LogConfig::test().default_directive();
    assert!(directive.contains("chat2pay_core=warn"));
    assert!(directive.contains("chat2pay_api=warn"));
    assert!(directive.contains("chat2pay_rust=warn"));
}

#[test]
fn test_second_init_is_rejected_quietly() {
    setup_logging();
    assert!(!try_init_logging(&LogConfig::test()));
}

#[test]
fn test_structured_fields_do_not_panic() {
    use tracing::{debug, info, warn};

    setup_logging();

    info!(url = "ws://localhost:9005/ws/chat/42", "Chat socket connected");
    warn!(attempt = 3, delay_ms = 3000, "Chat socket reconnect scheduled");
    debug!(method = "GET", path = "/api/products", status = 200, "HTTP request completed");
}
