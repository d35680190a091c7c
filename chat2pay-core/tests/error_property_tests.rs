//! Property-based tests for the error system.

use chat2pay_core::error::{ContextExt, Error, NetworkError, Result};
use proptest::prelude::*;
use std::error::Error as StdError;

fn message_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _-]{1,60}"
}

fn error_strategy() -> impl Strategy<Value = Error> {
    prop_oneof![
        (message_strategy(), 400u16..600).prop_map(|(msg, status)| Error::api(msg, status)),
        message_strategy().prop_map(Error::network),
        message_strategy().prop_map(Error::timeout),
        message_strategy().prop_map(Error::invalid_request),
        message_strategy().prop_map(Error::backend),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_every_variant_displays(err in error_strategy()) {
        prop_assert!(!err.to_string().is_empty());
        let debug = format!("{err:?}");
        prop_assert!(!debug.is_empty());
    }

    #[test]
    fn prop_api_display_is_the_message(msg in message_strategy(), status in 400u16..600) {
        let err = Error::api(msg.clone(), status);
        prop_assert_eq!(err.to_string(), msg);
        prop_assert_eq!(err.status(), Some(status));
    }

    #[test]
    fn prop_context_layers_are_transparent(
        err in error_strategy(),
        layers in prop::collection::vec(message_strategy(), 1..5),
    ) {
        let status = err.status();
        let retryable = err.is_retryable();
        let backend = err.as_backend().map(str::to_string);

        let mut wrapped = err;
        for layer in &layers {
            wrapped = wrapped.context(layer.clone());
        }

        prop_assert_eq!(wrapped.status(), status);
        prop_assert_eq!(wrapped.is_retryable(), retryable);
        prop_assert_eq!(wrapped.as_backend().map(str::to_string), backend);
        prop_assert_eq!(wrapped.to_string(), layers.last().cloned().unwrap());
        prop_assert!(wrapped.source().is_some());
    }

    #[test]
    fn prop_report_lists_every_layer(msg in message_strategy(), outer in message_strategy()) {
        let report = Error::backend(msg.clone()).context(outer.clone()).report();
        prop_assert!(report.starts_with(&outer));
        let cause = format!("Caused by: Backend error: {msg}");
        prop_assert!(report.contains(&cause));
    }

    #[test]
    fn prop_retryable_statuses(status in 400u16..600) {
        let expected = status == 429 || status >= 500;
        prop_assert_eq!(Error::api("x", status).is_retryable(), expected);
    }
}

#[test]
fn test_network_and_timeout_are_retryable() {
    assert!(Error::network("refused").is_retryable());
    assert!(Error::Network(Box::new(NetworkError::Timeout)).is_retryable());
    assert!(Error::timeout("30s").is_retryable());
    assert!(!Error::backend("Login failed").is_retryable());
    assert!(!Error::invalid_request("id is required").is_retryable());
}

#[test]
fn test_option_context() {
    let missing: Option<&str> = None;
    let result: Result<&str> = missing.context("login response carries no access_token");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("access_token"));
}
