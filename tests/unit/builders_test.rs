//! Tests for builder modules

use endpoint_tracker::builders::{build_session, SessionBuilder};
use endpoint_tracker::config::{EndpointConfig, TrackerConfig};
use endpoint_tracker::core::{Endpoint, TrackerError};

#[test]
fn test_session_builder_defaults() {
    let builder = SessionBuilder::new();
    assert_eq!(builder.configured_audit_capacity(), 256);

    let session = builder.build().unwrap();
    assert!(session.consumers().is_empty());
    assert!(session.producer().is_none());
}

#[test]
fn test_session_builder_with_producer() {
    let session = SessionBuilder::new()
        .audit_capacity(4)
        .producer(Endpoint::new("producer.com", 7070).unwrap())
        .build()
        .unwrap();
    assert_eq!(session.producer().map(Endpoint::address).as_deref(), Some("producer.com:7070"));
}

#[test]
fn test_session_builder_rejects_zero_capacity() {
    let err = SessionBuilder::new().audit_capacity(0).build().unwrap_err();
    assert!(matches!(err, TrackerError::Config(_)));
}

#[test]
fn test_build_session_from_config() {
    let config = TrackerConfig {
        producer: Some(EndpointConfig {
            host: "producer.com".into(),
            port: 7070,
        }),
        ..TrackerConfig::default()
    };
    let session = build_session(&config).unwrap();
    assert_eq!(session.producer().map(Endpoint::port), Some(7070));
    assert!(session.audit_events().is_empty());
}

#[test]
fn test_build_session_invalid_config() {
    let config = TrackerConfig {
        audit_capacity: 0,
        ..TrackerConfig::default()
    };
    assert!(matches!(build_session(&config), Err(TrackerError::Config(_))));
}
