//! Tests for error types

use endpoint_tracker::core::TrackerError;

#[test]
fn test_invalid_host_error() {
    let err = TrackerError::InvalidHost("host must not be empty".to_string());
    assert_eq!(format!("{}", err), "invalid host: host must not be empty");
}

#[test]
fn test_invalid_port_error() {
    let err = TrackerError::InvalidPort("`abc` is not a number".to_string());
    assert_eq!(format!("{}", err), "invalid port: `abc` is not a number");
}

#[test]
fn test_config_error() {
    let err = TrackerError::Config("audit_capacity must be greater than 0".to_string());
    assert_eq!(format!("{}", err), "config error: audit_capacity must be greater than 0");
}

#[test]
fn test_backend_error() {
    let err = TrackerError::Backend("connection failed".to_string());
    assert_eq!(format!("{}", err), "backend error: connection failed");
}

#[test]
fn test_error_into_anyhow() {
    let result: endpoint_tracker::core::AppResult<()> =
        Err(TrackerError::InvalidPort("70000 is outside 0..=65535".into()).into());
    let err = result.unwrap_err();
    assert!(err.downcast_ref::<TrackerError>().is_some());
}
