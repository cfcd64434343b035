//! Tests for configuration validation

use std::collections::HashMap;
use std::time::Duration;

use endpoint_tracker::config::{
    EndpointConfig, LoadConfig, RunnerConfig, StageConfig, TrackerConfig, MAX_ADJUST_EVERY_MS,
    MAX_INTERVAL_SECS, MAX_PROFILE_SECS,
};

#[test]
fn test_default_config_is_valid() {
    let config = TrackerConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.runner.interval(), Duration::from_secs(90));
    assert!(config.runner.run_immediately);
    assert_eq!(config.load.stages.len(), 11);
}

#[test]
fn test_invalid_audit_capacity() {
    let config = TrackerConfig {
        audit_capacity: 0,
        ..TrackerConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_runner_interval() {
    let runner = RunnerConfig {
        interval_secs: 0,
        run_immediately: true,
    };
    assert!(runner.validate().is_err());
}

#[test]
fn test_runner_interval_upper_bound() {
    let at_limit = RunnerConfig {
        interval_secs: MAX_INTERVAL_SECS,
        run_immediately: false,
    };
    assert!(at_limit.validate().is_ok());

    for interval_secs in [MAX_INTERVAL_SECS + 1, u64::MAX] {
        let runner = RunnerConfig {
            interval_secs,
            run_immediately: true,
        };
        let err = runner.validate().unwrap_err();
        assert!(err.contains("interval_secs"), "{err}");
    }
}

#[test]
fn test_stage_durations_must_fit() {
    let overflowing = LoadConfig {
        stages: vec![
            StageConfig {
                duration_secs: u64::MAX,
                target: 10,
            },
            StageConfig {
                duration_secs: 1,
                target: 0,
            },
        ],
        ..LoadConfig::default()
    };
    assert!(overflowing.validate().is_err());

    let too_long = LoadConfig {
        stages: vec![
            StageConfig {
                duration_secs: MAX_PROFILE_SECS,
                target: 10,
            },
            StageConfig {
                duration_secs: 1,
                target: 0,
            },
        ],
        ..LoadConfig::default()
    };
    assert!(too_long.validate().is_err());

    let exactly_max = LoadConfig {
        stages: vec![StageConfig {
            duration_secs: MAX_PROFILE_SECS,
            target: 10,
        }],
        ..LoadConfig::default()
    };
    assert!(exactly_max.validate().is_ok());
}

#[test]
fn test_adjust_every_upper_bound() {
    let load = LoadConfig {
        adjust_every_ms: MAX_ADJUST_EVERY_MS + 1,
        ..LoadConfig::default()
    };
    assert!(load.validate().is_err());
}

#[test]
fn test_invalid_producer() {
    let config = TrackerConfig {
        producer: Some(EndpointConfig {
            host: "  ".into(),
            port: 7070,
        }),
        ..TrackerConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.starts_with("producer invalid"));
}

#[test]
fn test_invalid_load_id_range() {
    let load = LoadConfig {
        id_min: 10,
        id_max: 1,
        ..LoadConfig::default()
    };
    assert!(load.validate().is_err());
}

#[test]
fn test_invalid_load_endpoint() {
    let load = LoadConfig {
        endpoint: "no-port-here".into(),
        ..LoadConfig::default()
    };
    assert!(load.validate().is_err());
}

#[test]
fn test_load_profile_from_stages() {
    let load = LoadConfig {
        start_vus: 0,
        stages: vec![
            StageConfig {
                duration_secs: 10,
                target: 10,
            },
            StageConfig {
                duration_secs: 10,
                target: 0,
            },
        ],
        ..LoadConfig::default()
    };
    let profile = load.profile();
    assert_eq!(profile.total_duration(), Duration::from_secs(20));
    assert_eq!(profile.target_at(Duration::from_secs(5)), 5);
    assert_eq!(profile.target_at(Duration::from_secs(15)), 5);
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "audit_capacity": 32,
        "producer": { "host": "producer.com", "port": 7070 },
        "runner": { "interval_secs": 30 },
        "load": {
            "endpoint": "13.212.191.133:8080",
            "stages": [ { "duration_secs": 30, "target": 10 } ]
        }
    }"#;

    let config = TrackerConfig::from_json_str(json).unwrap();
    assert_eq!(config.audit_capacity, 32);
    assert_eq!(config.runner.interval_secs, 30);
    assert!(config.runner.run_immediately);
    assert_eq!(config.load.resource, "movie");
    assert_eq!(config.load.stages.len(), 1);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(TrackerConfig::from_json_str(r#"{ "audit_capacity": 0 }"#).is_err());
    assert!(TrackerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_lookup() {
    let vars: HashMap<&str, &str> = [
        ("TRACKER_AUDIT_CAPACITY", "16"),
        ("TRACKER_PRODUCER", "producer.com:9090"),
        ("TRACKER_RUNNER_INTERVAL_SECS", "5"),
        ("TRACKER_LOAD_ENDPOINT", "127.0.0.1:8080"),
    ]
    .into_iter()
    .collect();

    let config = TrackerConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string())).unwrap();
    assert_eq!(config.audit_capacity, 16);
    assert_eq!(
        config.producer,
        Some(EndpointConfig {
            host: "producer.com".into(),
            port: 9090
        })
    );
    assert_eq!(config.runner.interval_secs, 5);
    assert_eq!(config.load.endpoint, "127.0.0.1:8080");
}

#[test]
fn test_config_from_lookup_rejects_bad_values() {
    let bad_port = TrackerConfig::from_lookup(|k| {
        (k == "TRACKER_PRODUCER").then(|| "producer.com:http".to_string())
    });
    assert!(bad_port.is_err());

    let bad_capacity = TrackerConfig::from_lookup(|k| {
        (k == "TRACKER_AUDIT_CAPACITY").then(|| "lots".to_string())
    });
    assert!(bad_capacity.is_err());

    let huge_interval = TrackerConfig::from_lookup(|k| {
        (k == "TRACKER_RUNNER_INTERVAL_SECS").then(|| u64::MAX.to_string())
    });
    assert!(huge_interval.unwrap_err().contains("interval_secs"));

    let huge_stage = TrackerConfig::from_json_str(
        r#"{ "load": { "stages": [
            { "duration_secs": 18446744073709551615, "target": 1 },
            { "duration_secs": 1, "target": 0 }
        ] } }"#,
    );
    assert!(huge_stage.is_err());
}
