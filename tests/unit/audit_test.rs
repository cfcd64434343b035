//! Tests for audit sink

use endpoint_tracker::core::{build_tracking_event, AuditSink, InMemoryAuditSink, TrackingAction};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_tracking_event(TrackingAction::ConsumerTracked, "consumer1.com:7070");
    sink.record(event.clone());
    assert_eq!(sink.len(), 1);

    let events = sink.events();
    assert_eq!(events[0].event_id, event.event_id);
    assert_eq!(events[0].action, TrackingAction::ConsumerTracked);
    assert_eq!(events[0].endpoint, "consumer1.com:7070");
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_tracking_event(TrackingAction::ConsumerTracked, "a:1"));
    sink.record(build_tracking_event(TrackingAction::ConsumerTracked, "b:2"));
    sink.record(build_tracking_event(TrackingAction::ProducerConfigured, "c:3"));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].endpoint, "b:2"); // First one popped
    assert_eq!(events[1].endpoint, "c:3");
}

#[test]
fn test_zero_capacity_sink_keeps_nothing() {
    let mut sink = InMemoryAuditSink::new(0);
    sink.record(build_tracking_event(TrackingAction::ConsumerTracked, "a:1"));
    assert!(sink.is_empty());
}

#[test]
fn test_build_tracking_event() {
    let a = build_tracking_event(TrackingAction::ProducerConfigured, "producer.com:7070");
    let b = build_tracking_event(TrackingAction::ProducerConfigured, "producer.com:7070");

    assert_eq!(a.action, TrackingAction::ProducerConfigured);
    assert_eq!(a.action.to_string(), "producer_configured");
    assert_ne!(a.event_id, b.event_id);
    assert!(a.created_at_ms > 0);
}

#[test]
fn test_event_serializes_action_snake_case() {
    let event = build_tracking_event(TrackingAction::ConsumerTracked, "a:1");
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["action"], "consumer_tracked");
    assert_eq!(json["endpoint"], "a:1");
}
