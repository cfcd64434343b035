//! Audit sink implementations.
//!
//! Every mutation a session performs is recorded as a [`TrackingEvent`]. The
//! in-memory sink keeps a bounded window of the most recent events.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::clock::now_ms;

/// Kind of mutation recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingAction {
    /// A consumer endpoint was appended to the registry.
    ConsumerTracked,
    /// The producer endpoint was set or replaced.
    ProducerConfigured,
}

impl fmt::Display for TrackingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConsumerTracked => f.write_str("consumer_tracked"),
            Self::ProducerConfigured => f.write_str("producer_configured"),
        }
    }
}

/// Audit event structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// Event identifier (uuid v4).
    pub event_id: String,
    /// Action taken.
    pub action: TrackingAction,
    /// Endpoint affected, in `host:port` form.
    pub endpoint: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: TrackingEvent);
}

/// Bounded in-memory audit sink.
#[derive(Debug)]
pub struct InMemoryAuditSink {
    events: VecDeque<TrackingEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink holding at most `max_events`.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(1024)),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events, oldest first.
    pub fn events(&self) -> Vec<TrackingEvent> {
        self.events.iter().cloned().collect()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no events are stored.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: TrackingEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            if let Some(dropped) = self.events.pop_front() {
                tracing::warn!(event_id = %dropped.event_id, "audit buffer full, dropping oldest event");
            }
        }
        self.events.push_back(event);
    }
}

/// Helper to build an audit event stamped with a fresh id and the current time.
pub fn build_tracking_event(action: TrackingAction, endpoint: impl Into<String>) -> TrackingEvent {
    TrackingEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        action,
        endpoint: endpoint.into(),
        created_at_ms: now_ms(),
    }
}
