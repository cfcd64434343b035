//! Console session: the owner of all tracking state for one operator session.
//!
//! A session is built explicitly and handed to the input and display
//! surfaces by reference. Input goes through `&mut self`, reads through
//! `&self`; there is no shared or global state.

use super::audit::{build_tracking_event, AuditSink, InMemoryAuditSink, TrackingAction, TrackingEvent};
use super::{Endpoint, EndpointRegistry, ProducerSlot, TrackerError};

/// Default number of audit events retained by [`ConsoleSession::new`].
pub const DEFAULT_AUDIT_CAPACITY: usize = 256;

/// Tracking state for a single session.
#[derive(Debug)]
pub struct ConsoleSession<S = InMemoryAuditSink> {
    consumers: EndpointRegistry,
    producer: ProducerSlot,
    audit: S,
}

impl ConsoleSession<InMemoryAuditSink> {
    /// New session with an empty registry, no producer, and an in-memory
    /// audit log of `audit_capacity` events.
    pub fn new(audit_capacity: usize) -> Self {
        Self::with_sink(InMemoryAuditSink::new(audit_capacity))
    }

    /// Snapshot of the audit log, oldest first.
    pub fn audit_events(&self) -> Vec<TrackingEvent> {
        self.audit.events()
    }
}

impl Default for ConsoleSession<InMemoryAuditSink> {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIT_CAPACITY)
    }
}

impl<S: AuditSink> ConsoleSession<S> {
    /// New session recording into a caller-supplied sink.
    pub const fn with_sink(audit: S) -> Self {
        Self {
            consumers: EndpointRegistry::new(),
            producer: ProducerSlot::new(),
            audit,
        }
    }

    /// Seed the producer without recording an audit event. Used when the
    /// producer comes from startup configuration rather than operator input.
    #[must_use]
    pub fn with_producer(mut self, node: Endpoint) -> Self {
        self.producer = ProducerSlot::with_node(node);
        self
    }

    /// Validate form input and append it to the consumer registry.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidHost`] or [`TrackerError::InvalidPort`]
    /// when the input does not form a valid endpoint; the registry is left
    /// unchanged in that case.
    pub fn track_consumer(&mut self, host: &str, port: &str) -> Result<&Endpoint, TrackerError> {
        let record = Endpoint::parse(host, port).inspect_err(|e| {
            tracing::warn!(host, port, error = %e, "rejected consumer input");
        })?;
        Ok(self.track(record))
    }

    /// Append an already-built record to the consumer registry.
    pub fn track(&mut self, record: Endpoint) -> &Endpoint {
        tracing::info!(endpoint = %record, "consumer tracked");
        self.audit
            .record(build_tracking_event(TrackingAction::ConsumerTracked, record.address()));
        self.consumers.append(record);
        // Just appended, so the registry is non-empty.
        &self.consumers.all()[self.consumers.len() - 1]
    }

    /// Read-only view of tracked consumers.
    pub const fn consumers(&self) -> &EndpointRegistry {
        &self.consumers
    }

    /// Validate form input and make it the current producer.
    ///
    /// Returns the producer that was replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidHost`] or [`TrackerError::InvalidPort`]
    /// for invalid input; the current producer is kept in that case.
    pub fn configure_producer(
        &mut self,
        host: &str,
        port: &str,
    ) -> Result<Option<Endpoint>, TrackerError> {
        let node = Endpoint::parse(host, port).inspect_err(|e| {
            tracing::warn!(host, port, error = %e, "rejected producer input");
        })?;
        tracing::info!(endpoint = %node, "producer configured");
        self.audit
            .record(build_tracking_event(TrackingAction::ProducerConfigured, node.address()));
        Ok(self.producer.update(node))
    }

    /// Current producer, if configured.
    pub const fn producer(&self) -> Option<&Endpoint> {
        self.producer.current()
    }

    /// Audit sink backing this session.
    pub const fn audit(&self) -> &S {
        &self.audit
    }
}
