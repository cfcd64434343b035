//! Builders to construct console sessions from configuration.

use crate::config::TrackerConfig;
use crate::core::{ConsoleSession, Endpoint, InMemoryAuditSink, TrackerError};

/// Build a session from validated configuration, seeding the producer if
/// one is configured.
///
/// # Errors
///
/// Returns [`TrackerError::Config`] if the configuration fails validation.
pub fn build_session(cfg: &TrackerConfig) -> Result<ConsoleSession, TrackerError> {
    SessionBuilder::from_config(cfg)?.build()
}

/// Step-by-step session construction.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    audit_capacity: usize,
    producer: Option<Endpoint>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// Builder with the default audit capacity and no producer.
    pub const fn new() -> Self {
        Self {
            audit_capacity: crate::core::DEFAULT_AUDIT_CAPACITY,
            producer: None,
        }
    }

    /// Builder seeded from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Config`] if the configuration fails validation.
    pub fn from_config(cfg: &TrackerConfig) -> Result<Self, TrackerError> {
        cfg.validate()
            .map_err(|e| TrackerError::Config(format!("config invalid: {e}")))?;
        let producer = cfg
            .producer
            .as_ref()
            .map(crate::config::EndpointConfig::to_endpoint)
            .transpose()?;
        Ok(Self {
            audit_capacity: cfg.audit_capacity,
            producer,
        })
    }

    /// Set how many audit events the session keeps.
    #[must_use]
    pub fn audit_capacity(mut self, capacity: usize) -> Self {
        self.audit_capacity = capacity;
        self
    }

    /// Seed the producer.
    #[must_use]
    pub fn producer(mut self, node: Endpoint) -> Self {
        self.producer = Some(node);
        self
    }

    /// Configured audit capacity.
    pub const fn configured_audit_capacity(&self) -> usize {
        self.audit_capacity
    }

    /// Finish building.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Config`] if the audit capacity is zero.
    pub fn build(self) -> Result<ConsoleSession, TrackerError> {
        if self.audit_capacity == 0 {
            return Err(TrackerError::Config(
                "audit_capacity must be greater than 0".into(),
            ));
        }
        let session = ConsoleSession::with_sink(InMemoryAuditSink::new(self.audit_capacity));
        tracing::debug!(
            audit_capacity = self.audit_capacity,
            producer = ?self.producer.as_ref().map(Endpoint::address),
            "session built"
        );
        Ok(match self.producer {
            Some(node) => session.with_producer(node),
            None => session,
        })
    }
}
