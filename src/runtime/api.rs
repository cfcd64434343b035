//! API-facing request/response models for the input and display surfaces.

use serde::{Deserialize, Serialize};

use crate::core::{AuditSink, ConsoleSession, Endpoint, TrackerError};

/// Form submission for tracking a consumer. The port is kept as typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConsumerRequest {
    /// Host name entered by the operator.
    pub host: String,
    /// Port as entered; validated on submit.
    pub port: String,
}

/// Form submission for the producer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerConfigRequest {
    /// Producer host name.
    pub host: String,
    /// Producer port as entered.
    pub port: String,
}

/// Render-ready view of one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointView {
    /// Host name.
    pub host: String,
    /// Port.
    pub port: u16,
    /// `host:port`.
    pub address: String,
    /// When the record was created (ms since epoch).
    pub tracked_at_ms: u128,
}

impl From<&Endpoint> for EndpointView {
    fn from(ep: &Endpoint) -> Self {
        Self {
            host: ep.host().to_owned(),
            port: ep.port(),
            address: ep.address(),
            tracked_at_ms: ep.tracked_at_ms(),
        }
    }
}

/// Consumer listing in registry order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerListing {
    /// Registry revision this listing was taken at.
    pub revision: u64,
    /// Tracked consumers, oldest first.
    pub consumers: Vec<EndpointView>,
}

/// Current producer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerView {
    /// Configured producer, if any.
    pub producer: Option<EndpointView>,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Track a consumer from a form submission.
///
/// # Errors
///
/// Propagates the validation error if host or port is rejected.
pub fn submit_track_consumer<S: AuditSink>(
    session: &mut ConsoleSession<S>,
    req: &TrackConsumerRequest,
) -> Result<EndpointView, TrackerError> {
    session
        .track_consumer(&req.host, &req.port)
        .map(EndpointView::from)
}

/// Apply a producer configuration form.
///
/// # Errors
///
/// Propagates the validation error if host or port is rejected.
pub fn submit_producer_config<S: AuditSink>(
    session: &mut ConsoleSession<S>,
    req: &ProducerConfigRequest,
) -> Result<ProducerView, TrackerError> {
    session.configure_producer(&req.host, &req.port)?;
    Ok(producer_view(session))
}

/// Build the consumer listing.
pub fn list_consumers<S: AuditSink>(session: &ConsoleSession<S>) -> ConsumerListing {
    let registry = session.consumers();
    ConsumerListing {
        revision: registry.revision(),
        consumers: registry.iter().map(EndpointView::from).collect(),
    }
}

/// Build the producer view.
pub fn producer_view<S: AuditSink>(session: &ConsoleSession<S>) -> ProducerView {
    ProducerView {
        producer: session.producer().map(EndpointView::from),
    }
}

/// Return a health payload.
pub const fn health() -> Health {
    Health { ok: true }
}
