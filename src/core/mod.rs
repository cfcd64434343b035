//! Endpoint records, the consumer registry, and the session that owns them.

pub mod audit;
pub mod endpoint;
pub mod error;
pub mod producer;
pub mod registry;
pub mod session;

pub use audit::{build_tracking_event, AuditSink, InMemoryAuditSink, TrackingAction, TrackingEvent};
pub use endpoint::{Endpoint, DEFAULT_PORT};
pub use error::{AppResult, TrackerError};
pub use producer::ProducerSlot;
pub use registry::EndpointRegistry;
pub use session::{ConsoleSession, DEFAULT_AUDIT_CAPACITY};
