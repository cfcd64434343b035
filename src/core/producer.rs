//! Single-value slot for the configured producer endpoint.

use super::Endpoint;

/// Holds the producer endpoint consumers read from. Unlike the consumer
/// registry this is replace-only: at most one producer is configured.
#[derive(Debug, Clone, Default)]
pub struct ProducerSlot {
    node: Option<Endpoint>,
}

impl ProducerSlot {
    /// Empty slot.
    pub const fn new() -> Self {
        Self { node: None }
    }

    /// Slot pre-seeded with a producer.
    pub const fn with_node(node: Endpoint) -> Self {
        Self { node: Some(node) }
    }

    /// Replace the producer, returning the previous one.
    pub fn update(&mut self, node: Endpoint) -> Option<Endpoint> {
        self.node.replace(node)
    }

    /// Current producer, if configured.
    pub const fn current(&self) -> Option<&Endpoint> {
        self.node.as_ref()
    }

    /// True once a producer has been configured.
    pub const fn is_configured(&self) -> bool {
        self.node.is_some()
    }
}
