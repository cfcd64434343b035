//! Append-only registry of tracked endpoints.

use super::Endpoint;

/// Ordered, append-only collection of endpoint records for one session.
///
/// Records keep their insertion order and duplicates are allowed. Nothing is
/// ever removed; the registry lives as long as the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    entries: Vec<Endpoint>,
    revision: u64,
}

impl EndpointRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            revision: 0,
        }
    }

    /// Append a record at the tail.
    pub fn append(&mut self, record: Endpoint) {
        tracing::debug!(endpoint = %record, position = self.entries.len(), "registry append");
        self.entries.push(record);
        self.revision += 1;
    }

    /// All records, oldest first.
    pub fn all(&self) -> &[Endpoint] {
        &self.entries
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.entries.iter()
    }

    /// Most recently appended record.
    pub fn last(&self) -> Option<&Endpoint> {
        self.entries.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Change counter, bumped by every append. Readers compare it against the
    /// value they last rendered to decide whether to re-read.
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

impl<'a> IntoIterator for &'a EndpointRegistry {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
