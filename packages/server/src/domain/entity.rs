//! Entities.

use super::value_object::{ConnectionId, Timestamp};

/// One live client link tracked by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    /// Informational only; never used for ordering guarantees.
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self { id, connected_at }
    }
}
