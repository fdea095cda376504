//! Connection registry trait.
//!
//! The dispatcher depends on this trait; the infrastructure layer provides
//! the concrete in-memory implementation.

use async_trait::async_trait;

use super::{entity::Connection, error::RegistryError, value_object::ConnectionId};

/// Set of live connections.
///
/// Implementations must serialize every mutation and snapshot read against
/// each other, and must never hold their lock across an await point that
/// leaves the registry (no delivery happens under the lock).
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Insert a connection as live.
    ///
    /// # Errors
    ///
    /// `RegistryError::DuplicateConnection` if the id is already live. The
    /// existing entry is left untouched.
    async fn add(&self, connection: Connection) -> Result<(), RegistryError>;

    /// Remove a connection. Returns `true` if it was live, `false` if absent.
    async fn remove(&self, id: &ConnectionId) -> bool;

    /// Number of live connections.
    async fn size(&self) -> usize;

    /// Snapshot of live ids, ordered by connect time.
    async fn members(&self) -> Vec<ConnectionId>;

    /// Snapshot of live connections with their metadata, ordered by connect time.
    async fn connections(&self) -> Vec<Connection>;
}
