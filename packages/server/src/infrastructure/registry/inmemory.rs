//! In-memory connection registry.
//!
//! A single `tokio::sync::Mutex` serializes every mutation and snapshot read.
//! Snapshots are copies, so callers iterate them without holding the lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, RegistryError};

/// In-memory registry of live connections
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_connect_time(mut connections: Vec<Connection>) -> Vec<Connection> {
    connections.sort_by(|a, b| {
        a.connected_at
            .cmp(&b.connected_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    connections
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn add(&self, connection: Connection) -> Result<(), RegistryError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&connection.id) {
            return Err(RegistryError::DuplicateConnection(connection.id));
        }
        connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    async fn remove(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        connections.remove(id).is_some()
    }

    async fn size(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }

    async fn members(&self) -> Vec<ConnectionId> {
        self.connections()
            .await
            .into_iter()
            .map(|connection| connection.id)
            .collect()
    }

    async fn connections(&self) -> Vec<Connection> {
        let snapshot: Vec<Connection> = {
            let connections = self.connections.lock().await;
            connections.values().cloned().collect()
        };
        sorted_by_connect_time(snapshot)
    }
}
