//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Response of `GET /api/connections`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionsDto {
    pub count: usize,
    pub connections: Vec<ConnectionDetailDto>,
}

/// One live connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDetailDto {
    pub sid: String,
    /// RFC 3339, UTC
    pub connected_at: String,
}
