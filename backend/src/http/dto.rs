//! Data Transfer Objects for the HTTP API.
//!
//! VO endpoints answer with XML; only the operational endpoints use JSON.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Name of the configured engine
    pub engine: String,
}
