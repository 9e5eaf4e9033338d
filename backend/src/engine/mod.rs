//! Boundary to the external visibility / planning engine.
//!
//! The engine is an opaque remote computation. This module defines the
//! request and raw-record shapes exchanged with it and the
//! [`ObservatoryEngine`] trait the query orchestrator is written against:
//!
//! - `swift_api`: HTTP client for the Swift observatory API
//! - `local`: in-memory engine for local development and tests
//! - `factory`: builds the configured engine
//!
//! Raw records keep every attribute the engine may omit as an `Option`; the
//! orchestrator resolves those once, before anything is serialized.

pub mod factory;
pub mod local;
pub mod swift_api;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

pub use factory::{EngineFactory, EngineKind};
pub use local::StaticEngine;
pub use swift_api::SwiftApiEngine;

/// Visibility computation for a fixed target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityRequest {
    pub ra: f64,
    pub dec: f64,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Cone search over the planned timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRequest {
    pub ra: f64,
    pub dec: f64,
    pub radius: f64,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One visibility window as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVisibilityEntry {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Window length in seconds, when the engine reports it.
    #[serde(default)]
    pub length: Option<f64>,
}

impl RawVisibilityEntry {
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            begin,
            end,
            length: None,
        }
    }

    /// Duration in seconds, preferring the engine's own figure.
    pub fn duration_seconds(&self) -> f64 {
        self.length.unwrap_or_else(|| {
            (self.end - self.begin)
                .num_microseconds()
                .map(|us| us as f64 / 1e6)
                .unwrap_or(f64::INFINITY)
        })
    }
}

/// One planned pointing as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlanEntry {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub ra: Option<f64>,
    #[serde(default)]
    pub dec: Option<f64>,
    #[serde(default, alias = "targname")]
    pub target_name: Option<String>,
    #[serde(default, alias = "obsnum", deserialize_with = "obs_id_string")]
    pub obs_id: Option<String>,
}

impl RawPlanEntry {
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            begin,
            end,
            ra: None,
            dec: None,
            target_name: None,
            obs_id: None,
        }
    }
}

/// Observation numbers arrive either as strings or as bare integers.
fn obs_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// The external visibility / planning computation.
///
/// Implementations must be `Send + Sync`; calls are issued from spawned
/// tasks and may run concurrently for different requests.
#[async_trait]
pub trait ObservatoryEngine: Send + Sync {
    /// Short name for logs and the health endpoint.
    fn name(&self) -> &str;

    /// Windows in which the target is observable.
    async fn visibility(&self, request: &VisibilityRequest) -> EngineResult<Vec<RawVisibilityEntry>>;

    /// Planned pointings inside the requested cone.
    async fn planned_observations(&self, request: &PlanRequest) -> EngineResult<Vec<RawPlanEntry>>;
}
