//! Application state for the HTTP server.

use std::sync::Arc;

use crate::engine::ObservatoryEngine;
use crate::services::{ObjObsSap, ObsLocTap, QueryOrchestrator};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Engine behind both protocols
    pub engine: Arc<dyn ObservatoryEngine>,
    pub objobssap: QueryOrchestrator<ObjObsSap>,
    pub obsloctap: QueryOrchestrator<ObsLocTap>,
    /// Scheme, host and prefix echoed in `REQUEST` and VOSI access URLs
    pub public_base_url: Arc<str>,
}

impl AppState {
    /// Create a new application state around the given engine.
    pub fn new(engine: Arc<dyn ObservatoryEngine>, public_base_url: impl AsRef<str>) -> Self {
        Self {
            objobssap: QueryOrchestrator::new(ObjObsSap, Arc::clone(&engine)),
            obsloctap: QueryOrchestrator::new(ObsLocTap, Arc::clone(&engine)),
            engine,
            public_base_url: Arc::from(public_base_url.as_ref().trim_end_matches('/')),
        }
    }
}
