//! In-memory engine for local development and tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ObservatoryEngine, PlanRequest, RawPlanEntry, RawVisibilityEntry, VisibilityRequest};
use crate::error::{EngineError, EngineResult};

/// Engine returning a fixed set of entries for every request.
///
/// Each call is counted so tests can assert whether the engine ran at all.
#[derive(Debug, Default)]
pub struct StaticEngine {
    windows: Vec<RawVisibilityEntry>,
    plans: Vec<RawPlanEntry>,
    failure: Option<String>,
    visibility_calls: AtomicUsize,
    plan_calls: AtomicUsize,
}

impl StaticEngine {
    /// An engine with no windows and no planned observations.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_windows(mut self, windows: Vec<RawVisibilityEntry>) -> Self {
        self.windows = windows;
        self
    }

    pub fn with_plans(mut self, plans: Vec<RawPlanEntry>) -> Self {
        self.plans = plans;
        self
    }

    /// Make every call fail with [`EngineError::Unavailable`].
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn visibility_calls(&self) -> usize {
        self.visibility_calls.load(Ordering::SeqCst)
    }

    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> EngineResult<()> {
        match &self.failure {
            Some(message) => Err(EngineError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObservatoryEngine for StaticEngine {
    fn name(&self) -> &str {
        "static"
    }

    async fn visibility(&self, _request: &VisibilityRequest) -> EngineResult<Vec<RawVisibilityEntry>> {
        self.visibility_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.windows.clone())
    }

    async fn planned_observations(&self, _request: &PlanRequest) -> EngineResult<Vec<RawPlanEntry>> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.plans.clone())
    }
}
