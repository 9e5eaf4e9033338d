//! Result rows produced by the query orchestrator.

use serde::{Deserialize, Serialize};

use super::time::{span_seconds, ModifiedJulianDate};

/// Target name used when the planning engine does not report one.
pub const UNKNOWN_TARGET: &str = "Unknown";

/// An interval during which the target is observable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityWindow {
    pub t_start: ModifiedJulianDate,
    pub t_stop: ModifiedJulianDate,
}

impl VisibilityWindow {
    pub fn new(t_start: impl Into<ModifiedJulianDate>, t_stop: impl Into<ModifiedJulianDate>) -> Self {
        Self {
            t_start: t_start.into(),
            t_stop: t_stop.into(),
        }
    }

    /// Observable duration, `(t_stop - t_start) * 86400`.
    pub fn observability(&self) -> qtty::Seconds {
        span_seconds(self.t_start, self.t_stop)
    }
}

/// A planned pointing with every optional engine attribute resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedObservation {
    pub obs_id: String,
    pub ra: qtty::Degrees,
    pub dec: qtty::Degrees,
    pub t_planning: ModifiedJulianDate,
    pub t_start: ModifiedJulianDate,
    pub t_stop: ModifiedJulianDate,
    pub target_name: String,
}

/// Identifier given to a planned observation the engine did not number.
pub fn synthetic_obs_id(index: usize) -> String {
    format!("obs_{}", index)
}
