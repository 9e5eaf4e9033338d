//! Validated query value objects shared by both VO protocols.
//!
//! These are built once per request by [`crate::parsing`] and never mutated
//! afterwards. Downstream code reads typed fields instead of probing a map of
//! raw strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::ModifiedJulianDate;

/// Cone radius used when `POS` carries only `RA,DEC`.
pub const DEFAULT_SEARCH_RADIUS_DEG: f64 = 0.197;

/// Length of the default `TIME` window.
pub const DEFAULT_WINDOW_DAYS: f64 = 7.0;

/// Position on the sky, optionally with a cone-search radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    pub ra: qtty::Degrees,
    pub dec: qtty::Degrees,
    pub radius: qtty::Degrees,
}

impl SkyPosition {
    /// Position with the default search radius.
    pub fn new(ra: f64, dec: f64) -> Self {
        Self::with_radius(ra, dec, DEFAULT_SEARCH_RADIUS_DEG)
    }

    pub fn with_radius(ra: f64, dec: f64, radius: f64) -> Self {
        Self {
            ra: qtty::Degrees::new(ra),
            dec: qtty::Degrees::new(dec),
            radius: qtty::Degrees::new(radius),
        }
    }

    pub fn ra_deg(&self) -> f64 {
        self.ra.value()
    }

    pub fn dec_deg(&self) -> f64 {
        self.dec.value()
    }

    pub fn radius_deg(&self) -> f64 {
        self.radius.value()
    }
}

/// Time window of a query, bounds in MJD.
///
/// Bounds are stored as given; `t_min <= t_max` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub t_min: ModifiedJulianDate,
    pub t_max: ModifiedJulianDate,
}

impl TimeRange {
    pub fn new(t_min: impl Into<ModifiedJulianDate>, t_max: impl Into<ModifiedJulianDate>) -> Self {
        Self {
            t_min: t_min.into(),
            t_max: t_max.into(),
        }
    }

    /// The default window: `[start, start + 7 days]`.
    pub fn default_from(start: ModifiedJulianDate) -> Self {
        Self {
            t_min: start,
            t_max: start.plus_days(DEFAULT_WINDOW_DAYS),
        }
    }

    /// Both bounds as calendar instants, if they have one.
    pub fn datetimes(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.t_min.to_datetime()?, self.t_max.to_datetime()?))
    }
}

/// Every input of a VO query after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameters {
    position: SkyPosition,
    time: TimeRange,
    min_obs: qtty::Seconds,
    max_rec: Option<u64>,
    upload: Option<String>,
}

impl QueryParameters {
    pub fn new(position: SkyPosition, time: TimeRange) -> Self {
        Self {
            position,
            time,
            min_obs: qtty::Seconds::new(0.0),
            max_rec: None,
            upload: None,
        }
    }

    /// Minimum observable duration, in seconds.
    pub fn with_min_obs(mut self, seconds: f64) -> Self {
        self.min_obs = qtty::Seconds::new(seconds);
        self
    }

    pub fn with_max_rec(mut self, max_rec: Option<u64>) -> Self {
        self.max_rec = max_rec;
        self
    }

    /// Opaque `UPLOAD` value. Echoed, never interpreted.
    pub fn with_upload(mut self, upload: Option<String>) -> Self {
        self.upload = upload;
        self
    }

    pub fn position(&self) -> &SkyPosition {
        &self.position
    }

    pub fn time(&self) -> &TimeRange {
        &self.time
    }

    pub fn min_obs(&self) -> qtty::Seconds {
        self.min_obs
    }

    pub fn max_rec(&self) -> Option<u64> {
        self.max_rec
    }

    pub fn upload(&self) -> Option<&str> {
        self.upload.as_deref()
    }

    /// `MAXREC=0` asks for metadata only; the engine must not run.
    pub fn is_metadata_only(&self) -> bool {
        self.max_rec == Some(0)
    }
}
