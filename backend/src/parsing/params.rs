//! Query-string parameter parsing and validation.
//!
//! Each parser takes the raw string exactly as it arrived (or `None` when the
//! key was absent) and either returns a typed value or a [`ValidationError`]
//! naming the offending input and the format that was expected.

use crate::error::ValidationError;
use crate::models::{ModifiedJulianDate, QueryParameters, SkyPosition, TimeRange};

pub const POS_FORMAT: &str = "'RA,DEC' or 'RA,DEC,RADIUS' (e.g., '34,-23.3')";
pub const TIME_FORMAT: &str = "'T_MIN/T_MAX' (e.g., '59000/59001')";
pub const MIN_OBS_FORMAT: &str = "a number of seconds";
pub const MAXREC_FORMAT: &str = "a non-negative integer";

/// Raw VO query parameters, keys already case-normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuery {
    pub pos: Option<String>,
    pub time: Option<String>,
    pub min_obs: Option<String>,
    pub maxrec: Option<String>,
    pub upload: Option<String>,
}

impl RawQuery {
    /// Build from decoded query pairs, matching keys case-insensitively.
    ///
    /// When a key repeats, the first occurrence wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = RawQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_ref().to_ascii_uppercase().as_str() {
                "POS" => &mut raw.pos,
                "TIME" => &mut raw.time,
                "MIN_OBS" => &mut raw.min_obs,
                "MAXREC" => &mut raw.maxrec,
                "UPLOAD" => &mut raw.upload,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        raw
    }
}

/// Parse `RA,DEC` or `RA,DEC,RADIUS` (degrees).
pub fn parse_position(raw: &str) -> Result<SkyPosition, ValidationError> {
    let invalid = || ValidationError::new("POS", raw, POS_FORMAT);

    let parts = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(invalid)?;

    match parts.as_slice() {
        [ra, dec] => Ok(SkyPosition::new(*ra, *dec)),
        [ra, dec, radius] => Ok(SkyPosition::with_radius(*ra, *dec, *radius)),
        _ => Err(invalid()),
    }
}

/// Parse `T_MIN/T_MAX` (MJD) relative to the current time.
pub fn parse_time_range(raw: Option<&str>) -> Result<TimeRange, ValidationError> {
    parse_time_range_at(raw, ModifiedJulianDate::now())
}

/// Parse `T_MIN/T_MAX` with an explicit "now".
///
/// Absent input yields `[now, now + 7d]`. An empty `T_MIN` means `now`; an
/// empty `T_MAX` means seven days after `T_MIN`. Non-finite bounds and
/// bounds outside the calendar range are rejected.
pub fn parse_time_range_at(
    raw: Option<&str>,
    now: ModifiedJulianDate,
) -> Result<TimeRange, ValidationError> {
    let Some(raw) = raw else {
        return Ok(TimeRange::default_from(now));
    };
    let invalid = || ValidationError::new("TIME", raw, TIME_FORMAT);

    let (min_part, max_part) = raw.split_once('/').ok_or_else(invalid)?;
    if max_part.contains('/') {
        return Err(invalid());
    }

    let t_min = match min_part.trim() {
        "" => now,
        s => ModifiedJulianDate::from(s.parse::<f64>().map_err(|_| invalid())?),
    };
    let t_max = match max_part.trim() {
        "" => TimeRange::default_from(t_min).t_max,
        s => ModifiedJulianDate::from(s.parse::<f64>().map_err(|_| invalid())?),
    };

    // Both bounds must name a calendar instant the engine can be asked about
    let range = TimeRange { t_min, t_max };
    match range.datetimes() {
        Some(_) => Ok(range),
        None => Err(invalid()),
    }
}

/// Parse `MIN_OBS` (seconds). Absent means 0; no range check.
pub fn parse_min_obs(raw: Option<&str>) -> Result<f64, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(s) => s
            .parse::<f64>()
            .map_err(|_| ValidationError::new("MIN_OBS", s, MIN_OBS_FORMAT)),
    }
}

/// Parse `MAXREC`. `None` means unlimited; `Some(0)` means metadata only.
pub fn parse_max_rec(raw: Option<&str>) -> Result<Option<u64>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ValidationError::new("MAXREC", s, MAXREC_FORMAT)),
    }
}

/// Validate a whole request into [`QueryParameters`].
pub fn parse_query(raw: &RawQuery) -> Result<QueryParameters, ValidationError> {
    parse_query_at(raw, ModifiedJulianDate::now())
}

pub fn parse_query_at(
    raw: &RawQuery,
    now: ModifiedJulianDate,
) -> Result<QueryParameters, ValidationError> {
    let pos = raw
        .pos
        .as_deref()
        .ok_or_else(|| ValidationError::missing("POS", POS_FORMAT))?;
    let position = parse_position(pos)?;
    let time = parse_time_range_at(raw.time.as_deref(), now)?;
    let min_obs = parse_min_obs(raw.min_obs.as_deref())?;
    let max_rec = parse_max_rec(raw.maxrec.as_deref())?;

    Ok(QueryParameters::new(position, time)
        .with_min_obs(min_obs)
        .with_max_rec(max_rec)
        .with_upload(raw.upload.clone()))
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod params_tests;
