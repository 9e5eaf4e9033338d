use serde::*;

/// MJD of the Unix epoch (1970-01-01 00:00:00 UTC).
const UNIX_EPOCH_MJD: f64 = 40587.0;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Modified Julian Date representation.
/// MJD 0 = 1858-11-17 00:00:00 UTC
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ModifiedJulianDate(qtty::Days);

impl ModifiedJulianDate {
    /// Create a new MJD value.
    pub fn new<V: Into<qtty::Days>>(v: V) -> Self {
        Self(v.into())
    }

    /// Current wall-clock time as MJD.
    pub fn now() -> Self {
        Self::from_datetime(chrono::Utc::now())
    }

    /// Raw MJD value as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Shift forward by a number of days.
    pub fn plus_days(&self, days: f64) -> Self {
        Self::new(self.value() + days)
    }

    /// Convert to Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn to_unix_timestamp(&self) -> f64 {
        (self.value() - UNIX_EPOCH_MJD) * SECONDS_PER_DAY
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self::new(timestamp / SECONDS_PER_DAY + UNIX_EPOCH_MJD)
    }

    /// Convert to chrono DateTime<Utc>, the engine's native time type.
    ///
    /// `None` for non-finite values and instants outside chrono's range.
    pub fn to_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let secs = self.to_unix_timestamp();
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
            return None;
        }
        let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
        chrono::DateTime::from_timestamp(whole as i64, nanos)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }
}

impl From<f64> for ModifiedJulianDate {
    fn from(v: f64) -> Self {
        ModifiedJulianDate::new(qtty::Days::new(v))
    }
}

impl From<chrono::DateTime<chrono::Utc>> for ModifiedJulianDate {
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        ModifiedJulianDate::from_datetime(dt)
    }
}

/// Length of a span between two instants, in seconds.
pub fn span_seconds(start: ModifiedJulianDate, stop: ModifiedJulianDate) -> qtty::Seconds {
    qtty::Seconds::new((stop.value() - start.value()) * SECONDS_PER_DAY)
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
