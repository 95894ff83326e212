use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use thiserror::Error;

use crate::aspects::{Body, DEFAULT_ORB};

/// Orbs at or above half the narrowest gap between aspect angles (15°) would
/// let neighbouring aspects overlap.
pub const MAX_ORB: f64 = 7.5;

/// Indian Standard Time, +05:30.
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid orb {orb}: must be finite and within [0, {max})")]
    InvalidOrb { orb: f64, max: f64 },
    #[error("Invalid scan window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveTime, end: NaiveTime },
    #[error("Invalid step of {seconds}s: must be positive and at most one day")]
    InvalidStep { seconds: i64 },
    #[error("No bodies selected for scanning")]
    EmptyBodies,
}

/// Immutable parameters of one scan.
///
/// Built once (usually by the config loader) and handed to the driver, which
/// never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Tolerance around each exact aspect angle, in degrees
    pub orb: f64,
    /// Bodies paired with the Moon. Scanned in table order regardless of
    /// the order given here.
    pub bodies: Vec<Body>,
    /// Local time of the first sample
    pub window_start: NaiveTime,
    /// Local time of the last sample (inclusive)
    pub window_end: NaiveTime,
    pub step: Duration,
    /// Offset of local time from UTC
    pub utc_offset: FixedOffset,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            orb: DEFAULT_ORB,
            bodies: Body::ALL.to_vec(),
            window_start: NaiveTime::from_hms_opt(9, 15, 0).expect("09:15 is a valid time"),
            window_end: NaiveTime::from_hms_opt(15, 30, 0).expect("15:30 is a valid time"),
            step: Duration::minutes(1),
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).expect("+05:30 is a valid offset"),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.orb.is_finite() || self.orb < 0.0 || self.orb >= MAX_ORB {
            return Err(ConfigError::InvalidOrb {
                orb: self.orb,
                max: MAX_ORB,
            });
        }
        if self.window_start > self.window_end {
            return Err(ConfigError::InvalidWindow {
                start: self.window_start,
                end: self.window_end,
            });
        }
        if self.step <= Duration::zero() || self.step > Duration::days(1) {
            return Err(ConfigError::InvalidStep {
                seconds: self.step.num_seconds(),
            });
        }
        if self.bodies.is_empty() {
            return Err(ConfigError::EmptyBodies);
        }
        Ok(())
    }

    /// Selected bodies in table order, without duplicates.
    pub fn tracked_bodies(&self) -> Vec<Body> {
        Body::ALL
            .iter()
            .copied()
            .filter(|body| self.bodies.contains(body))
            .collect()
    }

    /// First and last local sample times for `date`.
    pub fn window(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (date.and_time(self.window_start), date.and_time(self.window_end))
    }

    /// Convert a local wall-clock time to UTC using the fixed offset.
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let naive_utc = local - Duration::seconds(i64::from(self.utc_offset.local_minus_utc()));
        Utc.from_utc_datetime(&naive_utc)
    }

    /// Local sample times for `date`, from window start to window end inclusive.
    pub fn sample_times(&self, date: NaiveDate) -> impl Iterator<Item = NaiveDateTime> {
        let (start, end) = self.window(date);
        let step = self.step;
        std::iter::successors(Some(start), move |t| t.checked_add_signed(step))
            .take_while(move |t| *t <= end)
    }
}
