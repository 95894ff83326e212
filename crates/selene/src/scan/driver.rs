use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aspects::{shadow_point, AspectCalculator, AspectHit, AspectKey, Body};
use crate::ephemeris::{EphemerisError, Planet, PositionProvider};
use crate::scan::config::{ConfigError, ScanConfig};
use crate::tracker::{IntervalTracker, ReportedInterval};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything observed at one sample time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinuteSnapshot {
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
    pub moon: f64,
    /// Aspects in orb at this sample, in body table order
    pub hits: Vec<AspectHit>,
}

impl MinuteSnapshot {
    pub fn active_keys(&self) -> impl Iterator<Item = AspectKey> + '_ {
        self.hits.iter().map(AspectHit::key)
    }
}

/// Result of scanning one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub date: NaiveDate,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub orb: f64,
    pub intervals: Vec<ReportedInterval>,
}

/// Samples the Moon against the configured bodies over one day's window.
pub struct ScanDriver<P> {
    config: ScanConfig,
    bodies: Vec<Body>,
    calculator: AspectCalculator,
    provider: P,
}

impl<P: PositionProvider> ScanDriver<P> {
    pub fn new(config: ScanConfig, provider: P) -> Result<Self, ScanError> {
        config.validate()?;
        let bodies = config.tracked_bodies();
        let calculator = AspectCalculator::new(config.orb);
        Ok(Self {
            config,
            bodies,
            calculator,
            provider,
        })
    }

    /// Query positions at one local time and classify every pairing.
    pub fn sample(&self, local: NaiveDateTime) -> Result<MinuteSnapshot, ScanError> {
        let utc = self.config.to_utc(local);
        let moon = self.provider.longitude(utc, Planet::Moon)?;

        // Rahu's longitude feeds Ketu as well, so it is fetched at most once.
        let mut node: Option<f64> = None;
        let mut hits = Vec::new();
        for &body in &self.bodies {
            let lon = match body.source() {
                Some(Planet::MeanNode) => node_longitude(&mut node, &self.provider, utc)?,
                Some(planet) => self.provider.longitude(utc, planet)?,
                None => shadow_point(node_longitude(&mut node, &self.provider, utc)?),
            };
            if let Some(hit) = self.calculator.measure(body, moon, lon) {
                hits.push(hit);
            }
        }

        Ok(MinuteSnapshot {
            local,
            utc,
            moon,
            hits,
        })
    }

    /// Every sample of the window, including those without hits.
    pub fn snapshots(&self, date: NaiveDate) -> Result<Vec<MinuteSnapshot>, ScanError> {
        self.config
            .sample_times(date)
            .map(|local| self.sample(local))
            .collect()
    }

    /// Scan `date` and return the aspect intervals.
    ///
    /// Any provider failure aborts the whole scan.
    pub fn run(&self, date: NaiveDate) -> Result<ScanReport, ScanError> {
        let (window_start, window_end) = self.config.window(date);
        log::info!(
            "Scanning {} from {} to {} (orb {}°, {} bodies)",
            date,
            window_start.time(),
            window_end.time(),
            self.config.orb,
            self.bodies.len()
        );

        let mut tracker = IntervalTracker::new();
        let mut samples = 0usize;
        for local in self.config.sample_times(date) {
            let snapshot = self.sample(local)?;
            tracker.observe(local, snapshot.active_keys());
            samples += 1;
        }
        let intervals = tracker.finalize(window_end);

        log::info!(
            "Scan of {} finished: {} samples, {} intervals",
            date,
            samples,
            intervals.len()
        );

        Ok(ScanReport {
            date,
            window_start,
            window_end,
            orb: self.config.orb,
            intervals,
        })
    }
}

fn node_longitude<P: PositionProvider>(
    cache: &mut Option<f64>,
    provider: &P,
    utc: DateTime<Utc>,
) -> Result<f64, EphemerisError> {
    match *cache {
        Some(lon) => Ok(lon),
        None => {
            let lon = provider.longitude(utc, Planet::MeanNode)?;
            *cache = Some(lon);
            Ok(lon)
        }
    }
}
