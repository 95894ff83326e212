//! Selene: intraday lunar aspect scanner.
//!
//! Samples the Moon against a fixed table of bodies once per minute over a
//! trading-day window and reports the intervals during which each
//! `(body, aspect)` pair stayed within orb.

pub mod aspects;
pub mod ephemeris;
pub mod report;
pub mod scan;
pub mod tracker;

pub use aspects::{AspectCalculator, AspectHit, AspectKey, AspectKind, Body};
pub use ephemeris::{Ayanamsa, EphemerisError, Planet, PositionProvider, ReplayProvider};
pub use scan::{ConfigError, MinuteSnapshot, ScanConfig, ScanDriver, ScanError, ScanReport};
pub use tracker::{IntervalTracker, ReportedInterval};

#[cfg(feature = "swiss-ephemeris")]
pub use ephemeris::SwissEphemerisAdapter;
