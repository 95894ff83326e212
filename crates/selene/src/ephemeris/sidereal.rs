//! Tropical to sidereal conversion.
//!
//! The ayanamsa at an epoch is the system's J2000.0 reference value plus the
//! IAU 2006 general precession in longitude accumulated since J2000.0.

use chrono::{DateTime, Utc};

use crate::aspects::normalize_degrees;
use crate::ephemeris::types::Ayanamsa;

/// Julian Day of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Day (UT) for a UTC instant.
pub fn julian_day_ut(moment: DateTime<Utc>) -> f64 {
    let seconds = moment.timestamp() as f64 + f64::from(moment.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// IAU 2006 general precession in ecliptic longitude, arcseconds.
fn general_precession_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// Mean ayanamsa in degrees at the given Julian Day.
///
/// UT is used in place of TT; the ~70 s difference moves the result by far
/// less than an arcsecond.
pub fn ayanamsa_deg(ayanamsa: Ayanamsa, jd: f64) -> f64 {
    let t = (jd - J2000_JD) / DAYS_PER_CENTURY;
    ayanamsa.reference_j2000_deg() + general_precession_arcsec(t) / 3600.0
}

/// Shift a tropical longitude into the sidereal zodiac.
pub fn to_sidereal(tropical_lon: f64, ayanamsa: Ayanamsa, jd: f64) -> f64 {
    normalize_degrees(tropical_lon - ayanamsa_deg(ayanamsa, jd))
}
