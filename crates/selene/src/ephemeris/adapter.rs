use chrono::{DateTime, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::calc_ut;

use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::sidereal::{julian_day_ut, to_sidereal};
use crate::ephemeris::types::{Ayanamsa, Planet};

/// FLG_SWIEPH: use the Swiss Ephemeris data files
const FLG_SWIEPH: u32 = 2;

/// Environment variable the Swiss Ephemeris library reads its data path from.
const SE_EPHE_PATH: &str = "SE_EPHE_PATH";

/// Sidereal position provider backed by the Swiss Ephemeris.
///
/// Tropical longitudes from the library are shifted by the configured
/// ayanamsa, which is fixed for the lifetime of the adapter.
pub struct SwissEphemerisAdapter {
    ayanamsa: Ayanamsa,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<PathBuf>, ayanamsa: Ayanamsa) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        // The library resolves its data directory lazily on first use.
        if env::var_os(SE_EPHE_PATH).is_none() {
            env::set_var(SE_EPHE_PATH, &path);
        }
        log::info!(
            "Swiss Ephemeris ready (path={}, ayanamsa={:?})",
            path.display(),
            ayanamsa
        );

        Ok(Self { ayanamsa })
    }

    /// Tropical longitude straight from the library.
    fn tropical_longitude(&self, jd: f64, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
        let result = calc_ut(jd, planet.swe_code() as u32, FLG_SWIEPH).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet,
                datetime: moment,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;
        Ok(result.out[0])
    }
}

impl PositionProvider for SwissEphemerisAdapter {
    fn longitude(&self, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
        let jd = julian_day_ut(moment);
        let tropical = self.tropical_longitude(jd, moment, planet)?;
        Ok(to_sidereal(tropical, self.ayanamsa, jd))
    }
}
