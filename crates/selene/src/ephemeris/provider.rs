use chrono::{DateTime, Utc};

use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::types::Planet;

/// Source of sidereal ecliptic longitudes.
///
/// Implementations fix their reference frame (zodiac, ayanamsa) when they
/// are constructed; every call returns degrees in [0, 360).
pub trait PositionProvider {
    fn longitude(&self, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError>;
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn longitude(&self, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
        (**self).longitude(moment, planet)
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for Box<P> {
    fn longitude(&self, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
        (**self).longitude(moment, planet)
    }
}
