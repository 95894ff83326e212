#[cfg(feature = "swiss-ephemeris")]
pub mod adapter;
pub mod error;
pub mod provider;
pub mod replay;
pub mod sidereal;
pub mod types;

#[cfg(feature = "swiss-ephemeris")]
pub use adapter::SwissEphemerisAdapter;
pub use error::EphemerisError;
pub use provider::PositionProvider;
pub use replay::{ReplayFile, ReplayProvider, ReplaySample};
pub use sidereal::{ayanamsa_deg, julian_day_ut, to_sidereal, J2000_JD};
pub use types::{Ayanamsa, Planet};
