use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ephemeris::types::Planet;

/// Errors that can occur while looking up positions
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid ayanamsa: {ayanamsa}. Valid ayanamsas: {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("Failed to calculate position for {planet} at {datetime}: {message}")]
    CalculationFailed {
        planet: Planet,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("No recorded longitude for {planet} at {datetime}")]
    MissingSample {
        planet: Planet,
        datetime: DateTime<Utc>,
    },
    #[error("Failed to read replay file {path}: {source}")]
    ReplayIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed replay data: {0}")]
    Replay(#[from] serde_json::Error),
}
