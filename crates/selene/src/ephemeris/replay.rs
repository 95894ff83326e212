//! Recorded-longitude provider for deterministic scans.
//!
//! Replay files are JSON documents of the form
//!
//! ```json
//! {"samples": [{"utc": "2024-03-11T03:45:00Z", "longitudes": {"moon": 10.0, "sun": 331.2}}]}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::aspects::normalize_degrees;
use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::Planet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaySample {
    pub utc: DateTime<Utc>,
    pub longitudes: BTreeMap<Planet, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayFile {
    pub samples: Vec<ReplaySample>,
}

/// Serves longitudes from recorded samples, keyed by exact instant.
#[derive(Debug, Clone, Default)]
pub struct ReplayProvider {
    samples: BTreeMap<DateTime<Utc>, BTreeMap<Planet, f64>>,
}

impl ReplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self, EphemerisError> {
        let text = fs::read_to_string(path).map_err(|source| EphemerisError::ReplayIo {
            path: path.display().to_string(),
            source,
        })?;
        let provider = Self::from_json_str(&text)?;
        log::debug!(
            "Loaded {} replay samples from {}",
            provider.len(),
            path.display()
        );
        Ok(provider)
    }

    pub fn from_json_str(text: &str) -> Result<Self, EphemerisError> {
        let file: ReplayFile = serde_json::from_str(text)?;
        Ok(Self::from(file))
    }

    /// Record one longitude. Later inserts for the same instant and planet win.
    pub fn insert(&mut self, moment: DateTime<Utc>, planet: Planet, longitude: f64) {
        self.samples
            .entry(moment)
            .or_default()
            .insert(planet, normalize_degrees(longitude));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Export in replay file form, samples in chronological order.
    pub fn to_file(&self) -> ReplayFile {
        ReplayFile {
            samples: self
                .samples
                .iter()
                .map(|(utc, longitudes)| ReplaySample {
                    utc: *utc,
                    longitudes: longitudes.clone(),
                })
                .collect(),
        }
    }
}

impl From<ReplayFile> for ReplayProvider {
    fn from(file: ReplayFile) -> Self {
        let mut provider = Self::new();
        for sample in file.samples {
            for (planet, lon) in sample.longitudes {
                provider.insert(sample.utc, planet, lon);
            }
        }
        provider
    }
}

impl PositionProvider for ReplayProvider {
    fn longitude(&self, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
        self.samples
            .get(&moment)
            .and_then(|longitudes| longitudes.get(&planet))
            .copied()
            .ok_or(EphemerisError::MissingSample {
                planet,
                datetime: moment,
            })
    }
}
