use anyhow::Context;
use chrono::{DateTime, Utc};
use selene::ephemeris::{EphemerisError, Planet, PositionProvider, ReplayProvider};
use std::cell::RefCell;
use std::fs;
use std::path::Path;

/// Passes lookups through to `inner` and keeps every answer so the scan can
/// be replayed offline later.
pub(crate) struct Recorder<P> {
    inner: P,
    recorded: RefCell<ReplayProvider>,
}

impl<P: PositionProvider> Recorder<P> {
    pub(crate) fn new(inner: P) -> Self {
        Self {
            inner,
            recorded: RefCell::new(ReplayProvider::new()),
        }
    }

    pub(crate) fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file = self.recorded.borrow().to_file();
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write replay file {}", path.display()))?;
        log::info!("Recorded {} samples to {}", file.samples.len(), path.display());
        Ok(())
    }
}

impl<P: PositionProvider> PositionProvider for Recorder<P> {
    fn longitude(&self, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
        let lon = self.inner.longitude(moment, planet)?;
        self.recorded.borrow_mut().insert(moment, planet, lon);
        Ok(lon)
    }
}
