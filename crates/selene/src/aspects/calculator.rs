use crate::aspects::types::{AspectHit, AspectKind, Body};

/// Default tolerance around each exact aspect angle, in degrees.
pub const DEFAULT_ORB: f64 = 0.15;

/// Slack for binary rounding so that `threshold ± orb` itself still matches.
const ORB_EPSILON: f64 = 1e-9;

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

/// Minimal angular separation of two longitudes, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}

/// Antipodal point of a longitude, in [0, 360).
pub fn shadow_point(longitude: f64) -> f64 {
    normalize_degrees(longitude + 180.0)
}

/// Aspect classifier with a single orb applied to every aspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectCalculator {
    orb: f64,
}

impl AspectCalculator {
    pub fn new(orb: f64) -> Self {
        Self { orb }
    }

    /// First aspect, in ascending angle order, whose exact angle lies within
    /// the orb of `separation`.
    pub fn classify(&self, separation: f64) -> Option<AspectKind> {
        AspectKind::ALL
            .iter()
            .copied()
            .find(|kind| (separation - kind.degrees()).abs() <= self.orb + ORB_EPSILON)
    }

    /// Classify the Moon against one body and keep the measured values.
    pub fn measure(&self, body: Body, moon_lon: f64, body_lon: f64) -> Option<AspectHit> {
        let separation = angular_distance(moon_lon, body_lon);
        self.classify(separation).map(|aspect| AspectHit {
            body,
            aspect,
            separation,
            orb: (separation - aspect.degrees()).abs(),
        })
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_ORB)
    }
}
