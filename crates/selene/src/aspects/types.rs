use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::Planet;

/// Bodies the Moon is tracked against, in table order.
///
/// The declaration order is the canonical order used when sorting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    /// Mean ascending lunar node.
    Rahu,
    /// Shadow point opposite Rahu. Always derived, never queried.
    Ketu,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 11] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Rahu,
        Body::Ketu,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// The object to ask a position provider for, or `None` when the body is
    /// derived from another one.
    pub const fn source(self) -> Option<Planet> {
        match self {
            Body::Sun => Some(Planet::Sun),
            Body::Mercury => Some(Planet::Mercury),
            Body::Venus => Some(Planet::Venus),
            Body::Mars => Some(Planet::Mars),
            Body::Jupiter => Some(Planet::Jupiter),
            Body::Saturn => Some(Planet::Saturn),
            Body::Rahu => Some(Planet::MeanNode),
            Body::Ketu => None,
            Body::Uranus => Some(Planet::Uranus),
            Body::Neptune => Some(Planet::Neptune),
            Body::Pluto => Some(Planet::Pluto),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Case-insensitive lookup by name. Accepts the node aliases
    /// `north_node` and `south_node`.
    pub fn from_name(name: &str) -> Option<Body> {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "north_node" | "mean_node" => return Some(Body::Rahu),
            "south_node" => return Some(Body::Ketu),
            _ => {}
        }
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(&lower))
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recognized aspects, declared in ascending order of their exact angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Square,
    Trine,
    Quincunx,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 8] = [
        AspectKind::Conjunction,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Quincunx,
        AspectKind::Opposition,
    ];

    /// Exact angle in degrees.
    pub const fn degrees(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::SemiSextile => 30.0,
            AspectKind::SemiSquare => 45.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::SemiSextile => "Semi-Sextile",
            AspectKind::SemiSquare => "Semi-Square",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Quincunx => "Quincunx",
            AspectKind::Opposition => "Opposition",
        }
    }

    /// Name followed by the exact angle, e.g. `Semi-Square 45`.
    pub fn label(self) -> String {
        format!("{} {}", self.name(), self.degrees() as u32)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One trackable relationship between the Moon and a body.
///
/// Ordering is body table order first, then ascending aspect angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AspectKey {
    pub body: Body,
    pub aspect: AspectKind,
}

impl AspectKey {
    pub const fn new(body: Body, aspect: AspectKind) -> Self {
        Self { body, aspect }
    }
}

/// A single aspect observed at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectHit {
    pub body: Body,
    pub aspect: AspectKind,
    /// Angular separation between the Moon and the body (0-180)
    pub separation: f64,
    /// Deviation from the exact aspect angle
    pub orb: f64,
}

impl AspectHit {
    /// Deviation below which a hit counts as exact.
    pub const EXACT_THRESHOLD: f64 = 0.01;

    pub fn key(&self) -> AspectKey {
        AspectKey::new(self.body, self.aspect)
    }

    pub fn is_exact(&self) -> bool {
        self.orb < Self::EXACT_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_table_order_is_canonical() {
        let mut sorted = Body::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Body::ALL.to_vec());
        assert_eq!(Body::ALL[6], Body::Rahu);
        assert_eq!(Body::ALL[7], Body::Ketu);
    }

    #[test]
    fn test_ketu_has_no_source() {
        assert_eq!(Body::Ketu.source(), None);
        assert_eq!(Body::Rahu.source(), Some(Planet::MeanNode));
        for body in Body::ALL.iter().filter(|b| **b != Body::Ketu) {
            assert!(body.source().is_some(), "{body} should be queryable");
        }
    }

    #[test]
    fn test_aspects_ascending() {
        for pair in AspectKind::ALL.windows(2) {
            assert!(pair[0].degrees() < pair[1].degrees());
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_names_round_trip() {
        assert_eq!(Body::from_name("jupiter"), Some(Body::Jupiter));
        assert_eq!(Body::from_name(" KETU "), Some(Body::Ketu));
        assert_eq!(Body::from_name("north_node"), Some(Body::Rahu));
        assert_eq!(Body::from_name("moon"), None);
        assert_eq!(AspectKind::Quincunx.label(), "Quincunx 150");
    }

    #[test]
    fn test_key_ordering() {
        let a = AspectKey::new(Body::Sun, AspectKind::Opposition);
        let b = AspectKey::new(Body::Mercury, AspectKind::Conjunction);
        let c = AspectKey::new(Body::Mercury, AspectKind::Trine);
        assert!(a < b);
        assert!(b < c);
    }
}
