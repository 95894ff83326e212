pub mod calculator;
pub mod types;

pub use calculator::{angular_distance, normalize_degrees, shadow_point, AspectCalculator, DEFAULT_ORB};
pub use types::{AspectHit, AspectKey, AspectKind, Body};
