use selene::aspects::{angular_distance, shadow_point, AspectCalculator, AspectKind, Body, DEFAULT_ORB};

#[test]
fn test_classify_is_symmetric() {
    let calculator = AspectCalculator::default();
    // Sweep pairs on a coarse grid offset so many fall on exact angles.
    for i in 0..144 {
        for j in 0..144 {
            let a = i as f64 * 2.5 + 0.05;
            let b = j as f64 * 2.5 + 0.05;
            assert_eq!(
                calculator.classify(angular_distance(a, b)),
                calculator.classify(angular_distance(b, a)),
                "asymmetric at {a} / {b}"
            );
        }
    }
}

#[test]
fn test_separation_stays_in_half_circle() {
    for (a, b) in [(0.0, 359.9), (359.9, 0.0), (10.0, 190.0), (-30.0, 30.0), (720.5, 0.5)] {
        let d = angular_distance(a, b);
        assert!((0.0..=180.0).contains(&d), "{a} vs {b} gave {d}");
    }
}

#[test]
fn test_conjunction_across_zero() {
    let calculator = AspectCalculator::default();
    let hit = calculator.measure(Body::Venus, 359.95, 0.05).unwrap();
    assert_eq!(hit.aspect, AspectKind::Conjunction);
    assert!((hit.separation - 0.1).abs() < 1e-9);
}

#[test]
fn test_every_aspect_matches_at_its_exact_angle() {
    let calculator = AspectCalculator::default();
    for aspect in AspectKind::ALL {
        let moon = 200.0;
        let body = moon + aspect.degrees();
        let hit = calculator.measure(Body::Mars, moon, body).unwrap();
        assert_eq!(hit.aspect, aspect);
        assert!(hit.is_exact());
    }
}

#[test]
fn test_gaps_between_aspects_are_quiet() {
    let calculator = AspectCalculator::default();
    for separation in [15.0, 37.5, 52.5, 75.0, 105.0, 127.5, 142.5, 165.0] {
        assert_eq!(calculator.classify(separation), None, "{separation}");
    }
}

#[test]
fn test_orb_boundaries() {
    let calculator = AspectCalculator::new(DEFAULT_ORB);
    assert_eq!(calculator.classify(45.15), Some(AspectKind::SemiSquare));
    assert_eq!(calculator.classify(44.85), Some(AspectKind::SemiSquare));
    assert_eq!(calculator.classify(45.151), None);
    assert_eq!(calculator.classify(180.0 - 0.15), Some(AspectKind::Opposition));
}

#[test]
fn test_ketu_opposes_rahu_everywhere() {
    for i in 0..360 {
        let rahu = i as f64 + 0.25;
        assert!((angular_distance(rahu, shadow_point(rahu)) - 180.0).abs() < 1e-9);
    }
}

#[test]
fn test_zero_orb_requires_exact_angle() {
    let calculator = AspectCalculator::new(0.0);
    assert_eq!(calculator.classify(120.0), Some(AspectKind::Trine));
    assert_eq!(calculator.classify(120.01), None);
}
