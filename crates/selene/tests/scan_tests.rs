use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use selene::aspects::{AspectKind, Body};
use selene::ephemeris::{EphemerisError, Planet, PositionProvider};
use selene::scan::{ScanConfig, ScanDriver, ScanError};
use selene::tracker::ReportedInterval;
use std::cell::RefCell;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
}

fn local(hour: u32, minute: u32) -> chrono::NaiveDateTime {
    date().and_hms_opt(hour, minute, 0).unwrap()
}

/// Moon fixed at 10°, Sun at 10° until 09:20 local (03:50 UTC), 50° after.
/// Every other object sits where it forms no aspect with the Moon.
struct DivergingSun {
    queries: RefCell<Vec<Planet>>,
}

impl DivergingSun {
    fn new() -> Self {
        Self {
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl PositionProvider for DivergingSun {
    fn longitude(&self, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
        self.queries.borrow_mut().push(planet);
        let before_divergence = moment.hour() == 3 && moment.minute() <= 50;
        Ok(match planet {
            Planet::Moon => 10.0,
            Planet::Sun if before_divergence => 10.0,
            Planet::Sun => 50.0,
            _ => 17.0,
        })
    }
}

#[test]
fn test_conjunction_closes_when_body_diverges() {
    let driver = ScanDriver::new(ScanConfig::default(), DivergingSun::new()).unwrap();
    let report = driver.run(date()).unwrap();

    assert_eq!(
        report.intervals,
        vec![ReportedInterval {
            body: Body::Sun,
            aspect: AspectKind::Conjunction,
            start: local(9, 15),
            end: local(9, 21),
        }]
    );
    assert_eq!(report.window_start, local(9, 15));
    assert_eq!(report.window_end, local(15, 30));
}

#[test]
fn test_ketu_is_derived_from_rahu() {
    struct NodeOpposite;
    impl PositionProvider for NodeOpposite {
        fn longitude(&self, _moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
            match planet {
                Planet::Moon => Ok(100.0),
                // Rahu at 280 puts Ketu exactly on the Moon.
                Planet::MeanNode => Ok(280.0),
                _ => Ok(217.0),
            }
        }
    }

    let config = ScanConfig {
        bodies: vec![Body::Rahu, Body::Ketu],
        window_end: NaiveTime::from_hms_opt(9, 17, 0).unwrap(),
        ..ScanConfig::default()
    };
    let driver = ScanDriver::new(config, NodeOpposite).unwrap();
    let report = driver.run(date()).unwrap();

    let found: Vec<_> = report.intervals.iter().map(|i| (i.body, i.aspect)).collect();
    assert_eq!(
        found,
        vec![
            (Body::Rahu, AspectKind::Opposition),
            (Body::Ketu, AspectKind::Conjunction),
        ]
    );
    assert!(report.intervals.iter().all(|i| i.end == local(9, 17)));
}

#[test]
fn test_ketu_never_queries_a_planet_of_its_own() {
    let provider = DivergingSun::new();
    let config = ScanConfig {
        bodies: vec![Body::Ketu],
        window_end: NaiveTime::from_hms_opt(9, 16, 0).unwrap(),
        ..ScanConfig::default()
    };
    let driver = ScanDriver::new(config, &provider).unwrap();
    driver.run(date()).unwrap();

    // Two samples, each asking for the Moon and the node only.
    assert_eq!(
        *provider.queries.borrow(),
        vec![Planet::Moon, Planet::MeanNode, Planet::Moon, Planet::MeanNode]
    );
}

#[test]
fn test_node_queried_once_per_minute() {
    let provider = DivergingSun::new();
    let config = ScanConfig {
        window_end: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
        ..ScanConfig::default()
    };
    let driver = ScanDriver::new(config, &provider).unwrap();
    driver.run(date()).unwrap();

    let queries = provider.queries.borrow();
    assert_eq!(queries.iter().filter(|p| **p == Planet::MeanNode).count(), 1);
    // Moon plus ten queryable bodies
    assert_eq!(queries.len(), 11);
}

#[test]
fn test_snapshots_list_every_minute() {
    let driver = ScanDriver::new(ScanConfig::default(), DivergingSun::new()).unwrap();
    let snapshots = driver.snapshots(date()).unwrap();

    assert_eq!(snapshots.len(), 376);
    let with_hits: Vec<_> = snapshots.iter().filter(|s| !s.hits.is_empty()).collect();
    assert_eq!(with_hits.len(), 6);
    assert_eq!(with_hits[0].local, local(9, 15));
    assert_eq!(with_hits[5].local, local(9, 20));
    assert!(with_hits[0].hits[0].is_exact());
    assert_eq!(snapshots[0].utc.to_rfc3339(), "2024-03-11T03:45:00+00:00");
}

#[test]
fn test_provider_failure_aborts_scan() {
    struct FailsMidScan;
    impl PositionProvider for FailsMidScan {
        fn longitude(&self, moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
            if moment.minute() >= 55 {
                return Err(EphemerisError::MissingSample {
                    planet,
                    datetime: moment,
                });
            }
            Ok(0.0)
        }
    }

    let driver = ScanDriver::new(ScanConfig::default(), FailsMidScan).unwrap();
    let err = driver.run(date()).unwrap_err();
    assert!(matches!(
        err,
        ScanError::Ephemeris(EphemerisError::MissingSample { planet: Planet::Moon, .. })
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let config = ScanConfig {
        orb: -1.0,
        ..ScanConfig::default()
    };
    let result = ScanDriver::new(config, DivergingSun::new());
    assert!(matches!(result, Err(ScanError::Config(_))));
}

#[test]
fn test_independent_scans_with_different_orbs() {
    struct NearTrine;
    impl PositionProvider for NearTrine {
        fn longitude(&self, _moment: DateTime<Utc>, planet: Planet) -> Result<f64, EphemerisError> {
            Ok(match planet {
                Planet::Moon => 0.0,
                Planet::Jupiter => 120.4,
                _ => 17.0,
            })
        }
    }

    let narrow = ScanDriver::new(ScanConfig::default(), NearTrine).unwrap();
    let wide = ScanDriver::new(
        ScanConfig {
            orb: 0.5,
            ..ScanConfig::default()
        },
        NearTrine,
    )
    .unwrap();

    assert!(narrow.run(date()).unwrap().intervals.is_empty());
    let wide_report = wide.run(date()).unwrap();
    assert_eq!(wide_report.intervals.len(), 1);
    assert_eq!(wide_report.intervals[0].body, Body::Jupiter);
    assert_eq!(wide_report.intervals[0].aspect, AspectKind::Trine);
}
