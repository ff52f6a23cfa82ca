use sailtrace_core::geo::orthodromic_distance;
use sailtrace_core::log::{RawLog, Stint};
use sailtrace_core::record::TelemetryRecord;

// One sample per second; 1e-3 degrees of latitude is roughly 111 m.
fn log_from_latitudes(lats: &[f64]) -> RawLog {
    let lines: Vec<String> = lats
        .iter()
        .enumerate()
        .map(|(i, lat)| format!("{},X18.070000,Y{:.6}", i * 1000, lat))
        .collect();
    RawLog::from_lines("2011-03-14@10h32", lines.iter().map(|l| l.as_str())).unwrap()
}

fn enclosing_radius_estimate(records: &[TelemetryRecord]) -> f64 {
    let mut max_pairwise: f64 = 0.0;
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            max_pairwise = max_pairwise.max(orthodromic_distance(a.position(), b.position()));
        }
    }
    max_pairwise / 3.0_f64.sqrt()
}

fn span_secs(records: &[TelemetryRecord]) -> f64 {
    records[0].seconds_to(&records[records.len() - 1])
}

#[test]
fn test_stints_are_disjoint_and_increasing() {
    // Sail out, pause, sail on, pause, drift home.
    let mut lats = Vec::new();
    for i in 0..6 {
        lats.push(59.320 + i as f64 * 1e-3);
    }
    for i in 0..8 {
        lats.push(59.325 + (i % 2) as f64 * 1e-5);
    }
    for i in 1..7 {
        lats.push(59.325 + i as f64 * 1e-3);
    }
    for i in 0..8 {
        lats.push(59.331 + (i % 2) as f64 * 1e-5);
    }
    let log = log_from_latitudes(&lats);
    let stints = log.stints(50.0, 3.0).unwrap();

    assert!(!stints.is_empty());
    for window in stints.windows(2) {
        assert!(window[0].stop <= window[1].start);
        assert!(window[0].start < window[1].start);
    }
    for stint in &stints {
        assert!(stint.start < stint.stop);
        assert!(stint.stop <= log.len());
    }
}

#[test]
fn test_moving_ranges_fail_the_stillness_test() {
    let mut lats = Vec::new();
    for i in 0..6 {
        lats.push(59.320 + i as f64 * 1e-3);
    }
    for i in 0..8 {
        lats.push(59.325 + (i % 2) as f64 * 1e-5);
    }
    for i in 1..7 {
        lats.push(59.325 + i as f64 * 1e-3);
    }
    let log = log_from_latitudes(&lats);
    let (radius, min_time) = (50.0, 3.0);
    let stints = log.stints(radius, min_time).unwrap();

    // Every reported stint is either genuinely moving (its enclosing
    // circle estimate exceeds the radius) or too brief to classify.
    for stint in &stints {
        let records = &log.records()[stint.range()];
        assert!(
            enclosing_radius_estimate(records) > radius || span_secs(records) < min_time,
            "stint {stint:?} looks like lingering"
        );
    }
}

#[test]
fn test_whole_log_stint_when_never_lingering() {
    let lats: Vec<f64> = (0..12).map(|i| 59.32 + i as f64 * 1e-3).collect();
    let log = log_from_latitudes(&lats);
    let stints = log.stints(50.0, 4.0).unwrap();
    assert_eq!(stints, vec![Stint { start: 0, stop: 12 }]);
}

#[test]
fn test_zero_stints_when_always_lingering() {
    let lats: Vec<f64> = (0..12).map(|i| 59.32 + (i % 3) as f64 * 1e-5).collect();
    let log = log_from_latitudes(&lats);
    let stints = log.stints(50.0, 4.0).unwrap();
    assert!(stints.is_empty());
}
