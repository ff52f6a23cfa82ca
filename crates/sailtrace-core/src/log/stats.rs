//! Derived log statistics
//!
//! A read-only aggregate over the current record sequence, recomputed
//! on demand. Numeric edge cases (zero total time, zero-duration
//! sample pairs) are defended here rather than allowed to surface as
//! infinities.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TelemetryError;
use crate::geo::orthodromic_distance;

use super::RawLog;

/// Summary statistics over a log snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogStats {
    /// Timestamp of the first record
    pub time_first: DateTime<Utc>,
    /// Timestamp of the last record
    pub time_last: DateTime<Utc>,
    /// Total elapsed time in seconds
    pub time_total_secs: f64,
    /// Sum of consecutive great-circle distances, in metres
    pub dist_total: f64,
    /// Greatest distance from the first record, in metres
    pub dist_furthest: f64,
    /// Average speed over the whole log, in m/s
    pub speed_avg: f64,
    /// Highest per-interval speed between adjacent records, in m/s
    pub speed_max: f64,
    /// Number of records aggregated
    pub counter_records: usize,
}

impl RawLog {
    /// Compute summary statistics over the current records.
    ///
    /// Needs at least two records. `speed_max` is the maximum
    /// instantaneous interval speed over adjacent pairs; zero-duration
    /// pairs are excluded from the maximum rather than producing
    /// infinity. A log whose records all share one timestamp has no
    /// meaningful average speed and fails with a degenerate-interval
    /// error.
    pub fn stats(&self) -> Result<LogStats, TelemetryError> {
        let records = self.records();
        let n = records.len();
        if n < 2 {
            return Err(TelemetryError::InsufficientData { needed: 2, got: n });
        }

        let time_first = records[0].timestamp();
        let time_last = records[n - 1].timestamp();
        let time_total_secs = records[0].seconds_to(&records[n - 1]);
        if time_total_secs <= 0.0 {
            return Err(TelemetryError::DegenerateInterval);
        }

        let mut dist_total = 0.0;
        let mut dist_furthest: f64 = 0.0;
        let mut speed_max: f64 = 0.0;
        for pair in records.windows(2) {
            let d = orthodromic_distance(pair[0].position(), pair[1].position());
            dist_total += d;
            let dt = pair[0].seconds_to(&pair[1]);
            if dt > 0.0 {
                speed_max = speed_max.max(d / dt);
            }
        }
        for record in records {
            let d = orthodromic_distance(records[0].position(), record.position());
            dist_furthest = dist_furthest.max(d);
        }

        Ok(LogStats {
            time_first,
            time_last,
            time_total_secs,
            dist_total,
            dist_furthest,
            speed_avg: dist_total / time_total_secs,
            speed_max,
            counter_records: n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_requires_two_records() {
        let log = RawLog::from_lines("2011-03-14@10h32", ["0,X18.07,Y59.32"]).unwrap();
        let err = log.stats().unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::InsufficientData { needed: 2, got: 1 }
        ));
    }

    #[test]
    fn test_stats_zero_duration_pairs_do_not_blow_up() {
        // Two records share a timestamp; the pair is excluded from
        // speed_max instead of dividing by zero.
        let lines = [
            "0,X18.07,Y59.32",
            "1000,X18.07,Y59.33",
            "1000,X18.07,Y59.34",
            "2000,X18.07,Y59.35",
        ];
        let log = RawLog::from_lines("2011-03-14@10h32", lines).unwrap();
        let stats = log.stats().unwrap();
        assert!(stats.speed_max.is_finite());
        assert_eq!(stats.counter_records, 4);
    }

    #[test]
    fn test_stats_all_same_timestamp_is_degenerate() {
        let lines = ["0,X18.07,Y59.32", "0,X18.07,Y59.33"];
        let log = RawLog::from_lines("2011-03-14@10h32", lines).unwrap();
        assert!(matches!(
            log.stats().unwrap_err(),
            TelemetryError::DegenerateInterval
        ));
    }
}
