//! Stint segmentation
//!
//! Splits a log into "stints" (periods of continuous sailing) by
//! locating the lingering windows between them: stretches of at least
//! `min_time` seconds during which every fix stays inside a circle of
//! the given radius. The circle radius is estimated from the window's
//! maximum pairwise distance via Jung's theorem, an upper bound that is
//! deliberately kept instead of an exact minimum-enclosing-circle
//! computation so that segmentation results stay comparable across
//! analyses.

use std::ops::Range;

use serde::Serialize;

use crate::error::TelemetryError;
use crate::geo::orthodromic_distance;
use crate::record::TelemetryRecord;

use super::RawLog;

/// A half-open index range into a log's records, denoting one
/// continuous period of movement.
///
/// A stint is a value object: it is not persisted on its own, and it is
/// only meaningful against the record sequence it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stint {
    /// Index of the first record of the stint
    pub start: usize,
    /// Index one past the last record of the stint
    pub stop: usize,
}

impl Stint {
    /// Number of records covered.
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    /// True for a degenerate empty range.
    pub fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// The covered indices as a standard range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }
}

/// Jung's theorem estimate of the minimum enclosing circle radius of a
/// window of fixes: maximum pairwise distance divided by sqrt(3).
fn enclosing_radius_estimate(window: &[TelemetryRecord]) -> f64 {
    let mut max_pairwise: f64 = 0.0;
    for (i, a) in window.iter().enumerate() {
        for b in &window[i + 1..] {
            let d = orthodromic_distance(a.position(), b.position());
            max_pairwise = max_pairwise.max(d);
        }
    }
    max_pairwise / 3.0_f64.sqrt()
}

fn window_is_still(window: &[TelemetryRecord], radius: f64) -> bool {
    enclosing_radius_estimate(window) <= radius
}

impl RawLog {
    /// Segment the log into stints.
    ///
    /// A lingering window is a stretch spanning at least `min_time_secs`
    /// whose enclosing-circle estimate stays within `radius_metres`; the
    /// returned stints are the complement of the lingering windows:
    /// disjoint, strictly increasing, half-open. A log that lingers
    /// throughout yields no stints; a log that never lingers yields one
    /// stint covering everything. A tail too short to be judged against
    /// `min_time_secs` counts as moving.
    ///
    /// The stillness test is O(n²) in the window size, O(n³) across the
    /// log in the worst case; large logs are expected to be thinned
    /// first (see [`RawLog::filter_minimum_step_length`]).
    pub fn stints(
        &self,
        radius_metres: f64,
        min_time_secs: f64,
    ) -> Result<Vec<Stint>, TelemetryError> {
        let n = self.len();
        if n < 2 {
            return Err(TelemetryError::InsufficientData { needed: 2, got: n });
        }
        let records = self.records();
        let elapsed =
            |start: usize, stop: usize| records[start].seconds_to(&records[stop - 1]);

        // Collect lingering windows as half-open ranges.
        let mut lingering: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        let mut stop = start + 1;
        while start < n {
            // Grow the window until it spans enough time to be judged.
            while stop < n && elapsed(start, stop) < min_time_secs {
                stop += 1;
            }
            if elapsed(start, stop) < min_time_secs {
                break; // tail too short to classify
            }
            if window_is_still(&records[start..stop], radius_metres) {
                // Greedily absorb records while the window stays still.
                while stop < n && window_is_still(&records[start..stop + 1], radius_metres) {
                    stop += 1;
                }
                lingering.push((start, stop));
                start = stop;
                stop = start + 1;
            } else {
                // The boat was already moving at window entry; shrink
                // from the left and retry.
                start += 1;
                if stop <= start {
                    stop = start + 1;
                }
            }
        }

        // The stints are the gaps between lingering windows.
        let mut stints = Vec::new();
        let mut cursor = 0;
        for (lstart, lstop) in lingering {
            if lstart > cursor {
                stints.push(Stint {
                    start: cursor,
                    stop: lstart,
                });
            }
            cursor = lstop;
        }
        if cursor < n {
            stints.push(Stint {
                start: cursor,
                stop: n,
            });
        }
        Ok(stints)
    }
}
