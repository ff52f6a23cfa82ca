//! Filtering operators
//!
//! In-place reductions over a log's record sequence. Every operator
//! preserves relative order, never duplicates a record, and reports how
//! much it removed.

use crate::geo::orthodromic_distance;
use crate::record::TelemetryRecord;

use super::RawLog;

/// What [`RawLog::strip`] removed at each end of the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripReport {
    /// Leading records dropped while the GPS had no live fix
    pub no_fix_start: usize,
    /// Trailing records dropped after the fix was lost again
    pub no_fix_end: usize,
    /// Leading records dropped as dockside lingering
    pub lingering_start: usize,
    /// Trailing records dropped as dockside lingering
    pub lingering_end: usize,
}

impl StripReport {
    /// Total records removed by the strip.
    pub fn total(&self) -> usize {
        self.no_fix_start + self.no_fix_end + self.lingering_start + self.lingering_end
    }
}

/// Index of the first record in `data` that is part of a boat movement.
///
/// Scans for the first record further than `threshold` metres from
/// `data[0]`, then rewinds from that trigger while the time delta stays
/// within `rewind_secs`, keeping the earliest such index. The rewind
/// absorbs the position "jump" a GPS can make on first lock, so real
/// motion just before the threshold crossing is not truncated.
///
/// `None` means no record ever left the threshold circle; callers must
/// treat that as "no movement found", not as index zero.
fn movement_start_index(
    data: &[&TelemetryRecord],
    threshold: f64,
    rewind_secs: f64,
) -> Option<usize> {
    let first = *data.first()?;
    for (i, record) in data.iter().enumerate() {
        if orthodromic_distance(first.position(), record.position()) > threshold {
            let trigger = *record;
            let mut start = i;
            for j in (0..i).rev() {
                if data[j].seconds_to(trigger).abs() > rewind_secs {
                    break;
                }
                start = j;
            }
            return Some(start);
        }
    }
    None
}

impl RawLog {
    /// Remove leading and trailing noise in two passes.
    ///
    /// Pass A drops runs of identical fixes at both ends: a series of
    /// equal coordinates means the GPS had no live fix yet (or had lost
    /// it). A lone head or tail record is not a series and is kept. If
    /// every fix in the log is identical the GPS never locked and the
    /// whole log is dropped.
    ///
    /// Pass B, for a positive `movement_threshold`, drops leading and
    /// trailing dockside lingering: everything before the boat first
    /// moved `movement_threshold` metres from its resting point, with a
    /// `rewind_seconds` grace window around the crossing. A log that
    /// never moves beyond the threshold strips to empty.
    pub fn strip(&mut self, movement_threshold: f64, rewind_seconds: f64) -> StripReport {
        let mut report = StripReport {
            no_fix_start: self.trim_fix_run_front(),
            no_fix_end: self.trim_fix_run_back(),
            ..StripReport::default()
        };
        if movement_threshold > 0.0 {
            report.lingering_start = self.strip_front(movement_threshold, rewind_seconds);
            report.lingering_end = self.strip_back(movement_threshold, rewind_seconds);
        }
        report
    }

    fn trim_fix_run_front(&mut self) -> usize {
        let run = {
            let view: Vec<&TelemetryRecord> = self.records().iter().collect();
            movement_start_index(&view, 0.0, 0.0)
        };
        match run {
            // A single head record means the fix was live immediately.
            Some(run) if run >= 2 => {
                self.records_mut().drain(..run);
                run
            }
            Some(_) => 0,
            None => {
                let n = self.len();
                self.records_mut().clear();
                n
            }
        }
    }

    fn trim_fix_run_back(&mut self) -> usize {
        let run = {
            let view: Vec<&TelemetryRecord> = self.records().iter().rev().collect();
            movement_start_index(&view, 0.0, 0.0)
        };
        match run {
            Some(run) if run >= 2 => {
                let keep = self.len() - run;
                self.records_mut().truncate(keep);
                run
            }
            Some(_) => 0,
            None => {
                let n = self.len();
                self.records_mut().clear();
                n
            }
        }
    }

    fn strip_front(&mut self, threshold: f64, rewind_secs: f64) -> usize {
        let index = {
            let view: Vec<&TelemetryRecord> = self.records().iter().collect();
            movement_start_index(&view, threshold, rewind_secs)
        };
        match index {
            Some(i) => {
                self.records_mut().drain(..i);
                i
            }
            None => {
                let n = self.len();
                self.records_mut().clear();
                n
            }
        }
    }

    fn strip_back(&mut self, threshold: f64, rewind_secs: f64) -> usize {
        let index = {
            let view: Vec<&TelemetryRecord> = self.records().iter().rev().collect();
            movement_start_index(&view, threshold, rewind_secs)
        };
        match index {
            Some(i) => {
                let keep = self.len() - i;
                self.records_mut().truncate(keep);
                i
            }
            None => {
                let n = self.len();
                self.records_mut().clear();
                n
            }
        }
    }

    /// Keep only records whose HDOP is at or below `max_hdop`.
    ///
    /// Records that carry no HDOP field are kept; there is nothing to
    /// judge them by. Returns the number of records removed.
    pub fn filter_by_precision(&mut self, max_hdop: f64) -> usize {
        let before = self.len();
        self.records_mut()
            .retain(|r| r.hdop().map_or(true, |h| h <= max_hdop));
        before - self.len()
    }

    /// Thin the log so consecutive kept records are more than
    /// `min_metres` apart.
    ///
    /// Greedy forward scan: the first record is kept, then each record
    /// is kept only once its distance from the last kept record exceeds
    /// the step. The final record is pinned unconditionally (unless it
    /// was already kept) so the log's endpoint survives; that last pair
    /// may therefore be closer than the step. Returns the number of
    /// records removed.
    pub fn filter_minimum_step_length(&mut self, min_metres: f64) -> usize {
        let n = self.len();
        if n == 0 {
            return 0;
        }
        let mut keep: Vec<usize> = vec![0];
        for i in 1..n {
            let last = self.records()[keep[keep.len() - 1]].position();
            if orthodromic_distance(last, self.records()[i].position()) > min_metres {
                keep.push(i);
            }
        }
        if keep[keep.len() - 1] != n - 1 {
            keep.push(n - 1);
        }
        let kept: Vec<TelemetryRecord> =
            keep.iter().map(|&i| self.records()[i].clone()).collect();
        let removed = n - kept.len();
        self.replace_records(kept);
        removed
    }

    /// Drop records whose fix is frozen against a neighbour's.
    ///
    /// Repeated identical fixes in the middle of a log are the usual
    /// sign of a lost GPS lock. A record survives only when its fix
    /// differs from both neighbours and the neighbours differ from each
    /// other. Returns the number of records removed.
    pub fn filter_stuck_fixes(&mut self) -> usize {
        let n = self.len();
        if n < 2 {
            return 0;
        }
        let fix = |i: usize| self.records()[i].position();
        let mut kept: Vec<TelemetryRecord> = Vec::with_capacity(n);
        for i in 0..n {
            let prev_differs = i == 0 || fix(i - 1) != fix(i);
            let next_differs = i == n - 1 || fix(i + 1) != fix(i);
            let ends_differ = i == 0 || i == n - 1 || fix(i - 1) != fix(i + 1);
            if prev_differs && next_differs && ends_differ {
                kept.push(self.records()[i].clone());
            }
        }
        let removed = n - kept.len();
        self.replace_records(kept);
        removed
    }
}
