//! Raw telemetry logs
//!
//! A [`RawLog`] is the ordered, in-memory representation of one capture
//! session: the records of a raw text log, anchored to the start time
//! encoded in the source name. Filtering operators, stint segmentation
//! and statistics all live on it; each sub-module carries one concern.

mod filter;
mod format;
mod stats;
mod stint;

pub use filter::StripReport;
pub use stats::LogStats;
pub use stint::Stint;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;

use crate::error::TelemetryError;
use crate::record::TelemetryRecord;

fn start_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{4})-(\d{2})-(\d{2})@(\d{2})h(\d{2})").unwrap()
    })
}

/// Extract the capture start time from a source identifier.
///
/// Any identifier containing the literal pattern `YYYY-MM-DD@HHhMM` is
/// accepted; the wall-clock time is interpreted as UTC. A missing or
/// non-calendar match is a [`TelemetryError::SourceNaming`] error.
pub fn start_time_from_source(source_name: &str) -> Result<DateTime<Utc>, TelemetryError> {
    let caps = start_time_re()
        .captures(source_name)
        .ok_or_else(|| TelemetryError::SourceNaming(source_name.to_string()))?;
    // The captures are all \d{n}, so the integer parses cannot fail.
    let num = |i: usize| caps[i].parse::<u32>().unwrap_or(0);
    Utc.with_ymd_and_hms(num(1) as i32, num(2), num(3), num(4), num(5), 0)
        .single()
        .ok_or_else(|| TelemetryError::SourceNaming(source_name.to_string()))
}

/// An ordered, mutable collection of telemetry records from one capture.
///
/// Loading parses every raw line into a [`TelemetryRecord`]; filtering
/// operators then reduce the record sequence in place, always preserving
/// relative order. The log is exclusively owned by the code path
/// analysing it; operators are meant to be applied sequentially.
#[derive(Debug, Clone)]
pub struct RawLog {
    source_name: String,
    log_start_time: DateTime<Utc>,
    records: Vec<TelemetryRecord>,
    skipped_on_load: usize,
}

impl RawLog {
    /// Load a log from a text file; the file stem is the source name.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<RawLog, TelemetryError> {
        let path = path.as_ref();
        let source_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(path).map_err(|source| TelemetryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            lines.push(line.map_err(|source| TelemetryError::Io {
                path: path.to_path_buf(),
                source,
            })?);
        }
        Self::from_lines(&source_name, lines.iter().map(|l| l.as_str()))
    }

    /// Build a log from raw lines already held in memory.
    ///
    /// Malformed rows are skipped with a warning (see
    /// [`RawLog::skipped_on_load`]); blank lines are ignored silently.
    /// Ending up with zero records is a parse error: a successfully
    /// loaded log is never empty.
    pub fn from_lines<'a, I>(source_name: &str, lines: I) -> Result<RawLog, TelemetryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let log_start_time = start_time_from_source(source_name)?;
        let mut records: Vec<TelemetryRecord> = Vec::new();
        let mut skipped = 0;
        for (line_no, line) in lines.into_iter().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match format::parse_line(line, log_start_time) {
                Ok(record) => records.push(record),
                Err(message) => {
                    tracing::warn!(
                        source = source_name,
                        line = line_no + 1,
                        "skipping malformed row: {message}"
                    );
                    skipped += 1;
                }
            }
        }
        if records.is_empty() {
            return Err(TelemetryError::Parse {
                source_name: source_name.to_string(),
                message: format!("no usable records ({skipped} rows skipped)"),
            });
        }
        Ok(RawLog {
            source_name: source_name.to_string(),
            log_start_time,
            records,
            skipped_on_load: skipped,
        })
    }

    /// Opaque identifier of the capture this log came from.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Capture start time parsed from the source name.
    pub fn log_start_time(&self) -> DateTime<Utc> {
        self.log_start_time
    }

    /// The record sequence, in chronological order.
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when every record has been filtered away.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped by the skip-and-warn policy while loading.
    pub fn skipped_on_load(&self) -> usize {
        self.skipped_on_load
    }

    /// Replace the backing record sequence, preserving owner identity.
    ///
    /// This is the single mutation point every filtering operator goes
    /// through; order and origin of the kept records are the caller's
    /// responsibility.
    pub(crate) fn replace_records(&mut self, records: Vec<TelemetryRecord>) {
        self.records = records;
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<TelemetryRecord> {
        &mut self.records
    }
}
