//! Raw wire format
//!
//! Reads and writes the boat's text line format:
//!
//! ```text
//! <offset_ms>,<code><value>,<code><value>,...
//! ```
//!
//! where `offset_ms` is milliseconds since the capture start and each
//! pair is a single-character signal code immediately followed by its
//! value. `dump` emits pairs sorted by code so that output is
//! deterministic.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Duration, Utc};

use crate::error::TelemetryError;
use crate::record::{FieldValue, TelemetryRecord};

use super::RawLog;

/// Parse one raw line into a record anchored at `start`.
///
/// The error value is a row-level message; the caller decides whether
/// to skip the row or abort.
pub(crate) fn parse_line(
    line: &str,
    start: DateTime<Utc>,
) -> Result<TelemetryRecord, String> {
    let mut parts = line.split(',');
    let offset_field = parts.next().unwrap_or_default();
    let offset_ms: i64 = offset_field
        .parse::<u64>()
        .map_err(|_| format!("invalid millisecond offset '{offset_field}'"))?
        .try_into()
        .map_err(|_| format!("millisecond offset '{offset_field}' out of range"))?;

    let mut fields: BTreeMap<char, FieldValue> = BTreeMap::new();
    let mut any_pair = false;
    for pair in parts {
        any_pair = true;
        let mut chars = pair.chars();
        let code = chars
            .next()
            .ok_or_else(|| "empty code/value pair".to_string())?;
        let value = chars.as_str();
        if value.is_empty() {
            return Err(format!("code '{code}' has no value"));
        }
        // Duplicate codes keep the last occurrence.
        fields.insert(code, FieldValue::infer(value));
    }
    if !any_pair {
        return Err("no code/value pairs".to_string());
    }

    let timestamp = start + Duration::milliseconds(offset_ms);
    TelemetryRecord::from_fields(timestamp, fields)
        .ok_or_else(|| "missing numeric position (X/Y)".to_string())
}

/// Render one record back into the wire format, relative to `start`.
pub(crate) fn format_record(record: &TelemetryRecord, start: DateTime<Utc>) -> String {
    let offset_ms = (record.timestamp() - start).num_milliseconds();
    let mut line = offset_ms.to_string();
    for (code, value) in record.fields() {
        line.push(',');
        line.push(*code);
        line.push_str(&value.to_string());
    }
    line
}

impl RawLog {
    /// Write the log back out in the raw line format.
    ///
    /// Round-trip contract: re-loading the dump yields the same record
    /// count, positions and millisecond timestamps. Value types survive
    /// up to re-inference; a whole-valued `Real` comes back as an
    /// `Integer`.
    pub fn dump<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for record in self.records() {
            writeln!(writer, "{}", format_record(record, self.log_start_time()))?;
        }
        writer.flush()
    }

    /// Dump to a file, attaching the path to any I/O failure.
    pub fn dump_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TelemetryError> {
        let path = path.as_ref();
        let attach = |source: io::Error| TelemetryError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(attach)?;
        let mut writer = BufWriter::new(file);
        self.dump(&mut writer).map_err(attach)
    }
}
