//! Export and analysis adapters
//!
//! The narrow surfaces the engine exposes to external consumers:
//! an ordered read-only view of track points for plotting, flat
//! name-keyed rows for a relational sink, and a KML writer for map
//! viewers. None of these own rendering or schema decisions.

mod kml;

pub use kml::{write_kml, write_kml_to_path, KmlExportError};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::log::RawLog;
use crate::record::FieldValue;
use crate::signals::SignalDictionary;

/// One point of the read-only track view handed to plotting and export
/// collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint<'a> {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Absolute sample time
    pub timestamp: DateTime<Utc>,
    /// The sample's remaining typed fields
    pub fields: &'a BTreeMap<char, FieldValue>,
}

impl RawLog {
    /// Ordered read-only view of the track for plotting and export.
    pub fn track_points(&self) -> impl Iterator<Item = TrackPoint<'_>> {
        self.records().iter().map(|r| TrackPoint {
            latitude: r.latitude(),
            longitude: r.longitude(),
            timestamp: r.timestamp(),
            fields: r.fields(),
        })
    }

    /// Records as flat name-keyed rows for a relational sink.
    ///
    /// Each row maps the dictionary name of every known signal code to
    /// its value, plus a `time` column with the RFC 3339 timestamp.
    /// Codes the dictionary does not know are left out; the sink owns
    /// its schema and cannot store nameless columns.
    pub fn flat_rows(&self, dictionary: &SignalDictionary) -> Vec<BTreeMap<String, FieldValue>> {
        self.records()
            .iter()
            .map(|record| {
                let mut row: BTreeMap<String, FieldValue> = BTreeMap::new();
                row.insert(
                    "time".to_string(),
                    FieldValue::Text(record.timestamp().to_rfc3339()),
                );
                for (code, value) in record.fields() {
                    if let Some(info) = dictionary.lookup(*code) {
                        row.insert(info.name.to_string(), value.clone());
                    }
                }
                row
            })
            .collect()
    }
}
