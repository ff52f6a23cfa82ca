//! KML track export
//!
//! Writes a log (or one stint of it) as a KML document for Google
//! Earth and friends: one styled LineString for the track plus a point
//! placemark per record with its signals and interval speed in the
//! description.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::geo::{convert_from_si, orthodromic_speed, Dimension, UnitSystem};
use crate::log::{RawLog, Stint};
use crate::record::{CODE_LATITUDE, CODE_LONGITUDE};
use crate::signals::SignalDictionary;

/// Errors that can occur while exporting KML.
#[derive(Debug, thiserror::Error)]
pub enum KmlExportError {
    /// XML serialization failed
    #[error("XML writing error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Writing into the in-memory buffer failed
    #[error("XML write error: {0}")]
    Write(#[from] std::io::Error),
    /// The destination could not be written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The offending path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The stint does not fit the log's current record sequence
    #[error("stint {start}..{stop} out of range for a log of {len} records")]
    StintOutOfRange {
        /// First index of the rejected stint
        start: usize,
        /// One-past-last index of the rejected stint
        stop: usize,
        /// Records currently in the log
        len: usize,
    },
}

/// Render a log as a KML document string.
///
/// `stint` restricts the export to one segment; `None` exports the
/// whole log. A stint is only meaningful against the record sequence
/// it was computed from; filtering the log afterwards invalidates it,
/// and a stint that no longer fits is rejected with
/// [`KmlExportError::StintOutOfRange`]. Signal labels in the point
/// descriptions come from the dictionary; codes it does not know are
/// omitted.
pub fn write_kml(
    log: &RawLog,
    stint: Option<Stint>,
    dictionary: &SignalDictionary,
) -> Result<String, KmlExportError> {
    let range = stint.map(|s| s.range()).unwrap_or(0..log.len());
    if range.start > range.end || range.end > log.len() {
        return Err(KmlExportError::StintOutOfRange {
            start: range.start,
            stop: range.end,
            len: log.len(),
        });
    }
    let records = &log.records()[range];

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", "http://www.opengis.net/kml/2.2"));
    writer.write_event(Event::Start(kml))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;
    write_text_element(&mut writer, "name", &format!("{} sailing", log.source_name()))?;

    // Track line style, as the boat's original exporter drew it.
    let mut style = BytesStart::new("Style");
    style.push_attribute(("id", "trackstyle"));
    writer.write_event(Event::Start(style))?;
    writer.write_event(Event::Start(BytesStart::new("LineStyle")))?;
    write_text_element(&mut writer, "color", "7f00ffff")?;
    write_text_element(&mut writer, "width", "4")?;
    writer.write_event(Event::End(BytesEnd::new("LineStyle")))?;
    writer.write_event(Event::End(BytesEnd::new("Style")))?;

    // One point placemark per record.
    let mut prev = None;
    for (i, record) in records.iter().enumerate() {
        writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
        write_text_element(&mut writer, "name", &format!("#{i}"))?;

        let mut description = String::new();
        for (code, value) in record.fields() {
            if *code == CODE_LONGITUDE || *code == CODE_LATITUDE {
                continue;
            }
            if let Some(info) = dictionary.lookup(*code) {
                description.push_str(&format!("{}: {}\n", info.name, value));
            }
        }
        if let Some(prev) = prev {
            if let Ok(speed) = orthodromic_speed(prev, record) {
                let cm_s = speed * 100.0;
                let km_h = convert_from_si(Dimension::Speed, speed, UnitSystem::Conventional);
                description.push_str(&format!("speed (cm/s): {}\n", cm_s as i64));
                description.push_str(&format!("speed (km/h): {km_h:.2}\n"));
            }
        }
        write_text_element(&mut writer, "description", description.trim_end())?;

        writer.write_event(Event::Start(BytesStart::new("Point")))?;
        write_text_element(
            &mut writer,
            "coordinates",
            &format!("{},{}", record.longitude(), record.latitude()),
        )?;
        writer.write_event(Event::End(BytesEnd::new("Point")))?;
        writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
        prev = Some(record);
    }

    // The track itself.
    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    write_text_element(&mut writer, "name", "track")?;
    write_text_element(&mut writer, "styleUrl", "#trackstyle")?;
    writer.write_event(Event::Start(BytesStart::new("LineString")))?;
    write_text_element(&mut writer, "tessellate", "1")?;
    let coordinates = records
        .iter()
        .map(|r| format!("{},{}", r.longitude(), r.latitude()))
        .collect::<Vec<_>>()
        .join("\n");
    write_text_element(&mut writer, "coordinates", &coordinates)?;
    writer.write_event(Event::End(BytesEnd::new("LineString")))?;
    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;

    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;

    let result = writer.into_inner();
    Ok(String::from_utf8_lossy(&result).to_string())
}

/// Write a log's KML to a file, attaching the path to I/O failures.
pub fn write_kml_to_path<P: AsRef<Path>>(
    log: &RawLog,
    stint: Option<Stint>,
    dictionary: &SignalDictionary,
    path: P,
) -> Result<(), KmlExportError> {
    let path = path.as_ref();
    let xml = write_kml(log, stint, dictionary)?;
    fs::write(path, xml).map_err(|source| KmlExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), KmlExportError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
