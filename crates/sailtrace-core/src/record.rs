//! Telemetry records and typed field values
//!
//! One record is one reconstructed sample from the boat: an absolute
//! timestamp plus a mapping from single-character signal code to a typed
//! value. The codes themselves are defined by the signal dictionary; the
//! record only insists on a numeric position (`X` longitude, `Y`
//! latitude) so that geodesic operations are always well defined.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Signal code carrying the longitude of a fix.
pub const CODE_LONGITUDE: char = 'X';
/// Signal code carrying the latitude of a fix.
pub const CODE_LATITUDE: char = 'Y';
/// Signal code carrying the horizontal dilution of precision.
pub const CODE_HDOP: char = 'D';

fn integer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+$").unwrap())
}

fn real_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?(\d+\.\d*|\.\d+)$").unwrap())
}

/// A typed value attached to a signal code.
///
/// The wire format carries values as bare text; the type is inferred at
/// parse time (integer pattern, then decimal pattern, then literal text)
/// and made explicit here rather than silently coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Whole-number value
    Integer(i64),
    /// Decimal value
    Real(f64),
    /// Anything that is not a recognisable number
    Text(String),
}

impl FieldValue {
    /// Infer the type of a raw textual value.
    pub fn infer(raw: &str) -> FieldValue {
        if integer_re().is_match(raw) {
            if let Ok(v) = raw.parse::<i64>() {
                return FieldValue::Integer(v);
            }
        }
        if real_re().is_match(raw) {
            if let Ok(v) = raw.parse::<f64>() {
                return FieldValue::Real(v);
            }
        }
        FieldValue::Text(raw.to_string())
    }

    /// Get as integer, returning None if not an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as a real number; integers widen to f64
    pub fn as_real(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Real(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    /// Get as text, returning None for numeric values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Render the value as it appears on the wire.
    ///
    /// A `Real` with no fractional part prints without a decimal point
    /// and therefore re-loads as an `Integer`; this is a documented
    /// lossy edge of the round-trip contract, not a bug. `f64`'s
    /// `Display` never uses exponent notation (that is `{:e}`), so a
    /// value produced by [`FieldValue::infer`] always re-matches one of
    /// the numeric patterns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Real(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// One parsed telemetry sample.
///
/// Immutable after parsing: filtering removes records from a log but
/// never alters one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    timestamp: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    fields: BTreeMap<char, FieldValue>,
}

impl TelemetryRecord {
    /// Build a record from an absolute timestamp and its typed fields.
    ///
    /// Returns `None` when the fields do not carry a numeric position
    /// (`X` and `Y`); such rows cannot take part in any geodesic
    /// operation and are rejected at the parsing layer.
    pub fn from_fields(
        timestamp: DateTime<Utc>,
        fields: BTreeMap<char, FieldValue>,
    ) -> Option<TelemetryRecord> {
        let longitude = fields.get(&CODE_LONGITUDE)?.as_real()?;
        let latitude = fields.get(&CODE_LATITUDE)?.as_real()?;
        Some(TelemetryRecord {
            timestamp,
            latitude,
            longitude,
            fields,
        })
    }

    /// Absolute time of the sample (log start + recorded offset).
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Latitude in degrees (wire code `Y`).
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees (wire code `X`).
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Position as a `(latitude, longitude)` pair.
    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// All typed fields, keyed by signal code.
    pub fn fields(&self) -> &BTreeMap<char, FieldValue> {
        &self.fields
    }

    /// Look up a single field by signal code.
    pub fn field(&self, code: char) -> Option<&FieldValue> {
        self.fields.get(&code)
    }

    /// Horizontal dilution of precision, when the fix reported one.
    pub fn hdop(&self) -> Option<f64> {
        self.field(CODE_HDOP)?.as_real()
    }

    /// Signed elapsed seconds from this record to `other`.
    pub fn seconds_to(&self, other: &TelemetryRecord) -> f64 {
        (other.timestamp - self.timestamp).num_milliseconds() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields(pairs: &[(char, FieldValue)]) -> BTreeMap<char, FieldValue> {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_value_inference() {
        assert_eq!(FieldValue::infer("42"), FieldValue::Integer(42));
        assert_eq!(FieldValue::infer("-7"), FieldValue::Integer(-7));
        assert_eq!(FieldValue::infer("3.25"), FieldValue::Real(3.25));
        assert_eq!(FieldValue::infer("-.5"), FieldValue::Real(-0.5));
        assert_eq!(
            FieldValue::infer("1.2.3"),
            FieldValue::Text("1.2.3".to_string())
        );
        assert_eq!(FieldValue::infer(""), FieldValue::Text(String::new()));
    }

    #[test]
    fn test_integer_widens_to_real() {
        assert_eq!(FieldValue::Integer(5).as_real(), Some(5.0));
        assert_eq!(FieldValue::Real(5.5).as_integer(), None);
    }

    #[test]
    fn test_record_requires_position() {
        let ts = Utc.with_ymd_and_hms(2011, 3, 14, 10, 32, 0).unwrap();
        let ok = fields(&[
            ('X', FieldValue::Real(18.07)),
            ('Y', FieldValue::Real(59.32)),
        ]);
        let record = TelemetryRecord::from_fields(ts, ok).unwrap();
        assert_eq!(record.position(), (59.32, 18.07));

        let missing = fields(&[('X', FieldValue::Real(18.07))]);
        assert!(TelemetryRecord::from_fields(ts, missing).is_none());

        let textual = fields(&[
            ('X', FieldValue::Text("n/a".to_string())),
            ('Y', FieldValue::Real(59.32)),
        ]);
        assert!(TelemetryRecord::from_fields(ts, textual).is_none());
    }

    #[test]
    fn test_wire_rendering() {
        assert_eq!(FieldValue::Integer(42).to_string(), "42");
        assert_eq!(FieldValue::Real(3.25).to_string(), "3.25");
        // Documented lossy edge: whole-valued reals print as integers.
        assert_eq!(FieldValue::Real(3.0).to_string(), "3");
    }

    #[test]
    fn test_tiny_reals_render_as_plain_decimals() {
        // Display on f64 never falls back to exponent notation, so
        // even very small values re-infer as Real, not Text.
        assert_eq!(FieldValue::Real(1e-7).to_string(), "0.0000001");
        assert_eq!(
            FieldValue::infer(&FieldValue::Real(1e-7).to_string()),
            FieldValue::Real(1e-7)
        );
        assert_eq!(FieldValue::Real(0.000012).to_string(), "0.000012");
    }
}
