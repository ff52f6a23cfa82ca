//! # Sailtrace Core Library
//!
//! Core functionality for analysing telemetry captured during
//! autonomous-sailboat test runs.
//!
//! This library provides:
//! - Parsing of the boat's raw text log format into typed records
//! - Cleaning and filtering operators (strip, HDOP, step thinning)
//! - Stint segmentation (telling sailing apart from lingering)
//! - Summary statistics and geodesic math
//! - Read-only adapters for plotting, relational storage and KML export
//!
//! The engine is single-threaded and batch-oriented: it operates on a
//! complete, already-captured log exclusively owned by one analysis
//! session. Transports, dashboards, storage layers and command lines
//! live elsewhere and only consume the types exposed here.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sailtrace_core::log::RawLog;
//!
//! let mut log = RawLog::open("data/2011-03-14@10h32.log")?;
//! log.strip(5.0, 5.0);
//! log.filter_minimum_step_length(5.0);
//! let stints = log.stints(20.0, 120.0)?;
//! let stats = log.stats()?;
//! println!("{} stints, {:.0} m sailed", stints.len(), stats.dist_total);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod geo;
pub mod log;
pub mod record;
pub mod signals;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::TelemetryError;
    pub use crate::export::{write_kml, write_kml_to_path, TrackPoint};
    pub use crate::geo::{convert_from_si, orthodromic_distance, orthodromic_speed};
    pub use crate::log::{LogStats, RawLog, Stint, StripReport};
    pub use crate::record::{FieldValue, TelemetryRecord};
    pub use crate::signals::{SignalDictionary, SignalInfo};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
