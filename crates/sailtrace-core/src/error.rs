//! Error types for telemetry log analysis

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or analysing a telemetry log
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The source identifier does not encode a capture start time.
    #[error("source '{0}' does not encode a start time (expected YYYY-MM-DD@HHhMM)")]
    SourceNaming(String),

    /// A textual source could not be turned into any usable record.
    #[error("parse error in '{source_name}': {message}")]
    Parse {
        /// Name of the offending source
        source_name: String,
        /// Human-readable description of the failure
        message: String,
    },

    /// A speed or average was requested over zero elapsed time.
    #[error("zero elapsed time between records; speed is ill-posed")]
    DegenerateInterval,

    /// An operation needs more records than the log holds.
    #[error("operation needs at least {needed} records, log has {got}")]
    InsufficientData {
        /// Minimum record count required
        needed: usize,
        /// Records actually present
        got: usize,
    },

    /// An unknown unit system or dimension was requested.
    #[error("unknown {kind}: '{value}'")]
    Configuration {
        /// What kind of setting was unrecognised
        kind: &'static str,
        /// The offending value
        value: String,
    },

    /// A source or destination could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The offending path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}
