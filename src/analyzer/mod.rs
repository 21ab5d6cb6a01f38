pub mod inputs;

use crate::calculator::{DurationSource, Mp3DurationCalculator, ScanOptions};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

pub use inputs::collect_inputs;

/// Duration and size of a single file, ready to embed in generated output
#[derive(Debug, Clone, Serialize)]
pub struct DurationEntry {
    pub file_path: String,
    pub file_name: String,
    pub status: Status,
    pub length_bytes: Option<u64>,
    pub duration_secs: Option<f64>,
    #[serde(skip)]
    pub duration_nanos: Option<u64>,
    /// `HH:MM:SS`
    pub duration: Option<String>,
    pub source: Option<DurationSource>,
    pub frames: Option<u64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Error => write!(f, "ERROR"),
        }
    }
}

/// Runs the calculator over files, one at a time
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pub options: ScanOptions,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Analyze a single MP3 file.
    ///
    /// Failures are logged and recorded on the entry; duration and length
    /// are left out rather than guessed.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> DurationEntry {
        let path = path.as_ref();
        let file_path = path.display().to_string();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.clone());

        let scanned = Mp3DurationCalculator::from_path(path)
            .and_then(|calc| calc.with_options(self.options).calculate());

        let summary = match scanned {
            Ok(summary) => summary,
            Err(e) => {
                warn!("{}: {}", file_path, e);
                return DurationEntry::failed(file_path, file_name, e.to_string());
            }
        };

        // Byte length comes from a plain size query, not from the scan
        let length_bytes = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) => {
                warn!("{}: cannot read file size: {}", file_path, e);
                return DurationEntry::failed(
                    file_path,
                    file_name,
                    format!("cannot read file size: {}", e),
                );
            }
        };

        info!(
            "{}: {} ({} bytes, {})",
            file_path, summary.duration, length_bytes, summary.source
        );

        DurationEntry {
            file_path,
            file_name,
            status: Status::Ok,
            length_bytes: Some(length_bytes),
            duration_secs: Some(summary.duration.seconds()),
            duration_nanos: Some(summary.duration.as_nanos()),
            duration: Some(summary.duration.to_string()),
            source: Some(summary.source),
            frames: Some(summary.audio_frames),
            error: None,
        }
    }

    /// Analyze every path in order. One bad file never stops the batch.
    pub fn analyze_all<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<DurationEntry> {
        paths.iter().map(|p| self.analyze(p)).collect()
    }
}

impl DurationEntry {
    fn failed(file_path: String, file_name: String, error: String) -> Self {
        DurationEntry {
            file_path,
            file_name,
            status: Status::Error,
            length_bytes: None,
            duration_secs: None,
            duration_nanos: None,
            duration: None,
            source: None,
            frames: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
