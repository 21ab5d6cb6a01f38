pub mod csv;
pub mod json;
pub mod pretty;

use crate::analyzer::{DurationEntry, Status};
use crate::duration::Duration;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Pretty,
    Json,
    Csv,
}

impl Format {
    /// Guess the format from an output file's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Format::Json,
            "csv" => Format::Csv,
            _ => Format::Pretty,
        }
    }
}

pub fn write<W: Write>(
    writer: &mut W,
    format: Format,
    entries: &[DurationEntry],
) -> io::Result<()> {
    match format {
        Format::Pretty => pretty::write(writer, entries),
        Format::Json => json::write(writer, entries),
        Format::Csv => csv::write(writer, entries),
    }
}

/// Generate a report file, format inferred from the extension unless given
pub fn generate<P: AsRef<Path>>(
    path: P,
    format: Option<Format>,
    entries: &[DurationEntry],
) -> io::Result<()> {
    let path = path.as_ref();
    let format = format.unwrap_or_else(|| Format::from_path(path));
    let mut file = std::fs::File::create(path)?;
    write(&mut file, format, entries)
}

/// Summary statistics for a batch of entries
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub error: usize,
    /// Sum over the entries that have a duration
    pub total_duration: Duration,
}

impl Summary {
    pub fn from_entries(entries: &[DurationEntry]) -> Self {
        let mut summary = Self {
            total: entries.len(),
            ..Self::default()
        };

        for e in entries {
            match e.status {
                Status::Ok => summary.ok += 1,
                Status::Error => summary.error += 1,
            }
        }

        summary.total_duration = entries
            .iter()
            .filter_map(|e| e.duration_nanos)
            .map(|nanos| Duration::from_parts(0, nanos))
            .sum();

        summary
    }
}
