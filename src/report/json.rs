//! JSON report generation

use crate::analyzer::DurationEntry;
use crate::report::Summary;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: JsonSummary,
    files: &'a [DurationEntry],
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    ok: usize,
    error: usize,
    total_duration_secs: f64,
    total_duration: String,
}

pub fn write<W: Write>(writer: &mut W, entries: &[DurationEntry]) -> io::Result<()> {
    let summary = Summary::from_entries(entries);

    let report = JsonReport {
        generated: chrono::Utc::now().to_rfc3339(),
        summary: JsonSummary {
            total: summary.total,
            ok: summary.ok,
            error: summary.error,
            total_duration_secs: summary.total_duration.seconds(),
            total_duration: summary.total_duration.to_string(),
        },
        files: entries,
    };

    let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;

    writer.write_all(json.as_bytes())?;
    writeln!(writer)
}
