//! Terminal report

use crate::analyzer::{DurationEntry, Status};
use crate::report::Summary;
use colored::Colorize;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, entries: &[DurationEntry]) -> io::Result<()> {
    for e in entries {
        match e.status {
            Status::Ok => writeln!(
                writer,
                "{} {}  {:>12} bytes  {}",
                "✓".green(),
                e.duration.as_deref().unwrap_or("--:--:--").bold(),
                e.length_bytes.unwrap_or_default(),
                e.file_path
            )?,
            Status::Error => writeln!(
                writer,
                "{} {}  {}",
                "✗".red(),
                e.file_path,
                e.error.as_deref().unwrap_or("unknown error").red()
            )?,
        }
    }

    let summary = Summary::from_entries(entries);
    writeln!(
        writer,
        "\n{} files, {} ok, {} failed, total {}",
        summary.total,
        summary.ok.to_string().green(),
        if summary.error > 0 {
            summary.error.to_string().red()
        } else {
            summary.error.to_string().normal()
        },
        summary.total_duration.to_string().bold()
    )
}
