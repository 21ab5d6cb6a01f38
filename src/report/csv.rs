//! CSV report generation

use crate::analyzer::DurationEntry;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, entries: &[DurationEntry]) -> io::Result<()> {
    // Header
    writeln!(
        writer,
        "status,filepath,length_bytes,duration,duration_secs,source,frames,error"
    )?;

    // Rows
    for e in entries {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            e.status,
            escape_csv(&e.file_path),
            opt(e.length_bytes),
            opt(e.duration.as_deref()),
            e.duration_secs.map(|s| format!("{:.3}", s)).unwrap_or_default(),
            opt(e.source),
            opt(e.frames),
            escape_csv(e.error.as_deref().unwrap_or("")),
        )?;
    }

    Ok(())
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
