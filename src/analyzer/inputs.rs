//! Expanding command-line paths into the list of files to analyze

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Files are taken as given; directories are expanded to the files inside
/// whose extension matches one of `extensions` (case-insensitive), sorted.
pub fn collect_inputs<P: AsRef<Path>>(
    paths: &[P],
    extensions: &[String],
    recursive: bool,
) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            let mut found = Vec::new();
            walk_dir(path, extensions, recursive, &mut found)?;
            found.sort();
            debug!("{}: {} matching files", path.display(), found.len());
            files.extend(found);
        } else {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn walk_dir(
    dir: &Path,
    extensions: &[String],
    recursive: bool,
    out: &mut Vec<PathBuf>,
) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                walk_dir(&path, extensions, recursive, out)?;
            }
        } else if has_extension(&path, extensions) {
            out.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    extensions.iter().any(|wanted| wanted.to_lowercase() == ext)
}
