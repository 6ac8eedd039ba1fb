// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;

/// ISO-8601 UTC, millisecond precision (`2026-10-17T08:30:00.000Z`).
pub fn export_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Write sink output (header row first) to `<dir>/<stem>-<timestamp>.<ext>`.
/// Returns the final path written to.
pub fn write_export(
    export: &ExportOptions,
    data: &[Vec<String>],
    timestamp: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export.out_path(timestamp);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(data, export.include_headers, export.format.delim());
    fs::write(&path, contents)?;
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
