// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub capture: CaptureOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Wait after a container shows up before hooking the row watcher.
    pub attach_delay_ms: u64,
    /// Wait after a row mutation before reading it.
    pub extract_delay_ms: u64,
    /// Visible history entries.
    pub max_logs: usize,
    /// Provenance tag stamped on every record, if any.
    pub source: Option<String>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            attach_delay_ms: ATTACH_DELAY_MS,
            extract_delay_ms: EXTRACT_DELAY_MS,
            max_logs: MAX_LOGS,
            source: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub dir: PathBuf,
    /// File name before `-<timestamp>.<ext>`
    pub stem: String,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            stem: s!(DEFAULT_EXPORT_STEM),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>-<timestamp>.<ext>`; `:` is not allowed in Windows file names.
    pub fn out_path(&self, timestamp: &str) -> PathBuf {
        let ts = timestamp.replace(':', "-");
        self.dir.join(join!(&self.stem, "-", &ts, ".", self.format.ext()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_path_uses_stem_timestamp_and_format() {
        let mut opts = ExportOptions::default();
        let p = opts.out_path("2026-10-17T08:30:00.000Z");
        assert_eq!(p, PathBuf::from("out").join("whatsAppExport-2026-10-17T08-30-00.000Z.csv"));

        opts.format = ExportFormat::Tsv;
        opts.stem = s!("contacts");
        assert!(opts.out_path("x").to_string_lossy().ends_with("contacts-x.tsv"));
    }

    #[test]
    fn format_parse_is_case_insensitive() {
        assert_eq!(ExportFormat::parse("TSV"), Some(ExportFormat::Tsv));
        assert_eq!(ExportFormat::parse("json"), None);
    }
}
