//! Output formatting and export.
//!
//! Results can be printed to stdout as plain text, JSON, or CSV, and
//! exported to a file whose extension picks the format.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{write_csv, CSV_HEADER};
pub use json_format::{read_json, write_json};
pub use plain::{print_error, print_success, print_warning, summary_lines, write_plain};

use crate::aggregator::ResultSet;
use crate::error::{ExportError, ExportResult};
use crate::invoke::ScanReport;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Output format for stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

/// File export format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// `.json` or `.csv` (case-insensitive); anything else is unsupported.
    pub fn from_path(path: &Path) -> ExportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(ExportError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Write `results` to `path` in the format its extension names.
pub fn export_to_path(results: &ResultSet, path: &Path) -> ExportResult<()> {
    let format = ExportFormat::from_path(path)?;
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    match format {
        ExportFormat::Json => write_json(results, &mut writer)?,
        ExportFormat::Csv => write_csv(results, &mut writer)?,
    }
    writer.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), count = results.len(), "exported results");
    Ok(())
}

/// Print a finished report to stdout in the requested format.
pub fn print_report(report: &ScanReport, format: OutputFormat) -> ExportResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Plain => write_plain(report, &mut out).map_err(|source| ExportError::Io {
            path: "<stdout>".into(),
            source,
        })?,
        OutputFormat::Json => {
            write_json(&report.results, &mut out)?;
            writeln!(out).map_err(|source| ExportError::Io {
                path: "<stdout>".into(),
                source,
            })?;
        }
        OutputFormat::Csv => write_csv(&report.results, &mut out)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanResult;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("out.json")).unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("OUT.CSV")).unwrap(), ExportFormat::Csv);
        assert!(matches!(
            ExportFormat::from_path(Path::new("out.txt")),
            Err(ExportError::UnsupportedFormat(_))
        ));
        assert!(ExportFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_export_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let results = ResultSet::from(vec![
            ScanResult::new("127.0.0.1", 22, "SSH", "SSH-2.0-OpenSSH"),
            ScanResult::new("127.0.0.1", 9999, "Unknown", ""),
        ]);

        export_to_path(&results, &path).unwrap();
        let parsed = read_json(File::open(&path).unwrap()).unwrap();
        assert_eq!(parsed.sorted(), results.sorted());
    }

    #[test]
    fn test_export_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let results = ResultSet::from(vec![ScanResult::new("127.0.0.1", 80, "HTTP", "")]);

        export_to_path(&results, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "ip,port,service,banner\n127.0.0.1,80,HTTP,\n");
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let path = PathBuf::from("/nonexistent-dir/definitely/results.json");
        let err = export_to_path(&ResultSet::default(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
