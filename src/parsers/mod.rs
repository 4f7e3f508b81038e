//! Ingestion boundary: export files → validated raw records

mod export;

pub use export::DailyExportParser;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::types::{IngestReport, Result};

/// A source of daily export files
pub trait ExportSource: Send + Sync {
    /// Source name (e.g. "daily-export")
    fn name(&self) -> &str;

    /// Directory to scan for export files
    fn data_dir(&self) -> PathBuf;

    /// Glob pattern for finding export files (e.g. "*.json")
    fn file_pattern(&self) -> &str;

    /// Parse a single file into validated records + quarantined rows
    fn parse_file(&self, path: &Path) -> Result<IngestReport>;

    /// Collect all files matching the glob pattern
    fn collect_files(&self) -> Vec<PathBuf> {
        let pattern = self.data_dir().join(self.file_pattern());
        glob::glob(&pattern.to_string_lossy())
            .map(|paths| paths.filter_map(|e| e.ok()).collect())
            .unwrap_or_default()
    }

    /// Parse all files in parallel; unreadable files are warned about and
    /// skipped, never fatal
    fn parse_all(&self) -> IngestReport {
        let files = self.collect_files();

        let reports: Vec<IngestReport> = files
            .par_iter()
            .filter_map(|path| match self.parse_file(path) {
                Ok(report) => Some(report),
                Err(e) => {
                    eprintln!(
                        "[creatrack] Warning: {} failed on {}: {}",
                        self.name(),
                        path.display(),
                        e
                    );
                    None
                }
            })
            .collect();

        let mut merged = IngestReport::default();
        for report in reports {
            merged.merge(report);
        }
        merged
    }
}
