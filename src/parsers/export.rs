//! Daily JSON export parser
//!
//! Each export file is a JSON array of denormalized daily rows with
//! string-typed numerics. Numeric fields parse permissively (malformed → 0);
//! a row with a missing or unparseable date is quarantined rather than
//! allowed to poison downstream date arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::ExportSource;
use crate::types::{
    CreatrackError, IngestReport, QuarantineReason, QuarantinedRow, RawRecord, Result,
};

/// One wire-format row, borrowed straight out of the file buffer
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    date: Option<&'a str>,
    cost: Option<&'a str>,
    cost_per_website_lead: Option<&'a str>,
    cost_per_link_click: Option<&'a str>,
    account_name: Option<&'a str>,
    campaign_name: Option<&'a str>,
    campaign_status: Option<&'a str>,
    image_asset_id: Option<&'a str>,
    image_asset_name: Option<&'a str>,
    image_url: Option<&'a str>,
    ad_set_id: Option<&'a str>,
    ad_id: Option<&'a str>,
}

/// Parser for the daily ad-performance export
pub struct DailyExportParser {
    data_dir: PathBuf,
}

impl DailyExportParser {
    /// Create a parser with the default data directory
    /// (`~/.creatrack/exports`)
    pub fn new() -> Self {
        let home = directories::BaseDirs::new()
            .map(|d| d.home_dir().to_path_buf())
            .unwrap_or_else(|| {
                eprintln!("[creatrack] Warning: Could not determine home directory");
                PathBuf::from(".")
            });
        Self {
            data_dir: home.join(".creatrack").join("exports"),
        }
    }

    /// Create a parser with a custom data directory
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Convert one wire row into a validated record or a quarantine entry
    fn convert(row: &ExportRow) -> std::result::Result<RawRecord, QuarantinedRow> {
        let date = match row.date.and_then(parse_timestamp) {
            Some(date) => date,
            None => {
                return Err(QuarantinedRow {
                    reason: QuarantineReason::BadDate(row.date.unwrap_or("").to_string()),
                    ad_id: row.ad_id.map(String::from),
                })
            }
        };

        Ok(RawRecord {
            date,
            cost: permissive_number(row.cost),
            cost_per_lead: permissive_number(row.cost_per_website_lead),
            cost_per_click: permissive_number(row.cost_per_link_click),
            account_name: row.account_name.unwrap_or("").to_string(),
            campaign_name: row.campaign_name.unwrap_or("").to_string(),
            campaign_status: row.campaign_status.unwrap_or("").to_string(),
            creative_id: row
                .image_asset_id
                .filter(|id| !id.is_empty())
                .map(String::from),
            creative_name: row.image_asset_name.unwrap_or("").to_string(),
            image_url: row.image_url.unwrap_or("").to_string(),
            ad_set_id: row.ad_set_id.unwrap_or("").to_string(),
            ad_id: row.ad_id.unwrap_or("").to_string(),
        })
    }
}

impl Default for DailyExportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportSource for DailyExportParser {
    fn name(&self) -> &str {
        "daily-export"
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn file_pattern(&self) -> &str {
        "*.json"
    }

    fn parse_file(&self, path: &Path) -> Result<IngestReport> {
        let mut bytes = std::fs::read(path)?;

        let rows: Vec<ExportRow> = simd_json::from_slice(&mut bytes)
            .map_err(|e| CreatrackError::Parse(format!("{}: {}", path.display(), e)))?;

        let mut report = IngestReport::default();
        for row in &rows {
            match Self::convert(row) {
                Ok(record) => report.records.push(record),
                Err(quarantined) => report.quarantined.push(quarantined),
            }
        }
        Ok(report)
    }
}

/// Permissive numeric-string parse: absent or malformed → 0.0, never an
/// error and never a non-finite value
fn permissive_number(value: Option<&str>) -> f64 {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Accept RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC)
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
