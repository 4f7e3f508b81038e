//! Raw export rows and the validated ingestion boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One validated daily export row.
///
/// Immutable after ingestion; every numeric field has already been through
/// the permissive string parse, and the date is known-good.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub date: DateTime<Utc>,
    pub cost: f64,
    pub cost_per_lead: f64,
    pub cost_per_click: f64,
    pub account_name: String,
    pub campaign_name: String,
    pub campaign_status: String,
    /// Creative identifier; rows without one never reach aggregation
    pub creative_id: Option<String>,
    pub creative_name: String,
    pub image_url: String,
    pub ad_set_id: String,
    pub ad_id: String,
}

/// A RawRecord projected into a creative's timeline.
///
/// Never deduplicated by date: multiple ad sets contributing on the same day
/// each produce a separate entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub cost: f64,
    pub cost_per_lead: f64,
    pub cost_per_click: f64,
    /// Contributing ad-set id
    pub source: String,
}

impl HistoryEntry {
    pub fn from_record(record: &RawRecord) -> Self {
        Self {
            date: record.date,
            cost: record.cost,
            cost_per_lead: record.cost_per_lead,
            cost_per_click: record.cost_per_click,
            source: record.ad_set_id.clone(),
        }
    }
}

/// Why a raw row was quarantined at the ingestion boundary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum QuarantineReason {
    /// Date field missing or unparseable
    BadDate(String),
}

/// A row that failed validation, kept for accounting rather than dropped
#[derive(Debug, Clone, Serialize)]
pub struct QuarantinedRow {
    pub reason: QuarantineReason,
    /// Ad id of the offending row, if present (for operator follow-up)
    pub ad_id: Option<String>,
}

/// Outcome of ingesting one or more export files
#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<RawRecord>,
    pub quarantined: Vec<QuarantinedRow>,
}

impl IngestReport {
    pub fn merge(&mut self, other: IngestReport) {
        self.records.extend(other.records);
        self.quarantined.extend(other.quarantined);
    }
}
