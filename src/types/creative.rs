//! Merged creative aggregate and status enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::HistoryEntry;

/// Delimiter for the joined account/campaign name lists
pub const NAME_DELIMITER: &str = ", ";

/// Delivery state reported by the ad platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Active,
    Paused,
    Inactive,
    Unknown,
}

/// Workflow state from the saved/published registry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Draft,
    Saved,
    Published,
    None,
}

/// Classification attached to a creative by the external status collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub delivery: DeliveryStatus,
    pub workflow: WorkflowStatus,
}

/// Deduplicated aggregate of all raw rows sharing one creative identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MergedCreative {
    pub creative_id: String,
    pub creative_name: String,
    pub image_url: String,
    /// Delimiter-joined, first-seen order, deduped by exact string
    pub account_names: String,
    /// Delimiter-joined, first-seen order, deduped by exact string
    pub campaign_names: String,
    /// Ascending by date; same-day entries from different ad sets all kept
    pub history: Vec<HistoryEntry>,
    pub first_seen: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    /// Exact sum of history cost
    pub total_spend: f64,
    /// Sum of per-entry reconstructed lead counts (approximation, see metrics)
    pub total_leads: f64,
    /// Sum of per-entry reconstructed click counts
    pub total_clicks: f64,
    pub ad_set_ids: BTreeSet<String>,
    /// Attached after aggregation by the status collaborator
    pub delivery_status: Option<DeliveryStatus>,
    pub workflow_status: Option<WorkflowStatus>,
}

impl MergedCreative {
    /// Individual account names, split back out of the joined field
    pub fn account_list(&self) -> Vec<&str> {
        split_names(&self.account_names)
    }

    /// Individual campaign names
    pub fn campaign_list(&self) -> Vec<&str> {
        split_names(&self.campaign_names)
    }
}

/// Split a delimiter-joined name list into its segments
pub fn split_names(joined: &str) -> Vec<&str> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(NAME_DELIMITER).collect()
}

/// Append `name` to a joined list unless an exact (case-sensitive) segment
/// already matches.
pub fn push_unique(joined: &mut String, name: &str) {
    if name.is_empty() {
        return;
    }
    if split_names(joined).iter().any(|existing| *existing == name) {
        return;
    }
    if joined.is_empty() {
        joined.push_str(name);
    } else {
        joined.push_str(NAME_DELIMITER);
        joined.push_str(name);
    }
}
