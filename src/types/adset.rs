//! Ad-set rollup aggregate

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MergedCreative;

/// Per-status member counts for an ad set
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub active: u32,
    pub paused: u32,
    pub draft: u32,
    pub saved: u32,
}

/// Cost-weighted efficiency rollup across an ad set's members.
///
/// CPL/CPC are ratios of sums (total spend over total derived counts), never
/// the mean of per-creative ratios.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rollup {
    pub spend: f64,
    pub leads: f64,
    pub clicks: f64,
    pub cpl: f64,
    pub cpc: f64,
}

/// Best-in-category creative ids; a category is None when no member qualifies
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Spotlights {
    /// Minimum CPL among members with strictly positive derived leads
    pub top_performer: Option<String>,
    pub highest_spender: Option<String>,
    pub most_leads: Option<String>,
    pub most_clicks: Option<String>,
}

/// One calendar day of an ad set's time series (local civil day)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub spend: f64,
    pub leads: f64,
    pub clicks: f64,
    pub cpl: f64,
    pub cpc: f64,
}

/// Aggregate of creatives sharing one ad-set identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdSet {
    pub ad_set_id: String,
    pub creatives: Vec<MergedCreative>,
    pub status_counts: StatusCounts,
    pub rollup: Rollup,
    pub spotlights: Spotlights,
    /// Ascending by date
    pub daily_series: Vec<DailyPoint>,
}
