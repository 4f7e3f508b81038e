//! Filter criteria, sort keys, and facet types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DeliveryStatus, WorkflowStatus};

/// Date bucket a creative's last-updated timestamp is matched against.
///
/// Presets are evaluated against "now" in the engine's fixed civil offset;
/// `Range` bounds are inclusive local calendar days.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateBucket {
    #[default]
    All,
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    ThisYear,
    Range {
        from: NaiveDate,
        to: NaiveDate,
    },
}

/// Workflow-status filter: the literal statuses plus two virtual states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowFilter {
    Draft,
    Saved,
    Published,
    /// Virtual: workflow status equals "published"
    PublishedOnly,
    /// Virtual: workflow status absent or not "published"
    NotPublished,
}

impl WorkflowFilter {
    /// Whether a creative's (possibly absent) workflow status passes
    pub fn matches(&self, status: Option<WorkflowStatus>) -> bool {
        match self {
            WorkflowFilter::Draft => status == Some(WorkflowStatus::Draft),
            WorkflowFilter::Saved => status == Some(WorkflowStatus::Saved),
            WorkflowFilter::Published | WorkflowFilter::PublishedOnly => {
                status == Some(WorkflowStatus::Published)
            }
            WorkflowFilter::NotPublished => status != Some(WorkflowStatus::Published),
        }
    }
}

/// Named total-order comparators for the report view
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Total spend descending (default view order)
    #[default]
    CostDesc,
    CostAsc,
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
}

/// Independent, AND-combined filter criteria.
///
/// Multi-select semantics: `None` = unconstrained, `Some(vec![])` = match
/// nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Filters {
    pub search: String,
    pub date: DateBucket,
    pub accounts: Option<Vec<String>>,
    pub campaigns: Option<Vec<String>>,
    pub delivery: Option<DeliveryStatus>,
    pub workflow: Option<WorkflowFilter>,
}

/// Selectable values per filter dimension, scoped by every *other* active
/// dimension
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Facets {
    pub accounts: Vec<String>,
    pub campaigns: Vec<String>,
    pub delivery_statuses: Vec<DeliveryStatus>,
    pub workflow_statuses: Vec<WorkflowStatus>,
}
