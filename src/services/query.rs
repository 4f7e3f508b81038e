//! Report engine: the explicit pipeline object
//!
//! Replaces the hidden module-level aggregate cache and reactive
//! recompute-on-every-change with a value the caller owns: aggregation is
//! memoized behind a fingerprint of the raw collection, and every query runs
//! aggregate → filter → sort → paginate in that order, nothing interleaved.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::services::bucketing::Bucketing;
use crate::services::filter::FilterPipeline;
use crate::services::merge::{CreativeAggregator, MergeOutcome};
use crate::services::paginate::{Page, Paginator};
use crate::services::sort::SortEngine;
use crate::services::status::{attach_statuses, StatusClassifier};
use crate::types::{
    DateBucket, DeliveryStatus, Facets, Filters, MergedCreative, RawRecord, SortKey,
    WorkflowFilter,
};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Filter + sort + pagination state with the view's page-reset rules baked
/// in: any change to filter criteria, sort key, or page size resets the
/// current page to 1; only a page-index change alone preserves position.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    filters: Filters,
    sort: SortKey,
    page_size: usize,
    page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            sort: SortKey::default(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl QueryState {
    pub fn new(filters: Filters, sort: SortKey, page_size: usize, page: usize) -> Self {
        Self {
            filters,
            sort,
            page_size: page_size.max(1),
            page: page.max(1),
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.page = 1;
    }

    pub fn set_date(&mut self, date: DateBucket) {
        self.filters.date = date;
        self.page = 1;
    }

    pub fn set_accounts(&mut self, accounts: Option<Vec<String>>) {
        self.filters.accounts = accounts;
        self.page = 1;
    }

    pub fn set_campaigns(&mut self, campaigns: Option<Vec<String>>) {
        self.filters.campaigns = campaigns;
        self.page = 1;
    }

    pub fn set_delivery(&mut self, delivery: Option<DeliveryStatus>) {
        self.filters.delivery = delivery;
        self.page = 1;
    }

    pub fn set_workflow(&mut self, workflow: Option<WorkflowFilter>) {
        self.filters.workflow = workflow;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// The one mutator that preserves position
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// One query's answer: the page plus the facet option lists
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub page: Page<MergedCreative>,
    pub facets: Facets,
    /// Rows excluded from aggregation for lacking a creative id
    pub dropped_rows: u64,
}

/// Owns the raw snapshot, the memoized aggregates, and the classifier seam
pub struct ReportEngine {
    records: Vec<RawRecord>,
    classifier: Box<dyn StatusClassifier>,
    bucketing: Bucketing,
    /// Fingerprint of the raw collection `aggregates` was computed from
    cached_fingerprint: Option<u64>,
    aggregates: MergeOutcome,
}

impl ReportEngine {
    pub fn new(
        records: Vec<RawRecord>,
        classifier: Box<dyn StatusClassifier>,
        bucketing: Bucketing,
    ) -> Self {
        Self {
            records,
            classifier,
            bucketing,
            cached_fingerprint: None,
            aggregates: MergeOutcome::default(),
        }
    }

    /// Replace the raw snapshot. The next query recomputes from scratch;
    /// there is no incremental consistency between cycles.
    pub fn set_records(&mut self, records: Vec<RawRecord>) {
        self.records = records;
    }

    pub fn bucketing(&self) -> &Bucketing {
        &self.bucketing
    }

    /// Recompute the cached aggregates when the raw fingerprint changed
    fn refresh(&mut self) {
        let fingerprint = fingerprint(&self.records);
        if self.cached_fingerprint == Some(fingerprint) {
            return;
        }

        let mut outcome = CreativeAggregator::merge(&self.records);
        attach_statuses(&mut outcome.creatives, self.classifier.as_ref());
        self.aggregates = outcome;
        self.cached_fingerprint = Some(fingerprint);
    }

    /// Aggregates for the current snapshot, recomputing only when the
    /// fingerprint changed
    pub fn aggregated(&mut self) -> &MergeOutcome {
        self.refresh();
        &self.aggregates
    }

    /// Ad-set rollups for the current snapshot (aggregation-cached like
    /// `query`)
    pub fn ad_sets(&mut self) -> Vec<crate::types::AdSet> {
        self.refresh();
        crate::services::adset::AdSetAggregator::build_all(
            &self.aggregates.creatives,
            self.classifier.as_ref(),
            &self.bucketing,
        )
    }

    /// Full pipeline: aggregate, then filter, then sort, then paginate
    pub fn query(&mut self, state: &QueryState) -> QueryOutput {
        self.refresh();
        let dropped_rows = self.aggregates.dropped_rows;

        let mut result =
            FilterPipeline::apply(&self.aggregates.creatives, state.filters(), &self.bucketing);
        SortEngine::sort(&mut result.creatives, state.sort());
        let page = Paginator::paginate(&result.creatives, state.page_size(), state.page());

        QueryOutput {
            page,
            facets: result.facets,
            dropped_rows,
        }
    }
}

/// Order-sensitive hash of the raw collection; any row change, addition, or
/// reorder invalidates the cached aggregates
fn fingerprint(records: &[RawRecord]) -> u64 {
    let mut hasher = DefaultHasher::new();
    records.len().hash(&mut hasher);
    for record in records {
        record.date.timestamp_millis().hash(&mut hasher);
        record.cost.to_bits().hash(&mut hasher);
        record.cost_per_lead.to_bits().hash(&mut hasher);
        record.cost_per_click.to_bits().hash(&mut hasher);
        record.account_name.hash(&mut hasher);
        record.campaign_name.hash(&mut hasher);
        record.campaign_status.hash(&mut hasher);
        record.creative_id.hash(&mut hasher);
        record.creative_name.hash(&mut hasher);
        record.image_url.hash(&mut hasher);
        record.ad_set_id.hash(&mut hasher);
        record.ad_id.hash(&mut hasher);
    }
    hasher.finish()
}
