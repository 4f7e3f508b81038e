//! Filter pipeline: independent, AND-combined predicate stages plus facet
//! computation
//!
//! Each stage is a pure predicate over one dimension; a creative must pass
//! every active stage to remain. Because the stages are independent, their
//! application order never affects the result.

use crate::services::bucketing::Bucketing;
use crate::types::{split_names, Facets, Filters, MergedCreative};

/// Filtered subset plus the reachable option values per dimension
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub creatives: Vec<MergedCreative>,
    pub facets: Facets,
}

pub struct FilterPipeline;

impl FilterPipeline {
    pub fn apply(
        creatives: &[MergedCreative],
        filters: &Filters,
        bucketing: &Bucketing,
    ) -> FilterResult {
        let filtered: Vec<MergedCreative> = creatives
            .iter()
            .filter(|c| Self::passes(c, filters, bucketing))
            .cloned()
            .collect();

        FilterResult {
            facets: Self::facets(creatives, filters, bucketing),
            creatives: filtered,
        }
    }

    /// AND of every stage
    pub fn passes(creative: &MergedCreative, filters: &Filters, bucketing: &Bucketing) -> bool {
        Self::passes_search(creative, &filters.search)
            && Self::passes_date(creative, filters, bucketing)
            && Self::passes_selection(&creative.account_names, filters.accounts.as_deref())
            && Self::passes_selection(&creative.campaign_names, filters.campaigns.as_deref())
            && Self::passes_status(creative, filters)
    }

    /// Case-insensitive substring match across account, campaign and
    /// creative names
    fn passes_search(creative: &MergedCreative, search: &str) -> bool {
        if search.is_empty() {
            return true;
        }
        let needle = search.to_lowercase();
        creative.account_names.to_lowercase().contains(&needle)
            || creative.campaign_names.to_lowercase().contains(&needle)
            || creative.creative_name.to_lowercase().contains(&needle)
    }

    /// Date bucket against the creative's last-updated timestamp
    fn passes_date(creative: &MergedCreative, filters: &Filters, bucketing: &Bucketing) -> bool {
        bucketing.matches(filters.date, creative.last_updated)
    }

    /// Multi-select: `None` = unconstrained; `Some([])` matches nothing;
    /// otherwise the split name list must intersect the selection
    fn passes_selection(joined: &str, selection: Option<&[String]>) -> bool {
        let Some(selected) = selection else {
            return true;
        };
        split_names(joined)
            .iter()
            .any(|name| selected.iter().any(|s| s == name))
    }

    /// Two independent sub-clauses (delivery, workflow); both must hold when
    /// both are set
    fn passes_status(creative: &MergedCreative, filters: &Filters) -> bool {
        let delivery_ok = match filters.delivery {
            None => true,
            Some(wanted) => creative.delivery_status == Some(wanted),
        };
        let workflow_ok = match filters.workflow {
            None => true,
            Some(filter) => filter.matches(creative.workflow_status),
        };
        delivery_ok && workflow_ok
    }

    /// Each facet list is computed against the collection filtered by every
    /// dimension except its own, so selecting in one dimension scopes the
    /// options shown for the others.
    fn facets(creatives: &[MergedCreative], filters: &Filters, bucketing: &Bucketing) -> Facets {
        let mut facets = Facets::default();

        let without_accounts = Filters {
            accounts: None,
            ..filters.clone()
        };
        let without_campaigns = Filters {
            campaigns: None,
            ..filters.clone()
        };
        let without_delivery = Filters {
            delivery: None,
            ..filters.clone()
        };
        let without_workflow = Filters {
            workflow: None,
            ..filters.clone()
        };

        for creative in creatives {
            if Self::passes(creative, &without_accounts, bucketing) {
                for name in creative.account_list() {
                    push_distinct(&mut facets.accounts, name.to_string());
                }
            }
            if Self::passes(creative, &without_campaigns, bucketing) {
                for name in creative.campaign_list() {
                    push_distinct(&mut facets.campaigns, name.to_string());
                }
            }
            if Self::passes(creative, &without_delivery, bucketing) {
                if let Some(status) = creative.delivery_status {
                    push_distinct(&mut facets.delivery_statuses, status);
                }
            }
            if Self::passes(creative, &without_workflow, bucketing) {
                if let Some(status) = creative.workflow_status {
                    push_distinct(&mut facets.workflow_statuses, status);
                }
            }
        }

        facets
    }
}

/// Append preserving first-encounter order, skipping duplicates
fn push_distinct<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}
