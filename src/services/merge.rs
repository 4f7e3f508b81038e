//! Creative aggregation: raw export rows → merged creatives

use std::collections::HashMap;

use crate::services::metrics;
use crate::types::{push_unique, HistoryEntry, MergedCreative, RawRecord};

/// Result of one aggregation pass over the raw collection
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Sorted by total spend descending (first-seen order on ties)
    pub creatives: Vec<MergedCreative>,
    /// Rows excluded for lacking a creative identifier
    pub dropped_rows: u64,
}

/// Groups raw rows into per-creative aggregates
pub struct CreativeAggregator;

impl CreativeAggregator {
    /// Merge an ordered collection of raw records.
    ///
    /// Each aggregation pass recomputes from the complete collection; prior
    /// aggregates are never mutated incrementally.
    pub fn merge(records: &[RawRecord]) -> MergeOutcome {
        let mut by_id: HashMap<&str, MergedCreative> = HashMap::new();
        // First-seen key order, for deterministic output on spend ties
        let mut order: Vec<&str> = Vec::new();
        let mut dropped_rows = 0u64;

        for record in records {
            let Some(creative_id) = record.creative_id.as_deref() else {
                // No creative key: excluded from aggregation, but counted
                dropped_rows += 1;
                continue;
            };

            let creative = by_id.entry(creative_id).or_insert_with(|| {
                order.push(creative_id);
                Self::seed(creative_id, record)
            });
            Self::absorb(creative, record);
        }

        let mut creatives: Vec<MergedCreative> = order
            .into_iter()
            .filter_map(|id| by_id.remove(id))
            .collect();

        for creative in &mut creatives {
            creative.history.sort_by_key(|entry| entry.date);
        }

        // Stable: equal-spend creatives keep first-seen order
        creatives.sort_by(|a, b| b.total_spend.total_cmp(&a.total_spend));

        MergeOutcome {
            creatives,
            dropped_rows,
        }
    }

    /// Empty aggregate seeded from the first sighting of a key
    fn seed(creative_id: &str, record: &RawRecord) -> MergedCreative {
        MergedCreative {
            creative_id: creative_id.to_string(),
            creative_name: record.creative_name.clone(),
            image_url: record.image_url.clone(),
            account_names: String::new(),
            campaign_names: String::new(),
            history: Vec::new(),
            first_seen: record.date,
            last_updated: record.date,
            total_spend: 0.0,
            total_leads: 0.0,
            total_clicks: 0.0,
            ad_set_ids: Default::default(),
            delivery_status: None,
            workflow_status: None,
        }
    }

    /// Fold one record into its aggregate (runs on every sighting,
    /// including the first)
    fn absorb(creative: &mut MergedCreative, record: &RawRecord) {
        creative.history.push(HistoryEntry::from_record(record));
        creative.total_spend += record.cost;
        creative.total_leads += metrics::derived_leads(record.cost, record.cost_per_lead);
        creative.total_clicks += metrics::derived_clicks(record.cost, record.cost_per_click);
        creative.ad_set_ids.insert(record.ad_set_id.clone());
        push_unique(&mut creative.account_names, &record.account_name);
        push_unique(&mut creative.campaign_names, &record.campaign_name);
        creative.first_seen = creative.first_seen.min(record.date);
        creative.last_updated = creative.last_updated.max(record.date);
    }
}
