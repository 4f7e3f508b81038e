//! Named, stable comparators over merged creatives
//!
//! Stability matters: callers rely on deterministic pagination across
//! re-sorts of equal-valued items, so ties always preserve relative input
//! order (`sort_by` is a stable sort).

use std::cmp::Ordering;

use crate::types::{MergedCreative, SortKey};

pub struct SortEngine;

impl SortEngine {
    pub fn sort(creatives: &mut [MergedCreative], key: SortKey) {
        creatives.sort_by(|a, b| Self::compare(a, b, key));
    }

    fn compare(a: &MergedCreative, b: &MergedCreative, key: SortKey) -> Ordering {
        match key {
            SortKey::CostDesc => b.total_spend.total_cmp(&a.total_spend),
            SortKey::CostAsc => a.total_spend.total_cmp(&b.total_spend),
            SortKey::DateDesc => b.last_updated.cmp(&a.last_updated),
            SortKey::DateAsc => a.last_updated.cmp(&b.last_updated),
            SortKey::NameAsc => compare_names(&a.creative_name, &b.creative_name),
            SortKey::NameDesc => compare_names(&b.creative_name, &a.creative_name),
        }
    }
}

/// Case-insensitive Unicode comparison, falling back to the raw string so
/// "a" and "A" still order deterministically
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_creative(id: &str, name: &str, day: u32, spend: f64) -> MergedCreative {
        MergedCreative {
            creative_id: id.into(),
            creative_name: name.into(),
            image_url: String::new(),
            account_names: String::new(),
            campaign_names: String::new(),
            history: Vec::new(),
            first_seen: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            last_updated: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            total_spend: spend,
            total_leads: 0.0,
            total_clicks: 0.0,
            ad_set_ids: Default::default(),
            delivery_status: None,
            workflow_status: None,
        }
    }

    fn ids(creatives: &[MergedCreative]) -> Vec<&str> {
        creatives.iter().map(|c| c.creative_id.as_str()).collect()
    }

    #[test]
    fn test_cost_desc() {
        let mut creatives = vec![
            make_creative("cr-1", "a", 1, 10.0),
            make_creative("cr-2", "b", 1, 30.0),
            make_creative("cr-3", "c", 1, 20.0),
        ];
        SortEngine::sort(&mut creatives, SortKey::CostDesc);
        assert_eq!(ids(&creatives), vec!["cr-2", "cr-3", "cr-1"]);
    }

    #[test]
    fn test_date_asc() {
        let mut creatives = vec![
            make_creative("cr-1", "a", 20, 0.0),
            make_creative("cr-2", "b", 5, 0.0),
        ];
        SortEngine::sort(&mut creatives, SortKey::DateAsc);
        assert_eq!(ids(&creatives), vec!["cr-2", "cr-1"]);
    }

    #[test]
    fn test_name_sort_case_insensitive() {
        let mut creatives = vec![
            make_creative("cr-1", "banner Z", 1, 0.0),
            make_creative("cr-2", "Banner a", 1, 0.0),
        ];
        SortEngine::sort(&mut creatives, SortKey::NameAsc);
        assert_eq!(ids(&creatives), vec!["cr-2", "cr-1"]);

        SortEngine::sort(&mut creatives, SortKey::NameDesc);
        assert_eq!(ids(&creatives), vec!["cr-1", "cr-2"]);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let mut creatives = vec![
            make_creative("cr-b", "same", 1, 5.0),
            make_creative("cr-a", "same", 1, 5.0),
            make_creative("cr-c", "same", 1, 5.0),
        ];
        SortEngine::sort(&mut creatives, SortKey::CostDesc);
        assert_eq!(ids(&creatives), vec!["cr-b", "cr-a", "cr-c"]);

        SortEngine::sort(&mut creatives, SortKey::NameAsc);
        assert_eq!(ids(&creatives), vec!["cr-b", "cr-a", "cr-c"]);
    }
}
