//! Ad-set rollups, spotlight rankings, and daily time series

use std::collections::{BTreeMap, HashMap};

use crate::services::bucketing::Bucketing;
use crate::services::metrics;
use crate::services::status::StatusClassifier;
use crate::types::{
    AdSet, DailyPoint, DeliveryStatus, MergedCreative, Rollup, Spotlights, StatusCounts,
    WorkflowStatus,
};

/// A member creative's contribution to one ad set, summed from the history
/// entries sourced by that ad set
#[derive(Debug, Clone, Copy)]
struct MemberStats {
    spend: f64,
    leads: f64,
    clicks: f64,
}

/// Groups creative aggregates into ad-set rollups
pub struct AdSetAggregator;

impl AdSetAggregator {
    /// Build one ad set per ad-set id touched by the creatives.
    ///
    /// A creative belongs to every ad set in its touched set; its spend and
    /// series contribution to each is limited to the history entries that ad
    /// set sourced. Output order is first-touched in input order.
    pub fn build_all(
        creatives: &[MergedCreative],
        classifier: &dyn StatusClassifier,
        bucketing: &Bucketing,
    ) -> Vec<AdSet> {
        let mut order: Vec<&str> = Vec::new();
        let mut members: HashMap<&str, Vec<&MergedCreative>> = HashMap::new();

        for creative in creatives {
            for ad_set_id in &creative.ad_set_ids {
                let bucket = members.entry(ad_set_id.as_str()).or_insert_with(|| {
                    order.push(ad_set_id.as_str());
                    Vec::new()
                });
                bucket.push(creative);
            }
        }

        order
            .into_iter()
            .map(|ad_set_id| {
                Self::build(ad_set_id, &members[ad_set_id], classifier, bucketing)
            })
            .collect()
    }

    /// Build a single ad-set aggregate from its member creatives
    pub fn build(
        ad_set_id: &str,
        members: &[&MergedCreative],
        classifier: &dyn StatusClassifier,
        bucketing: &Bucketing,
    ) -> AdSet {
        let stats: Vec<MemberStats> = members
            .iter()
            .map(|m| Self::member_stats(m, ad_set_id))
            .collect();

        AdSet {
            ad_set_id: ad_set_id.to_string(),
            status_counts: Self::count_statuses(members, classifier),
            rollup: Self::rollup(&stats),
            spotlights: Self::spotlights(members, &stats),
            daily_series: Self::daily_series(members, ad_set_id, bucketing),
            creatives: members.iter().map(|m| (*m).clone()).collect(),
        }
    }

    fn member_stats(creative: &MergedCreative, ad_set_id: &str) -> MemberStats {
        let mut stats = MemberStats {
            spend: 0.0,
            leads: 0.0,
            clicks: 0.0,
        };
        for entry in creative.history.iter().filter(|e| e.source == ad_set_id) {
            stats.spend += entry.cost;
            stats.leads += metrics::derived_leads(entry.cost, entry.cost_per_lead);
            stats.clicks += metrics::derived_clicks(entry.cost, entry.cost_per_click);
        }
        stats
    }

    /// Each member lands in exactly one delivery bucket and one workflow
    /// bucket
    fn count_statuses(
        members: &[&MergedCreative],
        classifier: &dyn StatusClassifier,
    ) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for member in members {
            let classification = classifier.classify(member);
            match classification.delivery {
                DeliveryStatus::Active => counts.active += 1,
                DeliveryStatus::Paused => counts.paused += 1,
                DeliveryStatus::Inactive | DeliveryStatus::Unknown => {}
            }
            match classification.workflow {
                WorkflowStatus::Draft => counts.draft += 1,
                WorkflowStatus::Saved => counts.saved += 1,
                WorkflowStatus::Published | WorkflowStatus::None => {}
            }
        }
        counts
    }

    /// Cost-weighted ratio of sums. Averaging the members' individual CPL
    /// values would misstate overall efficiency when spend magnitudes differ.
    fn rollup(stats: &[MemberStats]) -> Rollup {
        let spend: f64 = stats.iter().map(|s| s.spend).sum();
        let leads: f64 = stats.iter().map(|s| s.leads).sum();
        let clicks: f64 = stats.iter().map(|s| s.clicks).sum();
        Rollup {
            spend,
            leads,
            clicks,
            cpl: metrics::cpl(spend, leads),
            cpc: metrics::cpc(spend, clicks),
        }
    }

    /// Four fixed best-in-category rankings. Ties: first-encountered in
    /// input order wins (strict comparisons against the current best).
    fn spotlights(members: &[&MergedCreative], stats: &[MemberStats]) -> Spotlights {
        let mut result = Spotlights::default();
        let mut best_cpl = f64::INFINITY;
        let mut best_spend = f64::NEG_INFINITY;
        let mut best_leads = f64::NEG_INFINITY;
        let mut best_clicks = f64::NEG_INFINITY;

        for (member, s) in members.iter().zip(stats) {
            // Zero-lead creatives are excluded from the CPL ranking, not
            // treated as CPL=0 or infinity
            if s.leads > 0.0 {
                let member_cpl = metrics::cpl(s.spend, s.leads);
                if member_cpl < best_cpl {
                    best_cpl = member_cpl;
                    result.top_performer = Some(member.creative_id.clone());
                }
            }
            if s.spend > best_spend {
                best_spend = s.spend;
                result.highest_spender = Some(member.creative_id.clone());
            }
            if s.leads > best_leads {
                best_leads = s.leads;
                result.most_leads = Some(member.creative_id.clone());
            }
            if s.clicks > best_clicks {
                best_clicks = s.clicks;
                result.most_clicks = Some(member.creative_id.clone());
            }
        }
        result
    }

    /// Flatten member histories, bucket by local calendar day, then compute
    /// per-day CPL/CPC from the daily sums (same weighted rule as the
    /// rollup). Ascending by date.
    fn daily_series(
        members: &[&MergedCreative],
        ad_set_id: &str,
        bucketing: &Bucketing,
    ) -> Vec<DailyPoint> {
        let mut days: BTreeMap<chrono::NaiveDate, (f64, f64, f64)> = BTreeMap::new();

        for member in members {
            for entry in member.history.iter().filter(|e| e.source == ad_set_id) {
                let day = days.entry(bucketing.local_date(entry.date)).or_default();
                day.0 += entry.cost;
                day.1 += metrics::derived_leads(entry.cost, entry.cost_per_lead);
                day.2 += metrics::derived_clicks(entry.cost, entry.cost_per_click);
            }
        }

        days.into_iter()
            .map(|(date, (spend, leads, clicks))| DailyPoint {
                date,
                spend,
                leads,
                clicks,
                cpl: metrics::cpl(spend, leads),
                cpc: metrics::cpc(spend, clicks),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Classification, HistoryEntry};
    use chrono::{FixedOffset, TimeZone, Utc};

    /// Fixed classifier for tests; the engine never computes these itself
    struct FixedClassifier(Classification);

    impl StatusClassifier for FixedClassifier {
        fn classify(&self, _creative: &MergedCreative) -> Classification {
            self.0
        }
    }

    fn active_draft() -> FixedClassifier {
        FixedClassifier(Classification {
            delivery: DeliveryStatus::Active,
            workflow: WorkflowStatus::Draft,
        })
    }

    fn utc_bucketing() -> Bucketing {
        Bucketing::with_now(
            FixedOffset::east_opt(0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap(),
        )
    }

    fn make_creative(id: &str, entries: Vec<(u32, f64, f64, f64)>) -> MergedCreative {
        // entries: (day, cost, cost_per_lead, cost_per_click), all on ad set "as-1"
        let history: Vec<HistoryEntry> = entries
            .iter()
            .map(|(day, cost, cpl, cpc)| HistoryEntry {
                date: Utc.with_ymd_and_hms(2024, 3, *day, 12, 0, 0).unwrap(),
                cost: *cost,
                cost_per_lead: *cpl,
                cost_per_click: *cpc,
                source: "as-1".into(),
            })
            .collect();
        let total_spend = history.iter().map(|h| h.cost).sum();
        MergedCreative {
            creative_id: id.into(),
            creative_name: id.into(),
            image_url: String::new(),
            account_names: "Acme".into(),
            campaign_names: "Spring".into(),
            history,
            first_seen: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            last_updated: Utc.with_ymd_and_hms(2024, 3, 28, 0, 0, 0).unwrap(),
            total_spend,
            total_leads: 0.0,
            total_clicks: 0.0,
            ad_set_ids: std::collections::BTreeSet::from(["as-1".to_string()]),
            delivery_status: None,
            workflow_status: None,
        }
    }

    #[test]
    fn test_rollup_is_ratio_of_sums_not_mean_of_ratios() {
        // B: spend=100, cpl_ratio=20 → 5 leads; C: spend=300, cpl_ratio=30 → 10 leads
        let b = make_creative("cr-b", vec![(1, 100.0, 20.0, 0.0)]);
        let c = make_creative("cr-c", vec![(2, 300.0, 30.0, 0.0)]);

        let ad_set =
            AdSetAggregator::build("as-1", &[&b, &c], &active_draft(), &utc_bucketing());

        // ratio of sums: 400 / 15 = 26.67, not mean(20, 30) = 25
        assert!((ad_set.rollup.cpl - 400.0 / 15.0).abs() < 1e-9);
        assert!((ad_set.rollup.cpl - 25.0).abs() > 1.0);
    }

    #[test]
    fn test_spotlights_scenario_d_zero_lead_excluded() {
        // A: no leads; B: 5 leads @ CPL 20; C: 10 leads @ CPL 30
        let a = make_creative("cr-a", vec![(1, 50.0, 0.0, 0.0)]);
        let b = make_creative("cr-b", vec![(1, 100.0, 20.0, 0.0)]);
        let c = make_creative("cr-c", vec![(1, 300.0, 30.0, 0.0)]);

        let ad_set =
            AdSetAggregator::build("as-1", &[&a, &b, &c], &active_draft(), &utc_bucketing());

        assert_eq!(ad_set.spotlights.top_performer.as_deref(), Some("cr-b"));
        assert_eq!(ad_set.spotlights.highest_spender.as_deref(), Some("cr-c"));
        assert_eq!(ad_set.spotlights.most_leads.as_deref(), Some("cr-c"));
    }

    #[test]
    fn test_spotlights_all_zero_leads_no_top_performer() {
        let a = make_creative("cr-a", vec![(1, 50.0, 0.0, 0.0)]);

        let ad_set =
            AdSetAggregator::build("as-1", &[&a], &active_draft(), &utc_bucketing());

        assert!(ad_set.spotlights.top_performer.is_none());
        assert_eq!(ad_set.spotlights.highest_spender.as_deref(), Some("cr-a"));
    }

    #[test]
    fn test_spotlights_tie_first_encountered_wins() {
        let first = make_creative("cr-first", vec![(1, 100.0, 25.0, 0.0)]);
        let second = make_creative("cr-second", vec![(1, 100.0, 25.0, 0.0)]);

        let ad_set = AdSetAggregator::build(
            "as-1",
            &[&first, &second],
            &active_draft(),
            &utc_bucketing(),
        );

        assert_eq!(ad_set.spotlights.top_performer.as_deref(), Some("cr-first"));
        assert_eq!(
            ad_set.spotlights.highest_spender.as_deref(),
            Some("cr-first")
        );
    }

    #[test]
    fn test_status_counts() {
        struct ById;
        impl StatusClassifier for ById {
            fn classify(&self, creative: &MergedCreative) -> Classification {
                if creative.creative_id == "cr-a" {
                    Classification {
                        delivery: DeliveryStatus::Active,
                        workflow: WorkflowStatus::Saved,
                    }
                } else {
                    Classification {
                        delivery: DeliveryStatus::Paused,
                        workflow: WorkflowStatus::Draft,
                    }
                }
            }
        }

        let a = make_creative("cr-a", vec![(1, 1.0, 0.0, 0.0)]);
        let b = make_creative("cr-b", vec![(1, 1.0, 0.0, 0.0)]);

        let ad_set = AdSetAggregator::build("as-1", &[&a, &b], &ById, &utc_bucketing());

        assert_eq!(ad_set.status_counts.active, 1);
        assert_eq!(ad_set.status_counts.paused, 1);
        assert_eq!(ad_set.status_counts.saved, 1);
        assert_eq!(ad_set.status_counts.draft, 1);
    }

    #[test]
    fn test_daily_series_sums_then_derives() {
        // Two creatives on the same day: cpl must come from the daily sums
        let a = make_creative("cr-a", vec![(1, 100.0, 20.0, 0.0)]); // 5 leads
        let b = make_creative("cr-b", vec![(1, 300.0, 30.0, 0.0), (2, 60.0, 0.0, 3.0)]);

        let ad_set =
            AdSetAggregator::build("as-1", &[&a, &b], &active_draft(), &utc_bucketing());

        assert_eq!(ad_set.daily_series.len(), 2);
        let day1 = &ad_set.daily_series[0];
        assert_eq!(day1.spend, 400.0);
        assert_eq!(day1.leads, 15.0);
        assert!((day1.cpl - 400.0 / 15.0).abs() < 1e-9);

        let day2 = &ad_set.daily_series[1];
        assert_eq!(day2.spend, 60.0);
        assert_eq!(day2.clicks, 20.0);
        assert_eq!(day2.cpc, 3.0);
        assert!(day1.date < day2.date);
    }

    #[test]
    fn test_build_all_splits_by_source_ad_set() {
        // One creative contributing to two ad sets; spend must split by source
        let mut creative = make_creative("cr-a", vec![(1, 100.0, 0.0, 0.0)]);
        creative.history.push(HistoryEntry {
            date: Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap(),
            cost: 40.0,
            cost_per_lead: 0.0,
            cost_per_click: 0.0,
            source: "as-2".into(),
        });
        creative.ad_set_ids.insert("as-2".to_string());

        let ad_sets =
            AdSetAggregator::build_all(&[creative], &active_draft(), &utc_bucketing());

        assert_eq!(ad_sets.len(), 2);
        let by_id: std::collections::HashMap<_, _> = ad_sets
            .iter()
            .map(|a| (a.ad_set_id.as_str(), a.rollup.spend))
            .collect();
        assert_eq!(by_id["as-1"], 100.0);
        assert_eq!(by_id["as-2"], 40.0);
    }
}
