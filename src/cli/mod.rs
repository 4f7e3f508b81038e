use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::parsers::{DailyExportParser, ExportSource};
use crate::services::{
    Bucketing, QueryState, RegistryClassifier, ReportEngine, StatusClassifier,
};
use crate::types::{DateBucket, DeliveryStatus, Filters, RawRecord, SortKey, WorkflowFilter};

/// Creative performance reports over the daily ad export
#[derive(Parser)]
#[command(name = "creatrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filtered, sorted, paginated creative report (default)
    Creatives {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Ad-set rollups with spotlight rankings and daily series
    Adsets {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Dataset totals and ingestion accounting
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        data: DataArgs,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Directory of daily export files (default: ~/.creatrack/exports)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Fixed civil UTC offset in whole hours for date bucketing
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    utc_offset: i32,

    /// JSON file with saved/published/draft creative id registries
    #[arg(long)]
    registry: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum)]
enum DatePreset {
    All,
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

#[derive(Args)]
struct QueryArgs {
    /// Case-insensitive substring over account, campaign and creative names
    #[arg(long, default_value = "")]
    search: String,

    /// Date bucket preset
    #[arg(long, value_enum, default_value = "all", conflicts_with_all = ["from", "to"])]
    date: DatePreset,

    /// Custom range start (local calendar day, inclusive)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Custom range end (local calendar day, inclusive)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Account filter; repeat to select several
    #[arg(long = "account")]
    accounts: Vec<String>,

    /// Campaign filter; repeat to select several
    #[arg(long = "campaign")]
    campaigns: Vec<String>,

    /// Delivery-status filter
    #[arg(long, value_enum)]
    delivery: Option<DeliveryStatus>,

    /// Workflow-status filter (includes published-only / not-published)
    #[arg(long, value_enum)]
    workflow: Option<WorkflowFilter>,

    /// Sort key
    #[arg(long, value_enum, default_value = "cost-desc")]
    sort: SortKey,

    /// 1-based page index
    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = 20)]
    page_size: usize,
}

impl QueryArgs {
    fn into_state(self) -> QueryState {
        let date = match (self.from, self.to) {
            (Some(from), Some(to)) => DateBucket::Range { from, to },
            _ => match self.date {
                DatePreset::All => DateBucket::All,
                DatePreset::Today => DateBucket::Today,
                DatePreset::Yesterday => DateBucket::Yesterday,
                DatePreset::ThisWeek => DateBucket::ThisWeek,
                DatePreset::ThisMonth => DateBucket::ThisMonth,
                DatePreset::ThisYear => DateBucket::ThisYear,
            },
        };

        let filters = Filters {
            search: self.search,
            date,
            // Absent flags mean unconstrained, not match-nothing
            accounts: (!self.accounts.is_empty()).then_some(self.accounts),
            campaigns: (!self.campaigns.is_empty()).then_some(self.campaigns),
            delivery: self.delivery,
            workflow: self.workflow,
        };

        QueryState::new(filters, self.sort, self.page_size, self.page)
    }
}

/// Optional registry file shape: the saved/published collaborator's export
#[derive(Default, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    published: HashSet<String>,
    #[serde(default)]
    saved: HashSet<String>,
    #[serde(default)]
    drafts: HashSet<String>,
}

#[derive(Serialize)]
struct StatsOutput {
    rows_ingested: usize,
    rows_quarantined: usize,
    rows_dropped_no_creative_id: u64,
    creatives: usize,
    ad_sets: usize,
    total_spend: f64,
    total_leads: f64,
    total_clicks: f64,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => Self::run_creatives(false, DataArgs::default_args(), None),
            Some(Commands::Creatives { json, data, query }) => {
                Self::run_creatives(json, data, Some(query))
            }
            Some(Commands::Adsets { json, data }) => Self::run_adsets(json, data),
            Some(Commands::Stats { json, data }) => Self::run_stats(json, data),
        }
    }

    fn run_creatives(json: bool, data: DataArgs, query: Option<QueryArgs>) -> anyhow::Result<()> {
        let (mut engine, _) = build_engine(&data)?;
        let state = query.map(QueryArgs::into_state).unwrap_or_default();
        let output = engine.query(&state);

        if json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "page {}/{} ({} creatives, {} rows dropped without creative id)",
                output.page.page,
                output.page.page_count,
                output.page.total,
                output.dropped_rows
            );
            for creative in &output.page.items {
                println!(
                    "{:<24} {:<32} spend {:>10.2}  leads {:>8.1}  clicks {:>8.1}",
                    creative.creative_id,
                    creative.creative_name,
                    creative.total_spend,
                    creative.total_leads,
                    creative.total_clicks
                );
            }
        }
        Ok(())
    }

    fn run_adsets(json: bool, data: DataArgs) -> anyhow::Result<()> {
        let (mut engine, _) = build_engine(&data)?;
        let ad_sets = engine.ad_sets();

        if json {
            println!("{}", serde_json::to_string_pretty(&ad_sets)?);
        } else {
            for ad_set in &ad_sets {
                println!(
                    "{:<24} {} creatives  spend {:>10.2}  CPL {:>8.2}  CPC {:>8.2}",
                    ad_set.ad_set_id,
                    ad_set.creatives.len(),
                    ad_set.rollup.spend,
                    ad_set.rollup.cpl,
                    ad_set.rollup.cpc
                );
                if let Some(top) = &ad_set.spotlights.top_performer {
                    println!("  top performer: {top}");
                }
            }
        }
        Ok(())
    }

    fn run_stats(json: bool, data: DataArgs) -> anyhow::Result<()> {
        let (mut engine, rows_quarantined) = build_engine(&data)?;
        let ad_sets = engine.ad_sets().len();
        let outcome = engine.aggregated();

        let stats = StatsOutput {
            rows_ingested: outcome
                .creatives
                .iter()
                .map(|c| c.history.len())
                .sum::<usize>()
                + outcome.dropped_rows as usize,
            rows_quarantined,
            rows_dropped_no_creative_id: outcome.dropped_rows,
            creatives: outcome.creatives.len(),
            ad_sets,
            total_spend: outcome.creatives.iter().map(|c| c.total_spend).sum(),
            total_leads: outcome.creatives.iter().map(|c| c.total_leads).sum(),
            total_clicks: outcome.creatives.iter().map(|c| c.total_clicks).sum(),
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("creatives:       {}", stats.creatives);
            println!("ad sets:         {}", stats.ad_sets);
            println!("rows ingested:   {}", stats.rows_ingested);
            println!("quarantined:     {}", stats.rows_quarantined);
            println!("dropped (no id): {}", stats.rows_dropped_no_creative_id);
            println!("total spend:     {:.2}", stats.total_spend);
            println!("derived leads:   {:.1}", stats.total_leads);
            println!("derived clicks:  {:.1}", stats.total_clicks);
        }
        Ok(())
    }
}

impl DataArgs {
    fn default_args() -> Self {
        Self {
            data_dir: None,
            utc_offset: 0,
            registry: None,
        }
    }
}

/// Load the export, build the classifier from external data, and assemble
/// the report engine. Returns the quarantined-row count alongside.
fn build_engine(data: &DataArgs) -> anyhow::Result<(ReportEngine, usize)> {
    let parser = match &data.data_dir {
        Some(dir) => DailyExportParser::with_data_dir(dir.clone()),
        None => DailyExportParser::new(),
    };
    let report = parser.parse_all();
    let quarantined = report.quarantined.len();

    let bucketing = Bucketing::from_offset_hours(data.utc_offset)
        .with_context(|| format!("invalid --utc-offset {}", data.utc_offset))?;

    let classifier = build_classifier(&report.records, data.registry.as_deref())?;
    Ok((
        ReportEngine::new(report.records, classifier, bucketing),
        quarantined,
    ))
}

/// The delivery map comes from the export's platform status strings; the
/// workflow registries come from the optional registry file. The engine only
/// consumes these, it never invents them.
fn build_classifier(
    records: &[RawRecord],
    registry_path: Option<&std::path::Path>,
) -> anyhow::Result<Box<dyn StatusClassifier>> {
    let registry = match registry_path {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("reading registry {}", path.display()))?;
            serde_json::from_slice::<RegistryFile>(&bytes)
                .with_context(|| format!("parsing registry {}", path.display()))?
        }
        None => RegistryFile::default(),
    };

    let mut delivery: HashMap<String, String> = HashMap::new();
    for record in records {
        if let Some(creative_id) = &record.creative_id {
            delivery.insert(creative_id.clone(), record.campaign_status.clone());
        }
    }

    Ok(Box::new(RegistryClassifier::new(
        registry.published,
        registry.saved,
        registry.drafts,
        delivery,
    )))
}
