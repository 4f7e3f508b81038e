//! Services for aggregation, filtering, and report shaping

pub mod adset;
pub mod bucketing;
pub mod debounce;
pub mod filter;
pub mod merge;
pub mod metrics;
pub mod paginate;
pub mod query;
pub mod sort;
pub mod status;

pub use adset::AdSetAggregator;
pub use bucketing::Bucketing;
pub use filter::FilterPipeline;
pub use merge::{CreativeAggregator, MergeOutcome};
pub use paginate::{Page, Paginator};
pub use query::{QueryOutput, QueryState, ReportEngine};
pub use sort::SortEngine;
pub use status::{RegistryClassifier, StatusClassifier};
