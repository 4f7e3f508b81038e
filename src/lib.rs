//! creatrack: creative performance aggregation & filtering engine
//!
//! Turns an append-only, denormalized export of daily ad-performance rows
//! into deduplicated creative and ad-set aggregates with derived efficiency
//! metrics, and serves them through a timezone-aware filter/sort/paginate
//! pipeline. Fetching, persistence, and rendering belong to external
//! collaborators.

pub mod cli;
pub mod parsers;
pub mod services;
pub mod types;
