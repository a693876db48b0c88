//! IPL Statistics Library
//!
//! A stateless, reusable library for turning the IPL match and delivery
//! tables into ranked aggregate statistics.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on the numbers:
//! - Loads `matches.csv` and `deliveries.csv` into read-only tables
//! - Groups and reduces them into aggregate rows
//! - Ranks and truncates the aggregates
//! - Writes aggregates back out as CSV
//!
//! The library does NOT:
//! - Draw charts
//! - Decide where files live
//! - Configure logging
//!
//! All of that is in the application layer (ipl-report).
//!
//! # Example Usage
//!
//! ```no_run
//! use ipl_stats::{aggregate, rank, AnalysisConfig, Dataset};
//! use std::path::Path;
//!
//! let dataset = Dataset::load(
//!     Path::new("data/matches.csv"),
//!     Path::new("data/deliveries.csv"),
//! ).unwrap();
//!
//! let config = AnalysisConfig::new().with_chart_top(10);
//! let scorers = rank::rank_descending(aggregate::runs_by_batsman(dataset.deliveries()));
//!
//! for row in rank::top_n(&scorers, config.chart_top) {
//!     println!("{:<24} {}", row.batsman, row.runs);
//! }
//! ```

// Public modules
pub mod aggregate;
pub mod config;
pub mod export;
pub mod loader;
pub mod rank;
pub mod types;

// Re-export main types for convenience
pub use config::{AnalysisConfig, BOWLER_DISMISSALS};
pub use export::{CsvExporter, CsvRow};
pub use loader::Dataset;
pub use types::{
    BowlerWickets, DecisionCount, DeliveryRecord, MatchRecord, OutcomeCount, PlayerRuns, Result,
    RunSummary, Season, SeasonLeaders, StatsError, TeamSeasonRecord, TossOutcome,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
