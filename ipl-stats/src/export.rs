//! CSV export of aggregate rows
//!
//! Every row type declares its header, which is written even when there are
//! no rows. The header matches the serde field names of the row type.

use crate::types::{
    BowlerWickets, PlayerRuns, Result, RunSummary, StatsError, TeamSeasonRecord,
    TossOutcome,
};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export file for the top run-scorers
pub const TOP_SCORERS_FILE: &str = "top_scorers.csv";
/// Export file for the top wicket-takers
pub const TOP_WICKET_TAKERS_FILE: &str = "top_wicket_takers.csv";
/// Export file for per-season win percentages
pub const WIN_PCT_FILE: &str = "win_pct_by_year.csv";
/// Export file for toss conversion rates
pub const TOSS_OUTCOMES_FILE: &str = "toss_outcomes.csv";
/// Export file for the one-row run summary
pub const SUMMARY_FILE: &str = "summary.csv";

/// A row that can be exported, with its fixed column header
pub trait CsvRow: Serialize {
    const HEADER: &'static [&'static str];
}

impl CsvRow for PlayerRuns {
    const HEADER: &'static [&'static str] = &["batsman", "batsman_runs"];
}

impl CsvRow for BowlerWickets {
    const HEADER: &'static [&'static str] = &["bowler", "wickets"];
}

impl CsvRow for TeamSeasonRecord {
    const HEADER: &'static [&'static str] = &["season", "team", "matches_played", "wins", "win_pct"];
}

impl CsvRow for TossOutcome {
    const HEADER: &'static [&'static str] = &["toss_decision", "pct_win_if_toss_win"];
}

impl CsvRow for RunSummary {
    const HEADER: &'static [&'static str] = &["num_matches", "num_seasons", "num_players"];
}

pub struct CsvExporter;

impl CsvExporter {
    /// Write rows to a CSV file, replacing any existing file
    pub fn export<T: CsvRow>(rows: &[T], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        Self::write(rows, file, &path.display().to_string())?;
        log::debug!("Wrote {} rows to {:?}", rows.len(), path);
        Ok(())
    }

    /// Write rows as CSV to any writer
    ///
    /// `label` only names the destination in error messages. An empty slice
    /// still produces the header line.
    pub fn write<T: CsvRow, W: Write>(rows: &[T], writer: W, label: &str) -> Result<()> {
        let csv_error = |source: csv::Error| StatsError::Csv {
            file: label.to_string(),
            source,
        };

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(T::HEADER).map_err(csv_error)?;
        for row in rows {
            wtr.serialize(row).map_err(csv_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
