//! Table loading
//!
//! The Dataset struct is the entry point of the library: it reads the match
//! and delivery tables into memory and hands out read-only slices to the
//! aggregation functions.

use crate::types::{DeliveryRecord, MatchRecord, Result, RunSummary, StatsError};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns every `matches.csv` must carry
pub const MATCH_COLUMNS: [&str; 5] = ["season", "team1", "team2", "winner", "result"];

/// Columns every `deliveries.csv` must carry
pub const DELIVERY_COLUMNS: [&str; 4] = ["batsman", "bowler", "batsman_runs", "dismissal_kind"];

/// Columns needed for the toss report (optional as a pair)
pub const TOSS_COLUMNS: [&str; 2] = ["toss_winner", "toss_decision"];

/// Both source tables, loaded once per run
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    matches: Vec<MatchRecord>,
    deliveries: Vec<DeliveryRecord>,
    has_toss_columns: bool,
}

impl Dataset {
    /// Load both tables from disk
    ///
    /// Both paths are checked for existence before either file is read, so a
    /// missing deliveries file fails the run without parsing the matches.
    ///
    /// # Example
    /// ```no_run
    /// use ipl_stats::Dataset;
    /// use std::path::Path;
    ///
    /// let dataset = Dataset::load(
    ///     Path::new("data/matches.csv"),
    ///     Path::new("data/deliveries.csv"),
    /// ).unwrap();
    /// println!("{} matches", dataset.matches().len());
    /// ```
    pub fn load(matches_path: &Path, deliveries_path: &Path) -> Result<Self> {
        for path in [matches_path, deliveries_path] {
            if !path.exists() {
                return Err(StatsError::MissingInput(path.to_path_buf()));
            }
        }

        log::info!("Loading matches: {:?}", matches_path);
        let (matches, match_headers) =
            read_table::<MatchRecord, _>(File::open(matches_path)?, &file_label(matches_path), &MATCH_COLUMNS)?;

        log::info!("Loading deliveries: {:?}", deliveries_path);
        let (deliveries, _) = read_table::<DeliveryRecord, _>(
            File::open(deliveries_path)?,
            &file_label(deliveries_path),
            &DELIVERY_COLUMNS,
        )?;

        let dataset = Self::from_tables(matches, deliveries, has_all(&match_headers, &TOSS_COLUMNS));
        log::info!(
            "Loaded {} matches and {} deliveries",
            dataset.matches.len(),
            dataset.deliveries.len()
        );
        Ok(dataset)
    }

    /// Parse both tables from arbitrary readers
    pub fn from_readers<M: Read, D: Read>(matches: M, deliveries: D) -> Result<Self> {
        let (matches, match_headers) = read_table::<MatchRecord, _>(matches, "matches.csv", &MATCH_COLUMNS)?;
        let (deliveries, _) = read_table::<DeliveryRecord, _>(deliveries, "deliveries.csv", &DELIVERY_COLUMNS)?;

        Ok(Self::from_tables(matches, deliveries, has_all(&match_headers, &TOSS_COLUMNS)))
    }

    /// Wrap already-built tables
    pub fn from_tables(
        matches: Vec<MatchRecord>,
        deliveries: Vec<DeliveryRecord>,
        has_toss_columns: bool,
    ) -> Self {
        Self {
            matches,
            deliveries,
            has_toss_columns,
        }
    }

    /// All match rows, in file order
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// All delivery rows, in file order
    pub fn deliveries(&self) -> &[DeliveryRecord] {
        &self.deliveries
    }

    /// True if the matches table carried both toss columns
    pub fn has_toss_columns(&self) -> bool {
        self.has_toss_columns
    }

    /// Counts reported in `summary.csv`
    ///
    /// Players are counted as distinct batsmen plus distinct bowlers, so a
    /// player who both bats and bowls is counted twice.
    pub fn summary(&self) -> RunSummary {
        let seasons: HashSet<_> = self.matches.iter().map(|m| m.season).collect();
        let batsmen: HashSet<&str> = self
            .deliveries
            .iter()
            .map(|d| d.batsman.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        let bowlers: HashSet<&str> = self
            .deliveries
            .iter()
            .map(|d| d.bowler.as_str())
            .filter(|name| !name.is_empty())
            .collect();

        RunSummary {
            num_matches: self.matches.len(),
            num_seasons: seasons.len(),
            num_players: batsmen.len() + bowlers.len(),
        }
    }
}

/// Read a headed CSV table, checking required columns before any row
fn read_table<T, R>(source: R, file: &str, required: &[&str]) -> Result<(Vec<T>, Vec<String>)>
where
    T: DeserializeOwned,
    R: Read,
{
    let csv_error = |source: csv::Error| StatsError::Csv {
        file: file.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(String::from)
        .collect();

    if let Some(column) = required.iter().find(|c| !headers.iter().any(|h| h == *c)) {
        return Err(StatsError::MissingColumn {
            file: file.to_string(),
            column: column.to_string(),
        });
    }

    let rows = reader
        .deserialize::<T>()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(csv_error)?;
    log::debug!("{}: {} rows", file, rows.len());

    Ok((rows, headers))
}

fn has_all(headers: &[String], columns: &[&str]) -> bool {
    columns.iter().all(|c| headers.iter().any(|h| h == c))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCHES: &str = "\
id,season,city,team1,team2,toss_winner,toss_decision,result,winner
1,2017,Hyderabad,Sunrisers Hyderabad,Royal Challengers Bangalore,Royal Challengers Bangalore,field,normal,Sunrisers Hyderabad
2,2017,Pune,Mumbai Indians,Rising Pune Supergiant,Rising Pune Supergiant,field,normal,Rising Pune Supergiant
3,2018,Bangalore,Royal Challengers Bangalore,Rajasthan Royals,Rajasthan Royals,field,no result,
";

    const DELIVERIES: &str = "\
match_id,inning,batsman,bowler,batsman_runs,dismissal_kind
1,1,DA Warner,TS Mills,0,
1,1,DA Warner,TS Mills,4,
1,1,S Dhawan,A Choudhary,1,caught
2,1,AM Rahane,TG Southee,,run out
";

    #[test]
    fn test_from_readers() {
        let dataset = Dataset::from_readers(MATCHES.as_bytes(), DELIVERIES.as_bytes()).unwrap();

        assert_eq!(dataset.matches().len(), 3);
        assert_eq!(dataset.deliveries().len(), 4);
        assert!(dataset.has_toss_columns());

        let abandoned = &dataset.matches()[2];
        assert_eq!(abandoned.result.as_deref(), Some("no result"));
        assert_eq!(abandoned.winner, None);

        let first = &dataset.deliveries()[0];
        assert_eq!(first.match_id, Some(1));
        assert_eq!(first.dismissal_kind, None);
        assert_eq!(dataset.deliveries()[3].batsman_runs, None);
    }

    #[test]
    fn test_missing_required_column() {
        let matches = "season,team1,team2,winner\n2017,A,B,A\n";
        let err = Dataset::from_readers(matches.as_bytes(), DELIVERIES.as_bytes()).unwrap_err();

        match err {
            StatsError::MissingColumn { file, column } => {
                assert_eq!(file, "matches.csv");
                assert_eq!(column, "result");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_toss_columns_optional() {
        let matches = "season,team1,team2,winner,result\n2017,A,B,A,normal\n";
        let dataset = Dataset::from_readers(matches.as_bytes(), DELIVERIES.as_bytes()).unwrap();

        assert!(!dataset.has_toss_columns());
        assert_eq!(dataset.matches()[0].toss_decision, None);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let matches = "season,team1,team2,winner,result\ntwenty,A,B,A,normal\n";
        let err = Dataset::from_readers(matches.as_bytes(), DELIVERIES.as_bytes()).unwrap_err();
        assert!(matches!(err, StatsError::Csv { .. }));
    }

    #[test]
    fn test_summary_counts() {
        let dataset = Dataset::from_readers(MATCHES.as_bytes(), DELIVERIES.as_bytes()).unwrap();
        let summary = dataset.summary();

        assert_eq!(summary.num_matches, 3);
        assert_eq!(summary.num_seasons, 2);
        // 3 batsmen + 3 bowlers
        assert_eq!(summary.num_players, 6);
    }
}
