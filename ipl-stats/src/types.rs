//! Core types for the IPL statistics library
//!
//! This module defines the source records read from the match and delivery
//! tables, the aggregate rows derived from them, and the library error type.
//! Aggregate rows serialize with the column names used in the CSV exports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Season identifier (e.g., 2008, 2017)
pub type Season = i32;

/// One row of `matches.csv`
///
/// Only the columns the reports need are read; everything else in the file
/// is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchRecord {
    /// Season the match was played in
    pub season: Season,
    /// First side
    pub team1: String,
    /// Second side
    pub team2: String,
    /// Winning side (absent for ties and abandoned matches)
    pub winner: Option<String>,
    /// Result category (e.g., "normal", "tie", "no result")
    pub result: Option<String>,
    /// Side that won the toss
    #[serde(default)]
    pub toss_winner: Option<String>,
    /// Toss decision ("bat" or "field")
    #[serde(default)]
    pub toss_decision: Option<String>,
}

impl MatchRecord {
    /// True if the toss winner also won the match
    ///
    /// A missing winner or toss winner never counts as a match.
    pub fn toss_winner_won(&self) -> bool {
        match (&self.toss_winner, &self.winner) {
            (Some(toss), Some(winner)) => toss == winner,
            _ => false,
        }
    }
}

/// One row of `deliveries.csv` (a single ball bowled)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeliveryRecord {
    /// Match this delivery belongs to
    #[serde(default)]
    pub match_id: Option<u64>,
    /// Batsman on strike
    pub batsman: String,
    /// Bowler
    pub bowler: String,
    /// Runs credited to the batsman off this ball
    pub batsman_runs: Option<u32>,
    /// How the batsman was dismissed, if a wicket fell
    pub dismissal_kind: Option<String>,
}

/// Total career runs for one batsman
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRuns {
    pub batsman: String,
    #[serde(rename = "batsman_runs")]
    pub runs: u64,
}

/// Total wickets credited to one bowler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowlerWickets {
    pub bowler: String,
    pub wickets: u64,
}

/// Played/won record of one team within one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeasonRecord {
    pub season: Season,
    pub team: String,
    pub matches_played: u32,
    pub wins: u32,
    pub win_pct: f64,
}

impl TeamSeasonRecord {
    /// Build a record, computing the win percentage
    ///
    /// `matches_played` of zero yields a percentage of zero rather than NaN.
    pub fn new(season: Season, team: impl Into<String>, matches_played: u32, wins: u32) -> Self {
        let win_pct = if matches_played == 0 {
            0.0
        } else {
            f64::from(wins) / f64::from(matches_played) * 100.0
        };

        Self {
            season,
            team: team.into(),
            matches_played,
            wins,
            win_pct,
        }
    }
}

/// Number of matches with a given result category in one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    pub season: Season,
    pub result: String,
    pub count: u32,
}

/// Share of matches won by the toss winner, per toss decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TossOutcome {
    pub toss_decision: String,
    /// Fraction in 0..=1
    pub pct_win_if_toss_win: f64,
}

/// How often a toss decision was taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionCount {
    pub toss_decision: String,
    pub count: u32,
}

/// Top teams of a single season, best first
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonLeaders {
    pub season: Season,
    pub teams: Vec<TeamSeasonRecord>,
}

/// One-row summary of the loaded data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub num_matches: usize,
    pub num_seasons: usize,
    pub num_players: usize,
}

/// Errors that can occur while loading or exporting
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Missing input file: {0:?} (place matches.csv and deliveries.csv into the data directory)")]
    MissingInput(PathBuf),

    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(winner: Option<&str>, toss_winner: Option<&str>) -> MatchRecord {
        MatchRecord {
            season: 2017,
            team1: "Mumbai Indians".into(),
            team2: "Chennai Super Kings".into(),
            winner: winner.map(String::from),
            result: Some("normal".into()),
            toss_winner: toss_winner.map(String::from),
            toss_decision: Some("field".into()),
        }
    }

    #[test]
    fn test_win_pct_computation() {
        let record = TeamSeasonRecord::new(2017, "Mumbai Indians", 4, 3);
        assert_eq!(record.win_pct, 75.0);
    }

    #[test]
    fn test_win_pct_zero_played_is_not_nan() {
        let record = TeamSeasonRecord::new(2017, "Pune Warriors", 0, 0);
        assert_eq!(record.win_pct, 0.0);
    }

    #[test]
    fn test_toss_winner_won() {
        assert!(fixture(Some("Mumbai Indians"), Some("Mumbai Indians")).toss_winner_won());
        assert!(!fixture(Some("Mumbai Indians"), Some("Chennai Super Kings")).toss_winner_won());
        assert!(!fixture(None, Some("Mumbai Indians")).toss_winner_won());
    }
}
