//! Ordering and truncation of aggregate rows

use crate::types::{BowlerWickets, PlayerRuns, SeasonLeaders, TeamSeasonRecord};
use std::cmp::Ordering;

/// An aggregate row with a single metric to rank by
pub trait Ranked {
    /// Value the row is ordered by (higher ranks first)
    fn metric(&self) -> f64;
}

impl Ranked for PlayerRuns {
    fn metric(&self) -> f64 {
        self.runs as f64
    }
}

impl Ranked for BowlerWickets {
    fn metric(&self) -> f64 {
        self.wickets as f64
    }
}

impl Ranked for TeamSeasonRecord {
    fn metric(&self) -> f64 {
        self.win_pct
    }
}

/// Sort rows descending by metric
///
/// The sort is stable: aggregates arrive in ascending key order, so ties
/// keep alphabetical order.
pub fn rank_descending<T: Ranked>(mut rows: Vec<T>) -> Vec<T> {
    rows.sort_by(|a, b| descending(a.metric(), b.metric()));
    rows
}

/// Keep at most the first `n` rows
pub fn top_n<T: Clone>(rows: &[T], n: usize) -> Vec<T> {
    rows.iter().take(n).cloned().collect()
}

/// Order win records by season ascending, then win percentage descending
pub fn rank_win_stats(mut rows: Vec<TeamSeasonRecord>) -> Vec<TeamSeasonRecord> {
    rows.sort_by(|a, b| {
        a.season
            .cmp(&b.season)
            .then_with(|| descending(a.win_pct, b.win_pct))
    });
    rows
}

/// Best `n` teams of every season, seasons ascending
pub fn top_teams_per_season(rows: &[TeamSeasonRecord], n: usize) -> Vec<SeasonLeaders> {
    let ranked = rank_win_stats(rows.to_vec());
    let mut leaders: Vec<SeasonLeaders> = Vec::new();

    for row in ranked {
        match leaders.last_mut() {
            Some(current) if current.season == row.season => {
                if current.teams.len() < n {
                    current.teams.push(row);
                }
            }
            _ => {
                let season = row.season;
                let teams = if n > 0 { vec![row] } else { Vec::new() };
                leaders.push(SeasonLeaders { season, teams });
            }
        }
    }

    leaders
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
