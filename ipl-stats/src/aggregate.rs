//! Grouping and reduction over the loaded tables
//!
//! Every function here takes shared slices and returns fresh aggregate rows
//! in ascending key order. Ordering by metric is the ranker's job.

use crate::config::AnalysisConfig;
use crate::types::{
    BowlerWickets, DecisionCount, DeliveryRecord, MatchRecord, OutcomeCount, PlayerRuns, Season,
    TeamSeasonRecord, TossOutcome,
};
use std::collections::BTreeMap;

/// Career runs per batsman
pub fn runs_by_batsman(deliveries: &[DeliveryRecord]) -> Vec<PlayerRuns> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();

    for delivery in deliveries.iter().filter(|d| !d.batsman.is_empty()) {
        *totals.entry(delivery.batsman.as_str()).or_insert(0) +=
            u64::from(delivery.batsman_runs.unwrap_or(0));
    }

    totals
        .into_iter()
        .map(|(batsman, runs)| PlayerRuns {
            batsman: batsman.to_string(),
            runs,
        })
        .collect()
}

/// Career wickets per bowler
///
/// Only deliveries whose dismissal kind is in the configured allow-list are
/// counted; run outs and retirements never credit the bowler.
pub fn wickets_by_bowler(deliveries: &[DeliveryRecord], config: &AnalysisConfig) -> Vec<BowlerWickets> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();

    for delivery in deliveries {
        let credited = delivery
            .dismissal_kind
            .as_deref()
            .is_some_and(|kind| config.credits_bowler(kind));

        if credited && !delivery.bowler.is_empty() {
            *totals.entry(delivery.bowler.as_str()).or_insert(0) += 1;
        }
    }

    totals
        .into_iter()
        .map(|(bowler, wickets)| BowlerWickets {
            bowler: bowler.to_string(),
            wickets,
        })
        .collect()
}

/// Played, won and win percentage per (season, team)
///
/// Matches labelled with the configured no-result label are dropped before
/// counting. A team that played but never won gets a row with zero wins.
pub fn win_stats(matches: &[MatchRecord], config: &AnalysisConfig) -> Vec<TeamSeasonRecord> {
    // (played, wins)
    let mut tally: BTreeMap<(Season, &str), (u32, u32)> = BTreeMap::new();

    let decided = matches
        .iter()
        .filter(|m| !config.is_no_result(m.result.as_deref()));

    for record in decided.clone() {
        for team in [record.team1.as_str(), record.team2.as_str()] {
            if !team.is_empty() {
                tally.entry((record.season, team)).or_insert((0, 0)).0 += 1;
            }
        }
    }

    for record in decided {
        if let Some(winner) = record.winner.as_deref() {
            // wins only land on teams that have a played row
            if let Some(entry) = tally.get_mut(&(record.season, winner)) {
                entry.1 += 1;
            }
        }
    }

    tally
        .into_iter()
        .map(|((season, team), (played, wins))| TeamSeasonRecord::new(season, team, played, wins))
        .collect()
}

/// Match counts per (season, result category)
pub fn outcomes_by_season(matches: &[MatchRecord]) -> Vec<OutcomeCount> {
    let mut counts: BTreeMap<(Season, &str), u32> = BTreeMap::new();

    for record in matches {
        if let Some(result) = record.result.as_deref().filter(|r| !r.is_empty()) {
            *counts.entry((record.season, result)).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|((season, result), count)| OutcomeCount {
            season,
            result: result.to_string(),
            count,
        })
        .collect()
}

/// Fraction of matches won by the toss winner, per toss decision
pub fn toss_outcomes(matches: &[MatchRecord]) -> Vec<TossOutcome> {
    // (matches, toss winner also won)
    let mut tally: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

    for record in matches {
        if let Some(decision) = record.toss_decision.as_deref() {
            let entry = tally.entry(decision).or_insert((0, 0));
            entry.0 += 1;
            if record.toss_winner_won() {
                entry.1 += 1;
            }
        }
    }

    tally
        .into_iter()
        .map(|(decision, (total, converted))| TossOutcome {
            toss_decision: decision.to_string(),
            pct_win_if_toss_win: f64::from(converted) / f64::from(total),
        })
        .collect()
}

/// Number of matches per toss decision, in order of first appearance
pub fn toss_decision_counts(matches: &[MatchRecord]) -> Vec<DecisionCount> {
    let mut counts: Vec<DecisionCount> = Vec::new();

    for decision in matches.iter().filter_map(|m| m.toss_decision.as_deref()) {
        match counts.iter_mut().find(|c| c.toss_decision == decision) {
            Some(existing) => existing.count += 1,
            None => counts.push(DecisionCount {
                toss_decision: decision.to_string(),
                count: 1,
            }),
        }
    }

    counts
}
