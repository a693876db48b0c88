//! Analysis configuration types
//!
//! This module defines the few knobs the aggregation and ranking steps take.
//! Paths, chart output and other application concerns live in the report
//! binary.

use serde::{Deserialize, Serialize};

/// Dismissal kinds that credit the bowler with a wicket
pub const BOWLER_DISMISSALS: [&str; 6] = [
    "bowled",
    "caught",
    "lbw",
    "stumped",
    "caught and bowled",
    "hit wicket",
];

/// Configuration for the statistics library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of rows written to the ranking exports
    #[serde(default = "default_export_top")]
    pub export_top: usize,

    /// Number of rows drawn in the ranking charts
    #[serde(default = "default_chart_top")]
    pub chart_top: usize,

    /// Number of teams shown per season in the win-percentage charts
    #[serde(default = "default_season_top_teams")]
    pub season_top_teams: usize,

    /// Result label of matches excluded from win percentages
    #[serde(default = "default_no_result_label")]
    pub no_result_label: String,

    /// Dismissal kinds counted as bowler wickets
    #[serde(default = "default_wicket_kinds")]
    pub wicket_kinds: Vec<String>,
}

fn default_export_top() -> usize {
    30
}

fn default_chart_top() -> usize {
    15
}

fn default_season_top_teams() -> usize {
    6
}

fn default_no_result_label() -> String {
    "no result".to_string()
}

fn default_wicket_kinds() -> Vec<String> {
    BOWLER_DISMISSALS.iter().map(|kind| kind.to_string()).collect()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            export_top: default_export_top(),
            chart_top: default_chart_top(),
            season_top_teams: default_season_top_teams(),
            no_result_label: default_no_result_label(),
            wicket_kinds: default_wicket_kinds(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new analysis configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of exported ranking rows
    pub fn with_export_top(mut self, n: usize) -> Self {
        self.export_top = n;
        self
    }

    /// Builder method: set the number of charted ranking rows
    pub fn with_chart_top(mut self, n: usize) -> Self {
        self.chart_top = n;
        self
    }

    /// Builder method: set the number of teams charted per season
    pub fn with_season_top_teams(mut self, n: usize) -> Self {
        self.season_top_teams = n;
        self
    }

    /// Builder method: set the result label treated as "no result"
    pub fn with_no_result_label(mut self, label: impl Into<String>) -> Self {
        self.no_result_label = label.into();
        self
    }

    /// Builder method: replace the wicket allow-list
    pub fn with_wicket_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wicket_kinds = kinds.into_iter().map(Into::into).collect();
        self
    }

    /// Check if a dismissal kind credits the bowler
    pub fn credits_bowler(&self, dismissal_kind: &str) -> bool {
        self.wicket_kinds.iter().any(|kind| kind == dismissal_kind)
    }

    /// Check if a result label marks a match without a result
    pub fn is_no_result(&self, result: Option<&str>) -> bool {
        result == Some(self.no_result_label.as_str())
    }
}
