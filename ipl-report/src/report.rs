//! Report generation
//!
//! Runs every report section in a fixed order against the loaded dataset:
//! top run-scorers, top wicket-takers, win percentages by season, match
//! outcomes by season, toss decisions and finally the run summary. Each
//! section aggregates, ranks, exports its CSV (where it has one) and hands
//! its chart(s) to the sink before the next section starts.

use crate::config::AppConfig;
use crate::render::{Bar, BarChart, Chart, ChartSink, LineChart, Orientation, Series};
use anyhow::{Context, Result};
use ipl_stats::export::{
    SUMMARY_FILE, TOP_SCORERS_FILE, TOP_WICKET_TAKERS_FILE, TOSS_OUTCOMES_FILE, WIN_PCT_FILE,
};
use ipl_stats::{aggregate, rank, CsvExporter, CsvRow, Dataset, OutcomeCount, Season, SeasonLeaders};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What a run produced
#[derive(Debug, Default)]
pub struct ReportOutcome {
    /// CSV files written, in order
    pub exports: Vec<PathBuf>,
    /// Charts handed to the sink
    pub charts: usize,
}

pub struct Report<'a> {
    config: &'a AppConfig,
    dataset: &'a Dataset,
    sink: &'a mut dyn ChartSink,
    outcome: ReportOutcome,
}

impl<'a> Report<'a> {
    pub fn new(config: &'a AppConfig, dataset: &'a Dataset, sink: &'a mut dyn ChartSink) -> Self {
        Self {
            config,
            dataset,
            sink,
            outcome: ReportOutcome::default(),
        }
    }

    /// Run all sections; the first failure stops the run
    pub fn run(mut self) -> Result<ReportOutcome> {
        let output_dir = &self.config.output.output_dir;
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

        self.top_scorers()?;
        self.top_wicket_takers()?;
        self.win_percentages()?;
        self.match_outcomes()?;
        if self.dataset.has_toss_columns() {
            self.toss_decisions()?;
        } else {
            log::warn!("toss_winner/toss_decision columns not found, skipping toss report");
        }
        self.summary()?;

        Ok(self.outcome)
    }

    fn top_scorers(&mut self) -> Result<()> {
        log::info!("Report: top run-scorers");
        let config = self.config;
        let analysis = &config.analysis;
        let ranked = rank::rank_descending(aggregate::runs_by_batsman(self.dataset.deliveries()));
        log::debug!("{} batsmen", ranked.len());

        self.export(&rank::top_n(&ranked, analysis.export_top), TOP_SCORERS_FILE)?;
        self.show(ranking_chart(
            format!("Top {} Run-scorers (Career)", analysis.chart_top),
            "Total Runs",
            "Batsman",
            ranked
                .iter()
                .take(analysis.chart_top)
                .map(|r| Bar::new(&r.batsman, r.runs as f64)),
        ))
    }

    fn top_wicket_takers(&mut self) -> Result<()> {
        log::info!("Report: top wicket-takers");
        let config = self.config;
        let analysis = &config.analysis;
        let ranked = rank::rank_descending(aggregate::wickets_by_bowler(self.dataset.deliveries(), analysis));
        log::debug!("{} bowlers with wickets", ranked.len());

        self.export(&rank::top_n(&ranked, analysis.export_top), TOP_WICKET_TAKERS_FILE)?;
        self.show(ranking_chart(
            format!("Top {} Wicket-takers (Career)", analysis.chart_top),
            "Wickets",
            "Bowler",
            ranked
                .iter()
                .take(analysis.chart_top)
                .map(|r| Bar::new(&r.bowler, r.wickets as f64)),
        ))
    }

    fn win_percentages(&mut self) -> Result<()> {
        log::info!("Report: win percentage by season");
        let config = self.config;
        let analysis = &config.analysis;
        let stats = rank::rank_win_stats(aggregate::win_stats(self.dataset.matches(), analysis));
        log::debug!("{} team-season rows", stats.len());

        self.export(&stats, WIN_PCT_FILE)?;
        for leaders in rank::top_teams_per_season(&stats, analysis.season_top_teams) {
            self.show(season_chart(analysis.season_top_teams, &leaders))?;
        }
        Ok(())
    }

    fn match_outcomes(&mut self) -> Result<()> {
        log::info!("Report: match outcomes by season");
        let outcomes = aggregate::outcomes_by_season(self.dataset.matches());
        self.show(outcomes_chart(&outcomes))
    }

    fn toss_decisions(&mut self) -> Result<()> {
        log::info!("Report: toss decisions");
        let dataset = self.dataset;
        let matches = dataset.matches();

        self.export(&aggregate::toss_outcomes(matches), TOSS_OUTCOMES_FILE)?;
        self.show(Chart::Bar(BarChart {
            title: "Toss Decisions (overall)".into(),
            x_desc: "Decision".into(),
            y_desc: "Count".into(),
            orientation: Orientation::Vertical,
            bars: aggregate::toss_decision_counts(matches)
                .into_iter()
                .map(|c| Bar::new(c.toss_decision, f64::from(c.count)))
                .collect(),
        }))
    }

    fn summary(&mut self) -> Result<()> {
        let summary = self.dataset.summary();
        log::info!(
            "Summary: {} matches, {} seasons, {} players",
            summary.num_matches,
            summary.num_seasons,
            summary.num_players
        );
        self.export(&[summary], SUMMARY_FILE)
    }

    fn export<T: CsvRow>(&mut self, rows: &[T], file_name: &str) -> Result<()> {
        let path = self.config.output.output_dir.join(file_name);
        CsvExporter::export(rows, &path).with_context(|| format!("Failed to write {:?}", path))?;
        self.outcome.exports.push(path);
        Ok(())
    }

    fn show(&mut self, chart: Chart) -> Result<()> {
        self.sink
            .present(&chart)
            .with_context(|| format!("Failed to render chart: {}", chart.title()))?;
        self.outcome.charts += 1;
        Ok(())
    }
}

/// Where a run's outputs ended up, relative to `output_dir`
pub fn describe(outcome: &ReportOutcome, output_dir: &Path) -> String {
    let names: Vec<String> = outcome
        .exports
        .iter()
        .map(|p| {
            p.strip_prefix(output_dir)
                .unwrap_or(p.as_path())
                .display()
                .to_string()
        })
        .collect();
    format!("{} charts; CSV outputs: {}", outcome.charts, names.join(", "))
}

fn ranking_chart(
    title: String,
    x_desc: &str,
    y_desc: &str,
    bars: impl Iterator<Item = Bar>,
) -> Chart {
    Chart::Bar(BarChart {
        title,
        x_desc: x_desc.into(),
        y_desc: y_desc.into(),
        orientation: Orientation::Horizontal,
        bars: bars.collect(),
    })
}

fn season_chart(top: usize, leaders: &SeasonLeaders) -> Chart {
    ranking_chart(
        format!("Top {} Teams by Win % - Season {}", top, leaders.season),
        "Win Percentage",
        "Team",
        leaders.teams.iter().map(|t| Bar::new(&t.team, t.win_pct)),
    )
}

/// One series per result category, in order of first appearance
fn outcomes_chart(outcomes: &[OutcomeCount]) -> Chart {
    let mut order: Vec<&str> = Vec::new();
    let mut points: BTreeMap<&str, Vec<(Season, f64)>> = BTreeMap::new();

    for row in outcomes {
        if !order.contains(&row.result.as_str()) {
            order.push(&row.result);
        }
        points
            .entry(&row.result)
            .or_default()
            .push((row.season, f64::from(row.count)));
    }

    Chart::Line(LineChart {
        title: "Match Results by Season".into(),
        x_desc: "Season".into(),
        y_desc: "Number of Matches".into(),
        series: order
            .into_iter()
            .map(|name| Series {
                name: name.to_string(),
                points: points.remove(name).unwrap_or_default(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::fs;

    /// Sink that remembers every chart it was given
    #[derive(Default)]
    struct RecordingSink {
        charts: Vec<Chart>,
    }

    impl ChartSink for RecordingSink {
        fn present(&mut self, chart: &Chart) -> Result<()> {
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    const MATCHES: &str = "\
id,season,team1,team2,toss_winner,toss_decision,result,winner
1,2008,Kolkata Knight Riders,Royal Challengers Bangalore,Royal Challengers Bangalore,field,normal,Kolkata Knight Riders
2,2008,Chennai Super Kings,Kings XI Punjab,Chennai Super Kings,bat,normal,Chennai Super Kings
3,2008,Kolkata Knight Riders,Chennai Super Kings,Chennai Super Kings,field,no result,
4,2009,Chennai Super Kings,Kolkata Knight Riders,Kolkata Knight Riders,field,tie,Chennai Super Kings
";

    const DELIVERIES: &str = "\
match_id,batsman,bowler,batsman_runs,dismissal_kind
1,BB McCullum,P Kumar,4,
1,BB McCullum,P Kumar,6,
1,SC Ganguly,Z Khan,0,caught
2,MEK Hussey,B Lee,2,
2,MS Dhoni,B Lee,0,run out
";

    fn config_in(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.output.output_dir = dir.join("outputs");
        config
    }

    #[test]
    fn test_full_run_writes_all_exports() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let dataset = Dataset::from_readers(MATCHES.as_bytes(), DELIVERIES.as_bytes()).unwrap();
        let mut sink = RecordingSink::default();

        let outcome = Report::new(&config, &dataset, &mut sink).run().unwrap();

        let names: Vec<String> = outcome
            .exports
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "top_scorers.csv",
                "top_wicket_takers.csv",
                "win_pct_by_year.csv",
                "toss_outcomes.csv",
                "summary.csv"
            ]
        );
        for path in &outcome.exports {
            assert!(path.exists(), "{:?} missing", path);
        }

        let summary = fs::read_to_string(config.output.output_dir.join(SUMMARY_FILE)).unwrap();
        assert_eq!(summary, "num_matches,num_seasons,num_players\n4,2,7\n");

        let toss = fs::read_to_string(config.output.output_dir.join(TOSS_OUTCOMES_FILE)).unwrap();
        assert_eq!(toss, "toss_decision,pct_win_if_toss_win\nbat,1.0\nfield,0.0\n");
    }

    #[test]
    fn test_charts_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let dataset = Dataset::from_readers(MATCHES.as_bytes(), DELIVERIES.as_bytes()).unwrap();
        let mut sink = RecordingSink::default();

        let outcome = Report::new(&config, &dataset, &mut sink).run().unwrap();

        let titles: Vec<&str> = sink.charts.iter().map(|c| c.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Top 15 Run-scorers (Career)",
                "Top 15 Wicket-takers (Career)",
                "Top 6 Teams by Win % - Season 2008",
                "Top 6 Teams by Win % - Season 2009",
                "Match Results by Season",
                "Toss Decisions (overall)",
            ]
        );
        assert_eq!(outcome.charts, 6);

        match &sink.charts[0] {
            Chart::Bar(chart) => {
                assert_eq!(chart.bars[0], Bar::new("BB McCullum", 10.0));
                assert_eq!(chart.orientation, Orientation::Horizontal);
            }
            other => panic!("unexpected chart: {other:?}"),
        }

        // run out is not a bowler wicket
        match &sink.charts[1] {
            Chart::Bar(chart) => assert_eq!(chart.bars, vec![Bar::new("Z Khan", 1.0)]),
            other => panic!("unexpected chart: {other:?}"),
        }

        match &sink.charts[4] {
            Chart::Line(chart) => {
                let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["no result", "normal", "tie"]);
            }
            other => panic!("unexpected chart: {other:?}"),
        }
    }

    #[test]
    fn test_season_chart_excludes_no_result() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let dataset = Dataset::from_readers(MATCHES.as_bytes(), DELIVERIES.as_bytes()).unwrap();
        let mut sink = RecordingSink::default();

        Report::new(&config, &dataset, &mut sink).run().unwrap();

        let csv = fs::read_to_string(config.output.output_dir.join(WIN_PCT_FILE)).unwrap();
        assert!(csv.contains("2008,Kolkata Knight Riders,1,1,100.0"));
        assert!(csv.contains("2008,Chennai Super Kings,1,1,100.0"));
        assert!(csv.contains("2008,Royal Challengers Bangalore,1,0,0.0"));
    }

    #[test]
    fn test_toss_report_skipped_without_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let matches = "season,team1,team2,winner,result\n2010,A,B,A,normal\n";
        let dataset = Dataset::from_readers(matches.as_bytes(), DELIVERIES.as_bytes()).unwrap();
        let mut sink = RecordingSink::default();

        let outcome = Report::new(&config, &dataset, &mut sink).run().unwrap();

        assert!(!config.output.output_dir.join(TOSS_OUTCOMES_FILE).exists());
        assert!(sink.charts.iter().all(|c| c.title() != "Toss Decisions (overall)"));
        assert_eq!(outcome.exports.len(), 4);
    }

    #[test]
    fn test_describe() {
        let outcome = ReportOutcome {
            exports: vec![PathBuf::from("outputs/summary.csv")],
            charts: 3,
        };
        assert_eq!(
            describe(&outcome, Path::new("outputs")),
            "3 charts; CSV outputs: summary.csv"
        );
    }
}
