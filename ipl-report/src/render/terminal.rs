//! Terminal chart display
//!
//! Draws charts as text and, when asked to, blocks on the input until the
//! user dismisses the chart with Enter. End of input also dismisses, so a
//! closed stdin never hangs the run.

use super::{BarChart, Chart, ChartSink, LineChart, Orientation};
use anyhow::Result;
use ipl_stats::Season;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

/// Widest bar, in characters
const BAR_WIDTH: usize = 50;
/// Plot height of line and count charts, in rows
const PLOT_HEIGHT: usize = 12;
/// Width of one season column in line charts
const SEASON_WIDTH: usize = 6;
/// Markers assigned to line series in order
const MARKERS: [char; 8] = ['o', '*', '+', 'x', '#', '@', '%', '&'];

pub struct TerminalDisplay<R, W> {
    input: R,
    output: W,
    wait_for_dismiss: bool,
}

impl TerminalDisplay<io::StdinLock<'static>, io::Stdout> {
    /// Display on stdout, dismissing with Enter on stdin
    pub fn stdio(wait_for_dismiss: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), wait_for_dismiss)
    }
}

impl<R: BufRead, W: Write> TerminalDisplay<R, W> {
    pub fn new(input: R, output: W, wait_for_dismiss: bool) -> Self {
        Self {
            input,
            output,
            wait_for_dismiss,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn draw_header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", title)?;
        writeln!(self.output, "{}", "═".repeat(title.chars().count()))
    }

    fn draw_horizontal(&mut self, chart: &BarChart) -> io::Result<()> {
        let label_width = chart
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .chain(std::iter::once(chart.y_desc.chars().count()))
            .max()
            .unwrap_or(0);
        let max = max_value(chart.bars.iter().map(|b| b.value));

        writeln!(self.output, "{:<label_width$} │ {}", chart.y_desc, chart.x_desc)?;
        for bar in &chart.bars {
            let len = scaled(bar.value, max, BAR_WIDTH);
            writeln!(
                self.output,
                "{:<label_width$} │ {} {}",
                bar.label,
                "█".repeat(len),
                format_value(bar.value)
            )?;
        }
        Ok(())
    }

    fn draw_vertical(&mut self, chart: &BarChart) -> io::Result<()> {
        let column_width = chart
            .bars
            .iter()
            .map(|b| b.label.chars().count().max(format_value(b.value).len()))
            .max()
            .unwrap_or(0)
            + 2;
        let max = max_value(chart.bars.iter().map(|b| b.value));
        let heights: Vec<usize> = chart
            .bars
            .iter()
            .map(|b| scaled(b.value, max, PLOT_HEIGHT))
            .collect();

        writeln!(self.output, "{}", chart.y_desc)?;
        for row in (1..=PLOT_HEIGHT).rev() {
            let mut line = String::from("  │");
            for &height in &heights {
                let cell = if height >= row { "██" } else { "" };
                line.push_str(&format!("{:^column_width$}", cell));
            }
            writeln!(self.output, "{}", line.trim_end())?;
        }

        writeln!(self.output, "  └{}", "─".repeat(column_width * heights.len()))?;
        let mut labels = String::from("   ");
        let mut values = String::from("   ");
        for bar in &chart.bars {
            labels.push_str(&format!("{:^column_width$}", bar.label));
            values.push_str(&format!("{:^column_width$}", format_value(bar.value)));
        }
        writeln!(self.output, "{}", labels.trim_end())?;
        writeln!(self.output, "{}", values.trim_end())?;
        writeln!(self.output, "   {}", chart.x_desc)
    }

    fn draw_lines(&mut self, chart: &LineChart) -> io::Result<()> {
        let seasons: Vec<Season> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(season, _)| *season))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let max = max_value(chart.series.iter().flat_map(|s| s.points.iter().map(|(_, v)| *v)));

        let mut grid = vec![vec![' '; seasons.len() * SEASON_WIDTH]; PLOT_HEIGHT];
        for (i, series) in chart.series.iter().enumerate() {
            let marker = MARKERS[i % MARKERS.len()];
            for (season, value) in &series.points {
                if let Ok(col) = seasons.binary_search(season) {
                    let row = scaled(*value, max, PLOT_HEIGHT - 1);
                    grid[PLOT_HEIGHT - 1 - row][col * SEASON_WIDTH + SEASON_WIDTH / 2] = marker;
                }
            }
        }

        let axis_width = format_value(max).len().max(chart.y_desc.len().min(8));
        writeln!(self.output, "{}", chart.y_desc)?;
        for (row, cells) in grid.iter().enumerate() {
            let tick = match row {
                0 => format_value(max),
                r if r == PLOT_HEIGHT - 1 => "0".to_string(),
                _ => String::new(),
            };
            let cells: String = cells.iter().collect();
            writeln!(self.output, "{:>axis_width$} │{}", tick, cells.trim_end())?;
        }

        writeln!(
            self.output,
            "{:>axis_width$} └{}",
            "",
            "─".repeat(seasons.len() * SEASON_WIDTH)
        )?;
        let labels: String = seasons
            .iter()
            .map(|s| format!("{:^SEASON_WIDTH$}", s))
            .collect();
        writeln!(self.output, "{:>axis_width$}  {}", "", labels.trim_end())?;
        writeln!(self.output, "{:>axis_width$}  {}", "", chart.x_desc)?;

        let legend: Vec<String> = chart
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{} {}", MARKERS[i % MARKERS.len()], s.name))
            .collect();
        writeln!(self.output, "Legend: {}", legend.join("   "))
    }

    /// Block until the user dismisses the chart
    fn wait(&mut self) -> io::Result<()> {
        write!(self.output, "\n[press Enter to continue] ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> ChartSink for TerminalDisplay<R, W> {
    fn present(&mut self, chart: &Chart) -> Result<()> {
        self.draw_header(chart.title())?;

        if chart.is_empty() {
            writeln!(self.output, "(no data)")?;
        } else {
            match chart {
                Chart::Bar(bar) if bar.orientation == Orientation::Horizontal => self.draw_horizontal(bar)?,
                Chart::Bar(bar) => self.draw_vertical(bar)?,
                Chart::Line(line) => self.draw_lines(line)?,
            }
        }
        self.output.flush()?;

        if self.wait_for_dismiss {
            self.wait()?;
        }
        Ok(())
    }
}

fn max_value(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

/// Scale `value` into 0..=`cells`, relative to `max`
fn scaled(value: f64, max: f64, cells: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * cells as f64).round().min(cells as f64) as usize
}

/// Whole numbers print without decimals, fractions with one
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Bar, Series};
    use std::io::Cursor;

    fn render(chart: &Chart, input: &str, wait: bool) -> String {
        let mut display = TerminalDisplay::new(Cursor::new(input.to_string()), Vec::new(), wait);
        display.present(chart).unwrap();
        String::from_utf8(display.into_output()).unwrap()
    }

    fn ranking() -> Chart {
        Chart::Bar(BarChart {
            title: "Top 15 Run-scorers (Career)".into(),
            x_desc: "Total Runs".into(),
            y_desc: "Batsman".into(),
            orientation: Orientation::Horizontal,
            bars: vec![Bar::new("SK Raina", 4548.0), Bar::new("V Kohli", 2274.0)],
        })
    }

    #[test]
    fn test_horizontal_bars_scale_to_max() {
        let out = render(&ranking(), "", false);

        let raina = out.lines().find(|l| l.starts_with("SK Raina")).unwrap();
        let kohli = out.lines().find(|l| l.starts_with("V Kohli")).unwrap();
        assert_eq!(raina.matches('█').count(), BAR_WIDTH);
        assert_eq!(kohli.matches('█').count(), BAR_WIDTH / 2);
        assert!(raina.ends_with("4548"));
        assert!(!out.contains("press Enter"));
    }

    #[test]
    fn test_waits_for_dismissal() {
        let mut input = Cursor::new("\n\n".to_string());
        let mut display = TerminalDisplay::new(&mut input, Vec::new(), true);
        display.present(&ranking()).unwrap();
        let out = String::from_utf8(display.into_output()).unwrap();

        assert!(out.contains("[press Enter to continue]"));
        // exactly one line consumed per chart
        assert_eq!(input.position(), 1);
    }

    #[test]
    fn test_closed_input_does_not_block() {
        let out = render(&ranking(), "", true);
        assert!(out.contains("[press Enter to continue]"));
    }

    #[test]
    fn test_line_chart_legend_and_seasons() {
        let chart = Chart::Line(LineChart {
            title: "Match Results by Season".into(),
            x_desc: "Season".into(),
            y_desc: "Number of Matches".into(),
            series: vec![
                Series {
                    name: "normal".into(),
                    points: vec![(2008, 56.0), (2009, 55.0)],
                },
                Series {
                    name: "tie".into(),
                    points: vec![(2009, 1.0)],
                },
            ],
        });

        let out = render(&chart, "", false);
        assert!(out.contains("2008"));
        assert!(out.contains("2009"));
        assert!(out.contains("Legend: o normal   * tie"));
        assert!(out.contains('o'));
        assert!(out.contains('*'));
    }

    #[test]
    fn test_vertical_count_chart() {
        let chart = Chart::Bar(BarChart {
            title: "Toss Decisions (overall)".into(),
            x_desc: "Decision".into(),
            y_desc: "Count".into(),
            orientation: Orientation::Vertical,
            bars: vec![Bar::new("field", 363.0), Bar::new("bat", 273.0)],
        });

        let out = render(&chart, "", false);
        assert!(out.contains("field"));
        assert!(out.contains("363"));
        assert!(out.contains("273"));
    }

    #[test]
    fn test_empty_chart() {
        let chart = Chart::Bar(BarChart {
            title: "Top 15 Wicket-takers (Career)".into(),
            x_desc: "Wickets".into(),
            y_desc: "Bowler".into(),
            orientation: Orientation::Horizontal,
            bars: Vec::new(),
        });

        assert!(render(&chart, "", false).contains("(no data)"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(66.666), "66.7");
    }
}
