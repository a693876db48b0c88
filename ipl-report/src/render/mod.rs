//! Chart rendering
//!
//! Reports describe their charts as plain data ([`Chart`]) and hand them to a
//! [`ChartSink`]. Sinks decide what "showing" a chart means: drawing it in
//! the terminal and waiting, writing a PNG, or nothing at all.

pub mod png;
pub mod terminal;

pub use png::PngWriter;
pub use terminal::TerminalDisplay;

use crate::config::{ChartMode, ChartsConfig};
use anyhow::{Context, Result};
use ipl_stats::Season;

/// One bar of a bar or count chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Direction the bars grow in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Labels down the side, values along the x axis (rankings)
    Horizontal,
    /// Labels along the bottom, values up the y axis (counts)
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub orientation: Orientation,
    /// Bars in display order (first bar is the top or leftmost one)
    pub bars: Vec<Bar>,
}

/// One line of a grouped line chart
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(Season, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChart),
    Line(LineChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(chart) => &chart.title,
            Chart::Line(chart) => &chart.title,
        }
    }

    /// True if there is nothing to draw
    pub fn is_empty(&self) -> bool {
        match self {
            Chart::Bar(chart) => chart.bars.is_empty(),
            Chart::Line(chart) => chart.series.iter().all(|s| s.points.is_empty()),
        }
    }
}

/// Destination for rendered charts
pub trait ChartSink {
    /// Render one chart; returns once the chart has been shown or written
    fn present(&mut self, chart: &Chart) -> Result<()>;
}

/// Sink that drops every chart
pub struct NullSink;

impl ChartSink for NullSink {
    fn present(&mut self, chart: &Chart) -> Result<()> {
        log::debug!("Skipping chart: {}", chart.title());
        Ok(())
    }
}

/// Build the sink selected by the configuration
pub fn sink_for(config: &ChartsConfig) -> Result<Box<dyn ChartSink>> {
    match config.mode {
        ChartMode::Display => Ok(Box::new(TerminalDisplay::stdio(config.wait_for_dismiss))),
        ChartMode::Png => {
            std::fs::create_dir_all(&config.plots_dir)
                .with_context(|| format!("Failed to create plots directory: {:?}", config.plots_dir))?;
            Ok(Box::new(PngWriter::new(&config.plots_dir, config.width, config.height)))
        }
        ChartMode::Off => Ok(Box::new(NullSink)),
    }
}

/// Lowercase file-name stem derived from a chart title
pub(crate) fn slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}
