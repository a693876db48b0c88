//! PNG chart output

use super::{slug, BarChart, Chart, ChartSink, LineChart, Orientation};
use anyhow::Result;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Writes every chart as a numbered PNG file into a directory
pub struct PngWriter {
    dir: PathBuf,
    width: u32,
    height: u32,
    written: usize,
}

impl PngWriter {
    pub fn new(dir: &Path, width: u32, height: u32) -> Self {
        Self {
            dir: dir.to_path_buf(),
            width,
            height,
            written: 0,
        }
    }

    /// File the next chart with this title will be written to
    fn next_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{:02}_{}.png", self.written + 1, slug(title)))
    }

    fn plot_horizontal(&self, chart: &BarChart, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        // segment 0 is drawn at the bottom, so the first bar goes last
        let bars: Vec<_> = chart.bars.iter().rev().collect();
        let max = bars.iter().map(|b| b.value).fold(0.0, f64::max).max(1.0);
        let label_area = bars.iter().map(|b| b.label.len()).max().unwrap_or(0) as u32 * 8 + 20;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(label_area)
            .build_cartesian_2d(0f64..(max * 1.1), (0..bars.len()).into_segmented())?;

        ctx.configure_mesh()
            .disable_y_mesh()
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .y_labels(bars.len())
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => bars.get(*i).map(|b| b.label.clone()).unwrap_or_default(),
                _ => String::new(),
            })
            .x_label_formatter(&|x| format!("{:.0}", x))
            .draw()?;

        ctx.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            Rectangle::new(
                [(0.0, SegmentValue::Exact(i)), (bar.value, SegmentValue::Exact(i + 1))],
                BLUE.mix(0.6).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    fn plot_vertical(&self, chart: &BarChart, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let bars = &chart.bars;
        let max = bars.iter().map(|b| b.value).fold(0.0, f64::max).max(1.0);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d((0..bars.len()).into_segmented(), 0f64..(max * 1.1))?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .x_labels(bars.len())
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => bars.get(*i).map(|b| b.label.clone()).unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;

        ctx.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.value)],
                GREEN.mix(0.6).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    fn plot_lines(&self, chart: &LineChart, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let points = chart.series.iter().flat_map(|s| s.points.iter());
        let first = points.clone().map(|(season, _)| *season).min().unwrap_or(0);
        let last = points.clone().map(|(season, _)| *season).max().unwrap_or(0);
        let max = points.map(|(_, v)| *v).fold(0.0, f64::max).max(1.0);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d((first - 1)..(last + 1), 0f64..(max * 1.1))?;

        ctx.configure_mesh()
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .x_label_formatter(&|x| x.to_string())
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;

        for (i, series) in chart.series.iter().enumerate() {
            let color = Palette99::pick(i);
            ctx.draw_series(
                LineSeries::new(series.points.clone(), color.stroke_width(2)).point_size(4),
            )?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], Palette99::pick(i)));
        }

        ctx.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl ChartSink for PngWriter {
    fn present(&mut self, chart: &Chart) -> Result<()> {
        if chart.is_empty() {
            log::warn!("Not writing empty chart: {}", chart.title());
            return Ok(());
        }

        let path = self.next_path(chart.title());
        match chart {
            Chart::Bar(bar) if bar.orientation == Orientation::Horizontal => self.plot_horizontal(bar, &path)?,
            Chart::Bar(bar) => self.plot_vertical(bar, &path)?,
            Chart::Line(line) => self.plot_lines(line, &path)?,
        }

        self.written += 1;
        log::info!("Chart written: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_paths_are_numbered() {
        let mut writer = PngWriter::new(Path::new("outputs/plots"), 800, 600);
        assert_eq!(
            writer.next_path("Top 15 Run-scorers (Career)"),
            PathBuf::from("outputs/plots/01_top_15_run_scorers_career.png")
        );

        writer.written = 9;
        assert_eq!(
            writer.next_path("Toss Decisions (overall)"),
            PathBuf::from("outputs/plots/10_toss_decisions_overall.png")
        );
    }

    #[test]
    fn test_empty_chart_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = PngWriter::new(dir.path(), 800, 600);
        let chart = Chart::Bar(BarChart {
            title: "Top 15 Wicket-takers (Career)".into(),
            x_desc: "Wickets".into(),
            y_desc: "Bowler".into(),
            orientation: Orientation::Horizontal,
            bars: Vec::new(),
        });

        writer.present(&chart).unwrap();
        assert_eq!(writer.written, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
