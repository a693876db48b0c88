//! IPL Report CLI Application
//!
//! This is the command-line interface for the IPL season report.
//! It uses the ipl-stats library and adds:
//! - Configuration (TOML file + command-line overrides)
//! - The report pipeline (one section per statistic)
//! - Chart rendering (terminal display, PNG files)
//!
//! Running it without arguments reads `data/matches.csv` and
//! `data/deliveries.csv`, writes CSVs to `outputs/` and displays each chart
//! in turn.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod render;
mod report;

use config::{AppConfig, ChartMode};
use ipl_stats::Dataset;

/// IPL Report - Career and season statistics from IPL match data
#[derive(Parser, Debug)]
#[command(name = "ipl-report")]
#[command(about = "Generate IPL statistics reports (CSV exports and charts)", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding matches.csv and deliveries.csv
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory the CSV outputs are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Where charts go
    #[arg(long, value_enum, value_name = "MODE")]
    charts: Option<ChartMode>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("IPL Report v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using stats library v{}", ipl_stats::VERSION);

    let config = resolve_config(&args)?;

    // Fails before anything is written if either input is missing
    let dataset = Dataset::load(&config.input.matches_path(), &config.input.deliveries_path())?;

    let mut sink = render::sink_for(&config.charts)?;
    let outcome = report::Report::new(&config, &dataset, sink.as_mut()).run()?;

    log::info!("{}", report::describe(&outcome, &config.output.output_dir));
    if !args.quiet {
        println!(
            "Done. Summary and CSV outputs saved to {}",
            config.output.output_dir.display()
        );
    }

    Ok(())
}

/// Load the config file (if any) and apply command-line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(dir) = &args.data_dir {
        config.input.data_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output.output_dir = dir.clone();
    }
    if let Some(mode) = args.charts {
        config.charts.mode = mode;
    }

    log::debug!("Configuration: {:?}", config);
    Ok(config)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
