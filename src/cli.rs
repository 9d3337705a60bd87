//! Command-line interface components.

use crate::config::TrendConfig;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "county-trends")]
#[command(about = "Annotate county boundaries with case counts, trends and growth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Daily per-county counts CSV (default: ../us-counties.csv)
    #[arg(long, value_name = "CSV")]
    pub records: Option<PathBuf>,

    /// County feature collection to annotate (default: gz_2010_us_050_00_20m.json)
    #[arg(long, value_name = "JSON")]
    pub geography: Option<PathBuf>,

    /// Output path for the annotated collection (default: county-cases.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of counties ranked by latest cases
    #[arg(long)]
    pub top: Option<usize>,

    /// Print the report without writing the annotated collection
    #[arg(long)]
    pub report_only: bool,

    /// Disable the loading spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level for the crate's tracing filter
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Build the run configuration: file values first, then flag overrides
    pub fn to_config(&self) -> Result<TrendConfig> {
        let mut config = match &self.config {
            Some(path) => TrendConfig::from_file(path)?,
            None => TrendConfig::default(),
        };

        if let Some(path) = &self.records {
            config = config.with_records_path(path.clone());
        }
        if let Some(path) = &self.geography {
            config = config.with_geography_path(path.clone());
        }
        if let Some(path) = &self.output {
            config = config.with_output_path(path.clone());
        }
        if let Some(top) = self.top {
            config = config.with_top_k(top);
        }
        if self.no_progress {
            config = config.without_progress();
        }

        Ok(config)
    }
}
