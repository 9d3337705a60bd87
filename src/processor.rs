//! Main processing engine.
//!
//! Orchestrates a complete run: load the counts CSV into an
//! [`ObservationStore`], print the top-region report, derive the per-region
//! metrics, annotate the county feature collection and write it out. The run
//! is single-pass and synchronous; any parse or I/O error aborts it.

use crate::annotate::Annotator;
use crate::config::TrendConfig;
use crate::error::{Result, TrendsError};
use crate::expander::RegionExpander;
use crate::geojson::{read_feature_collection, write_feature_collection};
use crate::metrics::{MetricEngine, format_rate};
use crate::models::{LoadStats, ProcessingStats};
use crate::records::{parse_record, records_reader};
use crate::store::ObservationStore;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, Read};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Rows between spinner updates
const PROGRESS_INTERVAL: usize = 10_000;

/// Main processor for a county trend run
pub struct TrendProcessor {
    config: TrendConfig,
    expander: RegionExpander,
    report_only: bool,
}

impl TrendProcessor {
    /// Create a processor, rejecting invalid configuration up front
    pub fn new(config: TrendConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            expander: RegionExpander::new(),
            report_only: false,
        })
    }

    /// Compute and print metrics without writing the annotated collection
    pub fn with_report_only(mut self, report_only: bool) -> Self {
        self.report_only = report_only;
        self
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        println!("{}", "Starting county trend processing".bright_green().bold());
        println!(
            "  {} {}",
            "Records:".bright_cyan(),
            self.config.records_path.display()
        );
        println!(
            "  {} {}",
            "Geography:".bright_cyan(),
            self.config.geography_path.display()
        );

        // Step 1: Load observations
        println!("\n{}", "Loading observations...".bright_yellow());
        let (store, load) = self.load_store()?;
        println!(
            "  {} {} observations across {} regions",
            "Loaded".bright_green(),
            load.observations_stored.to_string().bright_white().bold(),
            load.regions.to_string().bright_white().bold()
        );

        let engine = MetricEngine::new(&store).with_config(&self.config);

        // Step 2: Report the fastest-growing counties
        if self.config.report_top > 0 {
            self.print_report(&engine);
        }

        // Step 3: Derive metrics
        let latest = engine.latest();
        let trend = engine.trend();
        let growth = engine.last_3_days_growth();
        let top = engine.top(self.config.top_k);
        info!("Top {} regions by cases: {}", top.len(), top.join(", "));

        let mut stats = ProcessingStats {
            load,
            regions_with_growth: growth.len(),
            ..Default::default()
        };

        if self.report_only {
            println!(
                "\n{}",
                "Report-only mode - skipping annotation".bright_green()
            );
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        // Step 4: Annotate and write the feature collection
        println!("\n{}", "Annotating counties...".bright_yellow());
        let mut document = read_feature_collection(&self.config.geography_path)?;
        let annotation = Annotator::new(&latest, &trend, &growth).annotate_in_place(&mut document)?;
        write_feature_collection(&self.config.output_path, &document)?;

        stats.features_annotated = annotation.features;
        stats.features_matched = annotation.matched;
        stats.output_path = Some(self.config.output_path.clone());
        stats.processing_time_ms = start_time.elapsed().as_millis();

        self.print_summary(&stats);
        Ok(stats)
    }

    /// Load the configured counts CSV
    pub fn load_store(&self) -> Result<(ObservationStore, LoadStats)> {
        let path = &self.config.records_path;
        if !path.exists() {
            return Err(TrendsError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        debug!("Reading records from {}", path.display());
        let file = File::open(path)?;
        self.load_from_reader(BufReader::new(file))
    }

    /// Load observations from any CSV source whose first row is a header
    pub fn load_from_reader<R: Read>(&self, source: R) -> Result<(ObservationStore, LoadStats)> {
        let spinner = self.loading_spinner();
        let mut reader = records_reader(source);
        let mut store = ObservationStore::new();
        let mut stats = LoadStats::default();

        for record in reader.records() {
            let record = record?;
            let observation = parse_record(&record)?;
            stats.rows_read += 1;

            if self.config.skip_zero_cases && observation.cases == 0 {
                stats.rows_skipped += 1;
                continue;
            }

            if self.expander.is_aggregate(&observation) {
                stats.rows_expanded += 1;
            }
            for expanded in self.expander.expand(observation) {
                store.add(expanded);
            }

            if stats.rows_read % PROGRESS_INTERVAL == 0 {
                spinner.set_message(format!("{} rows read", stats.rows_read));
            }
        }

        stats.observations_stored = store.len();
        stats.regions = store.region_count();
        spinner.finish_and_clear();

        info!(
            "Loaded {} rows ({} skipped, {} expanded) into {} observations",
            stats.rows_read, stats.rows_skipped, stats.rows_expanded, stats.observations_stored
        );
        Ok((store, stats))
    }

    fn loading_spinner(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Reading records");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Print every observation of the top regions with its daily rate
    fn print_report(&self, engine: &MetricEngine<'_>) {
        println!(
            "\n{}",
            format!("Top {} counties by cases", self.config.report_top).bright_yellow()
        );
        for (key, rated) in engine.top_report(self.config.report_top) {
            println!("\n  {}", key.bright_white().bold());
            for entry in rated {
                println!("  {} {}", entry.observation, format_rate(entry.rate));
            }
        }

        let brackets = engine.brackets();
        println!("\n{}", "Case brackets".bright_yellow());
        for (index, keys) in &brackets {
            println!(
                "  {} {}",
                format!("Bracket {}:", index).bright_cyan(),
                keys.len().to_string().bright_white()
            );
        }
    }

    fn print_summary(&self, stats: &ProcessingStats) {
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Rows read:".bright_cyan(),
            stats.load.rows_read.to_string().bright_white()
        );
        println!(
            "  {} {} of {}",
            "Counties matched:".bright_cyan(),
            stats.features_matched.to_string().bright_white().bold(),
            stats.features_annotated.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Counties with growth:".bright_cyan(),
            stats.regions_with_growth.to_string().bright_white()
        );
        if let Some(path) = &stats.output_path {
            println!("  {} {}", "Output:".bright_cyan(), path.display());
        }
    }
}

#[cfg(test)]
mod tests;
