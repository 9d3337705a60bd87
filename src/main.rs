use anyhow::Context;
use clap::Parser;
use county_trends::TrendProcessor;
use county_trends::cli::Args;
use std::process;
use tracing::debug;

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.to_config().context("Failed to build configuration")?;
    let processor = TrendProcessor::new(config)
        .context("Invalid configuration")?
        .with_report_only(args.report_only);

    let stats = processor.process().with_context(|| {
        format!(
            "Failed to process {}",
            processor.config().records_path.display()
        )
    })?;

    debug!("Run finished in {}ms", stats.processing_time_ms);
    Ok(())
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("county_trends={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
