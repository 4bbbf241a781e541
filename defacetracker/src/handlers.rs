use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::ArgMatches;
use colored::Colorize;
use defacetracker_core::TrackerError;
use defacetracker_core::report::{OutputFormat, default_output_name, write_records};
use defacetracker_core::scrape::{
    ScrapeOptions, ScrapeProgressCallback, ScrapeSummary, execute_scrape, generate_scrape_report,
};
use defacetracker_core::target::Target;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

/// Install the global subscriber: stdout plus an optional append-only log file.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Expand `~` in a user supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

pub fn resolve_target(args: &ArgMatches) -> Result<Target, TrackerError> {
    let domain = args.get_one::<String>("domain").map(String::as_str);
    let tld = args.get_one::<String>("tld").map(String::as_str);
    Target::from_args(domain, tld)
}

/// Use `--output` when given, else `DDMMYYYY_<target>.<format>` in the
/// working directory.
pub fn resolve_output_path(
    output: Option<&str>,
    target: &Target,
    format: OutputFormat,
    today: NaiveDate,
) -> PathBuf {
    match output {
        Some(path) => expand_path(path),
        None => PathBuf::from(default_output_name(target, format, today)),
    }
}

fn progress_spinner(quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Starting the scraping process...");
    Some(pb)
}

pub async fn handle_scrape(args: &ArgMatches) -> Result<ScrapeSummary> {
    let quiet = args.get_flag("quiet");

    let target = resolve_target(args).context("Invalid scrape target")?;

    let format_name = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv");
    let format = OutputFormat::parse(format_name)?;

    let pages = *args.get_one::<u8>("pages").unwrap_or(&1);
    let timeout = *args.get_one::<u64>("timeout").unwrap_or(&10);

    let output = resolve_output_path(
        args.get_one::<String>("output").map(String::as_str),
        &target,
        format,
        Local::now().date_naive(),
    );

    let mut options = ScrapeOptions::new(target.clone(), pages)?.with_timeout(timeout);
    if let Some(origin) = args.get_one::<Url>("origin") {
        options = options.with_origin(origin.clone());
    }

    info!("Starting the scraping process for {}", target.describe());

    let spinner = progress_spinner(quiet);
    let progress_callback: Option<ScrapeProgressCallback> = spinner.clone().map(|pb| {
        Arc::new(move |msg: String| {
            pb.set_message(msg);
        }) as ScrapeProgressCallback
    });

    let result = execute_scrape(options, progress_callback).await;
    if let Some(ref pb) = spinner {
        pb.finish_and_clear();
    }
    let summary = result.with_context(|| format!("Scraping {} failed", target.describe()))?;

    write_records(&summary.records, format, &output)
        .with_context(|| format!("Could not save results to {}", output.display()))?;

    info!("Total number of entries scraped: {}", summary.records.len());
    info!(
        "Total running time: {:.2} seconds",
        summary.elapsed.as_secs_f64()
    );

    if !quiet {
        println!("\n{} Scrape complete!\n", "✓".green().bold());
        print!("{}", generate_scrape_report(&summary));
        println!(
            "  Output file:     {}\n",
            output.display().to_string().bright_white()
        );
    }

    Ok(summary)
}
