//! Broken-Links main entry point
//!
//! This is the command-line interface for the Broken-Links site checker.

use broken_links::config::{discard_invalid_login, load_config, validate, Config, LoginConfig};
use broken_links::crawler::crawl;
use broken_links::output::{build_report, print_report, render_json, CrawlStatistics};
use broken_links::url::parse_seed;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Broken-Links: find dead links on a website
///
/// Broken-Links visits every page reachable from the seed URL without
/// leaving the seed's host, checks each link it finds, and reports which
/// pages are broken and where they are linked from.
#[derive(Parser, Debug)]
#[command(name = "broken-links")]
#[command(version = "1.0.0")]
#[command(about = "Find dead links on a website", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(short, long)]
    url: String,

    /// Maximum number of pages fetched at once
    #[arg(short, long, visible_alias = "depth")]
    parallelism: Option<u32>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Login form URL; enables the login step
    #[arg(long)]
    login_url: Option<String>,

    /// Username for the login form
    #[arg(long)]
    username: Option<String>,

    /// Password for the login form
    #[arg(long)]
    password: Option<String>,

    /// Print the JSON report to stdout
    #[arg(long)]
    json: bool,

    /// Do not print the human-readable report
    #[arg(long)]
    no_print: bool,

    /// Stop the crawl after this many seconds
    #[arg(long, value_name = "SECS")]
    max_duration: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the reports on stdout stay machine-readable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("broken_links=info,warn"),
            1 => EnvFilter::new("broken_links=debug,info"),
            2 => EnvFilter::new("broken_links=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the crawl and prints the reports
///
/// Returns whether any broken page was found.
async fn run(cli: Cli) -> broken_links::Result<bool> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    validate(&config)?;
    discard_invalid_login(&mut config);

    let seed = parse_seed(&cli.url)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            let _ = shutdown_tx.send(true);
        }
    });

    let outcome = crawl(seed, &config, Some(shutdown_rx)).await?;
    let reports = build_report(&outcome.registry);
    let stats = CrawlStatistics::from_reports(&reports);

    if !cli.no_print {
        print_report(&reports, &outcome);
    }
    if cli.json {
        println!("{}", render_json(&reports)?);
    }

    tracing::info!(
        "{} pages checked, {} broken ({:.1}%)",
        stats.total,
        stats.broken,
        stats.broken_percentage()
    );

    Ok(stats.has_broken())
}

/// Applies command-line values on top of the file configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(parallelism) = cli.parallelism {
        config.crawler.parallelism = parallelism;
    }
    if let Some(secs) = cli.max_duration {
        config.crawler.max_duration_secs = Some(secs);
    }

    if cli.login_url.is_some() || cli.username.is_some() || cli.password.is_some() {
        let login = config.login.get_or_insert_with(LoginConfig::default);
        if let Some(url) = &cli.login_url {
            login.url = url.clone();
        }
        if let Some(username) = &cli.username {
            login.username = username.clone();
        }
        if let Some(password) = &cli.password {
            login.password = password.clone();
        }
    }
}
