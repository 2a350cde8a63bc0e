//! Main entry point for chanscrape CLI

use chanscrape::cli::output::create_progress_callback;
use chanscrape::cli::{Args, OutputFormatter};
use chanscrape::core::{ChannelScraper, Progress, ScrapeMode, Settings};
use chanscrape::export::SnapshotWriter;
use chanscrape::platform::DataApiClient;
use chanscrape::ScrapeError;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// What a finished run reports back
struct RunSummary {
    output_path: PathBuf,
    total_videos: usize,
    batch_bytes: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Failed to initialize logging: {:#}", e);
    }

    debug!("Starting chanscrape with args: {:?}", args);

    let settings = args.settings();
    let formatter = OutputFormatter::new(args.verbosity_level());

    // Storing a key ends the run regardless of other flags
    if let Some(api_key) = args.new_api_key() {
        match settings.config_store().set_api_key(api_key) {
            Ok(()) => {
                formatter.success(&format!(
                    "API key saved to {}",
                    settings.config_path().display()
                ));
                return;
            }
            Err(e) => fail(&formatter, e),
        }
    }

    let Some(mode) = args.mode() else {
        formatter.print_help();
        return;
    };

    // clap only lets a mode through together with a URL
    let channel_url = args.url.clone().unwrap_or_default();

    let formatter = Arc::new(formatter.with_spinner());
    match run(&settings, &channel_url, mode, formatter.clone()).await {
        Ok(summary) => {
            formatter.finish();
            formatter.print_summary(
                summary.total_videos,
                summary.batch_bytes,
                &summary.output_path,
            );
        }
        Err(e) => fail(&formatter, e),
    }
}

/// Scrape one channel and write its snapshot
async fn run(
    settings: &Settings,
    channel_url: &str,
    mode: ScrapeMode,
    formatter: Arc<OutputFormatter>,
) -> Result<RunSummary, ScrapeError> {
    let api_key = settings.config_store().load_api_key()?;
    if api_key.is_empty() {
        return Err(ScrapeError::MissingApiKey {
            path: settings.config_path(),
        });
    }

    let platform = DataApiClient::with_config(api_key, settings.http_config())?;
    let scraper =
        ChannelScraper::new(platform).with_progress(create_progress_callback(formatter.clone()));

    info!("Scraping {} in {:?} mode", channel_url, mode);
    let snapshot = scraper.scrape(channel_url, mode).await?;

    formatter.update(&Progress::Writing);
    let writer = SnapshotWriter::new(&settings.data_dir);
    let output_path = writer
        .write(&snapshot.channel.handle, &snapshot.document)
        .await?;

    Ok(RunSummary {
        output_path,
        total_videos: snapshot.document.total_videos,
        batch_bytes: snapshot.batch_bytes,
    })
}

/// Report a fatal error and exit with its category's code
fn fail(formatter: &OutputFormatter, e: ScrapeError) -> ! {
    error!("{:?}", e);
    formatter.error(&e.to_string());
    std::process::exit(e.exit_code());
}

/// Initialize logging system
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    // --verbose overrides RUST_LOG; otherwise only warnings, so the spinner stays readable
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
