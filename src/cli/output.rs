//! Output formatting and progress display

use crate::cli::args::{Args, VerbosityLevel};
use clap::CommandFactory;
use crate::core::progress::{format_kilobytes, Progress, Stage};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Output formatter for chanscrape
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    spinner: Option<ProgressBar>,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            spinner: None,
        }
    }

    /// Attach a status spinner; quiet output never gets one
    pub fn with_spinner(mut self) -> Self {
        if self.verbosity == VerbosityLevel::Quiet {
            return self;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{prefix}] {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(120));

        self.spinner = Some(spinner);
        self
    }

    /// Show a scraper progress event
    pub fn update(&self, progress: &Progress) {
        let Some(spinner) = &self.spinner else {
            return;
        };

        spinner.set_prefix(progress.stage().to_string());
        match progress {
            // Printed above the spinner so it stays visible
            Progress::CommentsUnavailable { .. } => {
                spinner.println(format!("{} {}", "!".yellow(), progress.message()));
            }
            _ => spinner.set_message(progress.message()),
        }
        if self.verbosity == VerbosityLevel::Verbose {
            spinner.println(format!("  {}", progress.message().dimmed()));
        }
    }

    /// Stop the spinner and remove it from the terminal
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.set_prefix(Stage::Done.to_string());
            spinner.finish_and_clear();
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{}", message.green());
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        self.finish();
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    /// Print the end-of-run summary line
    pub fn print_summary(&self, total_videos: usize, batch_bytes: u64, output_path: &Path) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!("{}", summary_line(total_videos, batch_bytes).green().bold());
        if self.verbosity == VerbosityLevel::Verbose {
            println!("Snapshot written to {}", output_path.display());
        }
    }

    /// Print the full usage text with every flag
    pub fn print_help(&self) {
        println!("{}", help_text());
    }
}

/// Create a progress callback for the scraper
pub fn create_progress_callback(
    formatter: Arc<OutputFormatter>,
) -> impl Fn(Progress) + Send + Sync + 'static {
    move |progress: Progress| {
        formatter.update(&progress);
    }
}

/// Usage text generated from the argument definitions
pub fn help_text() -> String {
    Args::command().render_help().to_string()
}

/// `Finished. Total videos: N, Batch size: X.XX KB`
pub fn summary_line(total_videos: usize, batch_bytes: u64) -> String {
    format!(
        "Finished. Total videos: {}, Batch size: {}",
        total_videos,
        format_kilobytes(batch_bytes)
    )
}
