//! Command line argument parsing

use crate::core::scraper::ScrapeMode;
use crate::core::settings::{Settings, DEFAULT_CONFIG_DIR, DEFAULT_DATA_DIR};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Channel scraper - snapshot a channel's uploads, statistics and comments as JSON
#[derive(Parser, Debug)]
#[command(name = "chanscrape", author, version, about, long_about = None)]
pub struct Args {
    /// Scrape videos and statistics, without comments
    #[arg(short, long)]
    pub short: bool,

    /// Scrape videos, statistics and top-level comments
    #[arg(short, long)]
    pub full: bool,

    /// Channel URL containing an @handle (e.g. https://www.youtube.com/@name)
    #[arg(
        short,
        long,
        value_name = "URL",
        required_if_eq_any = [("short", "true"), ("full", "true")]
    )]
    pub url: Option<String>,

    /// Store the API key in the config file and exit
    #[arg(short = 'k', long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Directory holding config.json
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// Directory snapshots are written to
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub output_dir: PathBuf,

    /// HTTP timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Requested scrape mode; `--full` wins over `--short`
    pub fn mode(&self) -> Option<ScrapeMode> {
        if self.full {
            Some(ScrapeMode::Full)
        } else if self.short {
            Some(ScrapeMode::Short)
        } else {
            None
        }
    }

    /// Key passed with `-k`; an empty value counts as not given
    pub fn new_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Run settings described by these arguments
    pub fn settings(&self) -> Settings {
        Settings::default()
            .with_config_dir(&self.config_dir)
            .with_data_dir(&self.output_dir)
            .with_timeout(self.timeout_duration())
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            short: false,
            full: false,
            url: None,
            api_key: None,
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            output_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: humantime::Duration::from(Duration::from_secs(30)),
            verbose: false,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const URL: &str = "https://www.youtube.com/@somechannel";

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_mode() {
        assert_eq!(Args::default().mode(), None);

        let args = Args {
            short: true,
            ..Default::default()
        };
        assert_eq!(args.mode(), Some(ScrapeMode::Short));

        let args = Args {
            full: true,
            ..Default::default()
        };
        assert_eq!(args.mode(), Some(ScrapeMode::Full));

        // Full wins when both are given
        let args = Args {
            short: true,
            full: true,
            ..Default::default()
        };
        assert_eq!(args.mode(), Some(ScrapeMode::Full));
    }

    #[test]
    fn test_args_verbosity_level() {
        assert_eq!(Args::default().verbosity_level(), VerbosityLevel::Normal);

        let args = Args {
            quiet: true,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);

        let args = Args {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Verbose);
    }

    #[test]
    fn test_args_timeout_duration() {
        let args = Args {
            timeout: humantime::Duration::from(Duration::from_secs(60)),
            ..Default::default()
        };
        assert_eq!(args.timeout_duration(), Duration::from_secs(60));
    }

    #[test]
    fn test_args_settings() {
        let args = Args {
            config_dir: PathBuf::from("/etc/chanscrape"),
            output_dir: PathBuf::from("/tmp/out"),
            timeout: humantime::Duration::from(Duration::from_secs(5)),
            ..Default::default()
        };
        let settings = args.settings();
        assert_eq!(
            settings.config_path(),
            PathBuf::from("/etc/chanscrape/config.json")
        );
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/out"));
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["chanscrape"]).unwrap();
        assert_eq!(args.mode(), None);
        assert_eq!(args.url, None);
        assert_eq!(args.api_key, None);
        assert_eq!(args.config_dir, PathBuf::from("settings"));
        assert_eq!(args.output_dir, PathBuf::from("data"));
        assert_eq!(args.timeout_duration(), Duration::from_secs(30));
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_parse_scrape_flags() {
        let args = Args::try_parse_from(["chanscrape", "-s", "-u", URL]).unwrap();
        assert_eq!(args.mode(), Some(ScrapeMode::Short));
        assert_eq!(args.url.as_deref(), Some(URL));

        let args = Args::try_parse_from([
            "chanscrape",
            "--full",
            "--url",
            URL,
            "--timeout",
            "1m",
            "--output-dir",
            "out",
        ])
        .unwrap();
        assert_eq!(args.mode(), Some(ScrapeMode::Full));
        assert_eq!(args.timeout_duration(), Duration::from_secs(60));
        assert_eq!(args.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_parse_api_key() {
        let args = Args::try_parse_from(["chanscrape", "-k", "AIza-test"]).unwrap();
        assert_eq!(args.api_key.as_deref(), Some("AIza-test"));
        assert_eq!(args.mode(), None);
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let args = Args::try_parse_from(["chanscrape", "-k", ""]).unwrap();
        assert_eq!(args.api_key.as_deref(), Some(""));
        assert_eq!(args.new_api_key(), None);

        let args = Args::try_parse_from(["chanscrape", "-k", "AIza-test"]).unwrap();
        assert_eq!(args.new_api_key(), Some("AIza-test"));
        assert_eq!(Args::default().new_api_key(), None);
    }

    #[test]
    fn test_parse_requires_url_with_mode() {
        assert!(Args::try_parse_from(["chanscrape", "--short"]).is_err());
        assert!(Args::try_parse_from(["chanscrape", "-f"]).is_err());

        // A URL on its own is accepted and simply unused
        assert!(Args::try_parse_from(["chanscrape", "-u", URL]).is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_timeout() {
        assert!(Args::try_parse_from(["chanscrape", "--timeout", "soon"]).is_err());
    }
}
