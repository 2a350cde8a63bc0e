//! # chanscrape - channel snapshot scraper
//!
//! Exports every upload of a video channel, with view counts, full
//! descriptions and optionally top-level comments, into one JSON document.
//!
//! ## Features
//!
//! - Channel resolution from `@handle` URLs
//! - Cursor-paged upload listing
//! - Per-video statistics and comment collection
//! - Comment failures isolated to the affected video
//! - Pretty, UTF-8 JSON snapshots, oldest upload first
//!
//! ## Example
//!
//! ```rust,no_run
//! use chanscrape::{ChannelScraper, DataApiClient, ScrapeMode, SnapshotWriter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scraper = ChannelScraper::new(DataApiClient::new("API_KEY")?);
//!     let snapshot = scraper
//!         .scrape("https://www.youtube.com/@somechannel", ScrapeMode::Short)
//!         .await?;
//!
//!     let path = SnapshotWriter::new("data")
//!         .write(&snapshot.channel.handle, &snapshot.document)
//!         .await?;
//!     println!("Wrote {} videos to {}", snapshot.document.total_videos, path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod export;
pub mod platform;
pub mod utils;

// Re-export main types
pub use core::{
    ChannelReference, ChannelScraper, CommentRecord, OutputDocument, Progress, ScrapeMode,
    Settings, Snapshot, VideoRecord,
};
pub use error::ScrapeError;
pub use export::SnapshotWriter;
pub use platform::{DataApiClient, VideoPlatform};

/// Result type alias for chanscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
