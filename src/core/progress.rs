//! Progress events for a scrape run

use std::fmt;

/// Stage of a scrape run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Listing,
    Enriching,
    Writing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Resolving => "resolving",
            Stage::Listing => "listing",
            Stage::Enriching => "enriching",
            Stage::Writing => "writing",
            Stage::Done => "done",
        };
        f.write_str(label)
    }
}

/// A single progress notification emitted by the scraper
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Looking up the channel id for a handle
    ResolvingChannel { handle: String },
    /// A page of uploads was listed
    ListedPage { page: usize, videos_so_far: usize },
    /// Fetching statistics for one video
    FetchingStatistics {
        video_id: String,
        index: usize,
        total: usize,
    },
    /// Fetching comments for one video
    FetchingComments { video_id: String },
    /// Comment collection for one video ended early
    CommentsUnavailable { video_id: String, reason: String },
    /// Serializing and writing the snapshot
    Writing,
}

impl Progress {
    /// Stage this event belongs to
    pub fn stage(&self) -> Stage {
        match self {
            Progress::ResolvingChannel { .. } => Stage::Resolving,
            Progress::ListedPage { .. } => Stage::Listing,
            Progress::FetchingStatistics { .. }
            | Progress::FetchingComments { .. }
            | Progress::CommentsUnavailable { .. } => Stage::Enriching,
            Progress::Writing => Stage::Writing,
        }
    }

    /// One-line status text
    pub fn message(&self) -> String {
        match self {
            Progress::ResolvingChannel { handle } => {
                format!("Extracting channel ID for @{}...", handle)
            }
            Progress::ListedPage {
                page,
                videos_so_far,
            } => format!("Fetching videos... page {} ({} so far)", page, videos_so_far),
            Progress::FetchingStatistics {
                video_id,
                index,
                total,
            } => format!(
                "[{}/{}] Fetching statistics for video ID: {}",
                index + 1,
                total,
                video_id
            ),
            Progress::FetchingComments { video_id } => {
                format!("Fetching comments for video ID: {}", video_id)
            }
            Progress::CommentsUnavailable { video_id, reason } => {
                format!("Comments are closed for video ID: {} ({})", video_id, reason)
            }
            Progress::Writing => "Generating JSON data...".to_string(),
        }
    }
}

/// Format a byte count as kilobytes with two decimals
pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}
