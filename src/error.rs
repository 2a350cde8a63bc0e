//! Error types for chanscrape

use crate::platform::Endpoint;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for chanscrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Set API key first in {}", path.display())]
    MissingApiKey { path: PathBuf },

    #[error("Could not extract channel handle from URL: {0}")]
    InvalidChannelUrl(String),

    #[error("No channel found for handle: {0}")]
    ChannelNotFound(String),

    #[error("Comments are closed for video ID: {video_id}")]
    CommentsDisabled { video_id: String },

    #[error("{endpoint} request failed with status {status}: {message}")]
    Api {
        endpoint: Endpoint,
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected {endpoint} response: {detail}")]
    UnexpectedResponse { endpoint: Endpoint, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Coarse error categories, each with its own process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No credential configured
    Config,
    /// Channel URL carries no handle
    Input,
    /// Handle resolves to no channel
    NotFound,
    /// API, transport or response-shape failure
    Upstream,
    /// Comment threads unavailable for one video
    CommentsUnavailable,
    /// Local filesystem or serialization failure
    Local,
}

impl ErrorCategory {
    /// Process exit code for this category
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Local => 1,
            ErrorCategory::Config => 3,
            ErrorCategory::Input => 4,
            ErrorCategory::NotFound => 5,
            ErrorCategory::Upstream | ErrorCategory::CommentsUnavailable => 6,
        }
    }
}

impl ScrapeError {
    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::MissingApiKey { .. } => ErrorCategory::Config,
            ScrapeError::InvalidChannelUrl(_) => ErrorCategory::Input,
            ScrapeError::ChannelNotFound(_) => ErrorCategory::NotFound,
            ScrapeError::CommentsDisabled { .. } => ErrorCategory::CommentsUnavailable,
            ScrapeError::Api { .. }
            | ScrapeError::Http(_)
            | ScrapeError::UnexpectedResponse { .. } => ErrorCategory::Upstream,
            ScrapeError::Io(_)
            | ScrapeError::Json(_)
            | ScrapeError::Url(_)
            | ScrapeError::Regex(_) => ErrorCategory::Local,
        }
    }

    /// Exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Whether a comment-thread request failing with this error should only
    /// end comment collection for the current video.
    ///
    /// Request-level failures qualify; a body that does not match the
    /// expected schema does not.
    pub fn is_comment_isolatable(&self) -> bool {
        matches!(
            self,
            ScrapeError::CommentsDisabled { .. } | ScrapeError::Api { .. } | ScrapeError::Http(_)
        )
    }
}
