//! Data API resources: response schemas and the platform seam

use crate::error::ScrapeError;
use crate::platform::client::{ApiClient, Endpoint, HttpClientConfig};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Results per page when listing a channel's uploads (API maximum)
pub const SEARCH_PAGE_SIZE: u32 = 50;

/// Comment threads per page (API maximum)
pub const COMMENT_PAGE_SIZE: u32 = 100;

/// Error reason the API reports for videos with comments turned off
pub const COMMENTS_DISABLED_REASON: &str = "commentsDisabled";

/// Operations the scraper needs from the video platform.
///
/// Every method issues exactly one request and returns the decoded page.
#[async_trait::async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Free-text channel search
    async fn search_channels(&self, query: &str) -> Result<SearchListResponse, ScrapeError>;

    /// One page of a channel's uploads, newest first
    async fn search_channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse, ScrapeError>;

    /// Statistics and full snippet for one video
    async fn video_details(&self, video_id: &str) -> Result<VideoListResponse, ScrapeError>;

    /// One page of top-level comment threads for a video
    async fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, ScrapeError>;
}

/// [`VideoPlatform`] backed by the public REST API
pub struct DataApiClient {
    http: ApiClient,
}

impl DataApiClient {
    /// Create a client against the public API root
    pub fn new(api_key: impl Into<String>) -> Result<Self, ScrapeError> {
        Ok(Self {
            http: ApiClient::new(api_key)?,
        })
    }

    /// Create a client with custom HTTP configuration
    pub fn with_config(
        api_key: impl Into<String>,
        config: HttpClientConfig,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            http: ApiClient::with_config(api_key, config)?,
        })
    }
}

#[async_trait::async_trait]
impl VideoPlatform for DataApiClient {
    async fn search_channels(&self, query: &str) -> Result<SearchListResponse, ScrapeError> {
        self.http
            .get_json(
                Endpoint::Search,
                &[("part", "snippet"), ("q", query), ("type", "channel")],
            )
            .await
    }

    async fn search_channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse, ScrapeError> {
        let max_results = SEARCH_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("channelId", channel_id),
            ("maxResults", max_results.as_str()),
            ("order", "date"),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        self.http.get_json(Endpoint::Search, &query).await
    }

    async fn video_details(&self, video_id: &str) -> Result<VideoListResponse, ScrapeError> {
        self.http
            .get_json(
                Endpoint::Videos,
                &[("part", "statistics,snippet"), ("id", video_id)],
            )
            .await
    }

    async fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, ScrapeError> {
        let max_results = COMMENT_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        match self.http.get_json(Endpoint::CommentThreads, &query).await {
            Err(ScrapeError::Api {
                reason: Some(reason),
                ..
            }) if reason == COMMENTS_DISABLED_REASON => {
                debug!("Comments disabled for {}", video_id);
                Err(ScrapeError::CommentsDisabled {
                    video_id: video_id.to_string(),
                })
            }
            other => other,
        }
    }
}

/// `search.list` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
    pub snippet: SearchSnippet,
}

/// Identifies what a search result points at; exactly one id is set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub kind: String,
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
    pub playlist_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub published_at: DateTime<Utc>,
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub channel_title: Option<String>,
}

impl SearchResult {
    /// Video id when this result is a non-empty video reference
    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// `videos.list` response
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoResource {
    pub id: String,
    pub statistics: VideoStatistics,
    pub snippet: VideoSnippet,
}

/// Counters arrive as decimal strings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoSnippet {
    #[serde(default)]
    pub description: String,
}

/// `commentThreads.list` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub author_channel_id: Option<AuthorChannelId>,
    pub text_original: String,
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorChannelId {
    pub value: String,
}
