//! Channel scraper: resolve, list, enrich

use crate::core::progress::Progress;
use crate::core::models::{
    ChannelReference, CommentRecord, OutputDocument, VideoRecord, VideoStats,
};
use crate::error::ScrapeError;
use crate::platform::{CommentSnippet, Endpoint, VideoPlatform};
use crate::utils::extract_handle;
use tracing::{debug, info, warn};

/// What to collect per video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeMode {
    /// Metadata and statistics only
    Short,
    /// Metadata, statistics and top-level comments
    Full,
}

impl ScrapeMode {
    /// Whether comment threads are fetched
    pub fn includes_comments(self) -> bool {
        matches!(self, ScrapeMode::Full)
    }
}

/// Result of collecting one video's comments
#[derive(Debug, Clone, PartialEq)]
pub enum CommentsOutcome {
    /// Every page was read
    Collected(Vec<CommentRecord>),
    /// A request failed; `partial` holds the pages read before it
    Unavailable {
        partial: Vec<CommentRecord>,
        reason: String,
    },
}

impl CommentsOutcome {
    /// Comments gathered, complete or not
    pub fn into_comments(self) -> Vec<CommentRecord> {
        match self {
            CommentsOutcome::Collected(comments) => comments,
            CommentsOutcome::Unavailable { partial, .. } => partial,
        }
    }
}

/// A finished scrape, ready to be written
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub channel: ChannelReference,
    pub document: OutputDocument,
    /// Sum of the per-video compact JSON sizes
    pub batch_bytes: u64,
}

type ProgressCallback = Box<dyn Fn(Progress) + Send + Sync>;

/// Walks the platform API for one channel, strictly one request at a time
pub struct ChannelScraper<P: VideoPlatform> {
    platform: P,
    progress: Option<ProgressCallback>,
}

impl<P: VideoPlatform> ChannelScraper<P> {
    /// Create a scraper over a platform client
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            progress: None,
        }
    }

    /// Set progress callback
    pub fn with_progress(mut self, callback: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Get the underlying platform client
    pub fn platform(&self) -> &P {
        &self.platform
    }

    fn report(&self, event: Progress) {
        if let Some(callback) = &self.progress {
            callback(event);
        }
    }

    /// Resolve the channel a handle URL points at.
    ///
    /// The first search hit is taken; a hit whose title does not mention the
    /// handle is only logged.
    pub async fn resolve_channel(&self, channel_url: &str) -> Result<ChannelReference, ScrapeError> {
        let handle = extract_handle(channel_url)?;
        self.report(Progress::ResolvingChannel {
            handle: handle.clone(),
        });
        info!("Resolving channel for handle: {}", handle);

        let response = self.platform.search_channels(&handle).await?;
        let first = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::ChannelNotFound(handle.clone()))?;

        if !first
            .snippet
            .title
            .to_lowercase()
            .contains(&handle.to_lowercase())
        {
            warn!(
                "First channel match \"{}\" ({}) does not mention @{}; using it anyway",
                first.snippet.title, first.snippet.channel_id, handle
            );
        }

        debug!("Resolved @{} to {}", handle, first.snippet.channel_id);
        Ok(ChannelReference {
            identifier: first.snippet.channel_id,
            handle,
        })
    }

    /// List every upload of a channel, newest first
    pub async fn list_videos(&self, channel_id: &str) -> Result<Vec<VideoRecord>, ScrapeError> {
        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page = 0;

        loop {
            let response = self
                .platform
                .search_channel_videos(channel_id, page_token.as_deref())
                .await?;
            page += 1;

            for item in response.items {
                let Some(video_id) = item.video_id().map(str::to_string) else {
                    debug!("Skipping non-video result of kind {:?}", item.id.kind);
                    continue;
                };
                videos.push(VideoRecord::stub(
                    video_id,
                    item.snippet.title,
                    item.snippet.description,
                    item.snippet.published_at,
                ));
            }

            self.report(Progress::ListedPage {
                page,
                videos_so_far: videos.len(),
            });

            page_token = response.next_page_token.filter(|token| !token.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        info!("Listed {} videos in {} pages", videos.len(), page);
        Ok(videos)
    }

    /// View count and full description of a video.
    ///
    /// A video the API no longer returns yields zero views and an empty
    /// description.
    pub async fn fetch_statistics(&self, video_id: &str) -> Result<VideoStats, ScrapeError> {
        let response = self.platform.video_details(video_id).await?;

        let Some(item) = response.items.into_iter().next() else {
            warn!("No statistics for video ID: {}", video_id);
            return Ok(VideoStats::default());
        };

        let views = match item.statistics.view_count.as_deref() {
            Some(count) => count
                .parse::<u64>()
                .map_err(|e| ScrapeError::UnexpectedResponse {
                    endpoint: Endpoint::Videos,
                    detail: format!("viewCount {:?} for {}: {}", count, video_id, e),
                })?,
            None => 0,
        };

        Ok(VideoStats {
            views,
            description: item.snippet.description,
        })
    }

    /// Top-level comments of a video.
    ///
    /// Request-level failures end collection for this video only and are
    /// reported as [`CommentsOutcome::Unavailable`]; anything else propagates.
    pub async fn fetch_comments(&self, video_id: &str) -> Result<CommentsOutcome, ScrapeError> {
        self.report(Progress::FetchingComments {
            video_id: video_id.to_string(),
        });

        let mut comments = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = match self
                .platform
                .comment_threads(video_id, page_token.as_deref())
                .await
            {
                Ok(response) => response,
                Err(e) if e.is_comment_isolatable() => {
                    warn!("Stopping comment collection for {}: {}", video_id, e);
                    let reason = e.to_string();
                    self.report(Progress::CommentsUnavailable {
                        video_id: video_id.to_string(),
                        reason: reason.clone(),
                    });
                    return Ok(CommentsOutcome::Unavailable {
                        partial: comments,
                        reason,
                    });
                }
                Err(e) => return Err(e),
            };

            comments.extend(
                response
                    .items
                    .into_iter()
                    .map(|thread| comment_record(thread.snippet.top_level_comment.snippet)),
            );

            page_token = response.next_page_token.filter(|token| !token.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        debug!("Collected {} comments for {}", comments.len(), video_id);
        Ok(CommentsOutcome::Collected(comments))
    }

    /// Enrich listed videos and assemble the chronological document.
    ///
    /// Returns the document and the summed compact JSON size of the records.
    pub async fn build_document(
        &self,
        channel: &ChannelReference,
        mut videos: Vec<VideoRecord>,
        mode: ScrapeMode,
    ) -> Result<(OutputDocument, u64), ScrapeError> {
        let total = videos.len();
        let mut batch_bytes: u64 = 0;

        for (index, video) in videos.iter_mut().enumerate() {
            self.report(Progress::FetchingStatistics {
                video_id: video.id.clone(),
                index,
                total,
            });
            let stats = self.fetch_statistics(&video.id).await?;
            video.apply_stats(stats);

            if mode.includes_comments() {
                video.comments = self.fetch_comments(&video.id).await?.into_comments();
            }

            batch_bytes += video.encoded_len()? as u64;
        }

        Ok((
            OutputDocument::from_listing(channel.identifier.clone(), videos),
            batch_bytes,
        ))
    }

    /// Resolve, list and enrich a channel
    pub async fn scrape(&self, channel_url: &str, mode: ScrapeMode) -> Result<Snapshot, ScrapeError> {
        let channel = self.resolve_channel(channel_url).await?;
        let videos = self.list_videos(&channel.identifier).await?;
        let (document, batch_bytes) = self.build_document(&channel, videos, mode).await?;

        Ok(Snapshot {
            channel,
            document,
            batch_bytes,
        })
    }
}

fn comment_record(snippet: CommentSnippet) -> CommentRecord {
    CommentRecord {
        user_id: snippet
            .author_channel_id
            .map(|author| author.value)
            .unwrap_or_default(),
        context: snippet.text_original,
        likes: snippet.like_count,
        timestamp: snippet.published_at,
    }
}
