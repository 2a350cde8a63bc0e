//! Snapshot record structures

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Watch page prefix; a video's URL is this plus its id
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Resolved channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReference {
    /// Opaque platform channel id
    pub identifier: String,
    /// Handle taken from the input URL, without the `@`
    pub handle: String,
}

/// One video in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub date_uploaded: DateTime<Utc>,
    pub url: String,
    pub comments: Vec<CommentRecord>,
    pub views_count: u64,
}

impl VideoRecord {
    /// Create an unenriched record as produced by listing
    pub fn stub(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        date_uploaded: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        Self {
            url: watch_url(&id),
            id,
            title: title.into(),
            description: description.into(),
            date_uploaded,
            comments: Vec::new(),
            views_count: 0,
        }
    }

    /// Apply fetched statistics, replacing the truncated search description
    pub fn apply_stats(&mut self, stats: VideoStats) {
        self.views_count = stats.views;
        self.description = stats.description;
    }

    /// Size of the compact JSON encoding in bytes
    pub fn encoded_len(&self) -> Result<usize, serde_json::Error> {
        Ok(serde_json::to_vec(self)?.len())
    }
}

/// One top-level comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Author channel id, empty when the API omits it
    pub user_id: String,
    /// Comment text as written
    pub context: String,
    pub likes: u64,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Utc>,
}

/// View count and full description of a video
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoStats {
    pub views: u64,
    pub description: String,
}

/// The persisted snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub target_channel_id: String,
    pub total_videos: usize,
    /// Oldest upload first
    pub videos_list: Vec<VideoRecord>,
}

impl OutputDocument {
    /// Wrap records listed newest-first into a chronological document
    pub fn from_listing(target_channel_id: impl Into<String>, mut videos: Vec<VideoRecord>) -> Self {
        videos.reverse();
        Self {
            target_channel_id: target_channel_id.into(),
            total_videos: videos.len(),
            videos_list: videos,
        }
    }
}

/// Watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

fn serialize_rfc3339<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_stub_derives_url() {
        let record = VideoRecord::stub("dQw4w9WgXcQ", "Title", "short", date(2024, 1, 1));
        assert_eq!(record.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(record.views_count, 0);
        assert!(record.comments.is_empty());
    }

    #[test]
    fn test_apply_stats_overwrites_description() {
        let mut record = VideoRecord::stub("v1", "Title", "trunc...", date(2024, 1, 1));
        record.apply_stats(VideoStats {
            views: 42,
            description: "full description".to_string(),
        });
        assert_eq!(record.views_count, 42);
        assert_eq!(record.description, "full description");
    }

    #[test]
    fn test_video_record_field_order() {
        let record = VideoRecord::stub("v1", "T", "D", date(2024, 1, 1));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":"v1","title":"T","description":"D","date_uploaded":"2024-01-01T00:00:00Z","url":"https://www.youtube.com/watch?v=v1","comments":[],"views_count":0}"#
        );
    }

    #[test]
    fn test_comment_record_serialization() {
        let comment = CommentRecord {
            user_id: String::new(),
            context: "nice".to_string(),
            likes: 3,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap(),
        };
        let json = serde_json::to_string(&comment).unwrap();
        assert_eq!(
            json,
            r#"{"user_id":"","context":"nice","likes":3,"timestamp":"2024-03-04T05:06:07Z"}"#
        );
    }

    #[test]
    fn test_from_listing_reverses() {
        let listed = vec![
            VideoRecord::stub("v2", "new", "", date(2024, 2, 1)),
            VideoRecord::stub("v1", "old", "", date(2024, 1, 1)),
        ];
        let doc = OutputDocument::from_listing("UC1", listed);
        assert_eq!(doc.target_channel_id, "UC1");
        assert_eq!(doc.total_videos, 2);
        let ids: Vec<&str> = doc.videos_list.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["v1", "v2"]);
    }

    #[test]
    fn test_encoded_len_counts_utf8_bytes() {
        let ascii = VideoRecord::stub("v1", "ab", "", date(2024, 1, 1));
        let cyrillic = VideoRecord::stub("v1", "аб", "", date(2024, 1, 1));
        assert_eq!(
            cyrillic.encoded_len().unwrap(),
            ascii.encoded_len().unwrap() + 2
        );
    }
}
