//! HTTP client for video platform API requests

use crate::error::ScrapeError;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Public Data API root
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3/";

const USER_AGENT: &str = concat!("chanscrape/", env!("CARGO_PKG_VERSION"));

/// API resources the scraper talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Videos,
    CommentThreads,
}

impl Endpoint {
    /// Path segment relative to the API root
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Videos => "videos",
            Endpoint::CommentThreads => "commentThreads",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// API root URL
    pub base_url: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Key-authenticated JSON client for the Data API
pub struct ApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(api_key: impl Into<String>) -> Result<Self, ScrapeError> {
        Self::with_config(api_key, HttpClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(
        api_key: impl Into<String>,
        config: HttpClientConfig,
    ) -> Result<Self, ScrapeError> {
        let builder = ClientBuilder::new()
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(USER_AGENT);

        // Url::join drops the last segment unless the root ends with '/'
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        Ok(Self {
            client: builder.build()?,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Absolute URL of an endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ScrapeError> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    /// Issue a GET against `endpoint` and decode the JSON body into `T`.
    ///
    /// Non-success statuses become [`ScrapeError::Api`] carrying the first
    /// reason from the error envelope. A success body that does not match `T`
    /// becomes [`ScrapeError::UnexpectedResponse`].
    pub async fn get_json<T>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
    ) -> Result<T, ScrapeError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        debug!("GET {} {:?}", endpoint, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = api_error(endpoint, status, &body);
            warn!("{}", error);
            return Err(error);
        }

        serde_json::from_str(&body).map_err(|e| ScrapeError::UnexpectedResponse {
            endpoint,
            detail: e.to_string(),
        })
    }
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

fn api_error(endpoint: Endpoint, status: StatusCode, body: &str) -> ScrapeError {
    let (reason, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (
            envelope.error.errors.into_iter().find_map(|e| e.reason),
            envelope.error.message,
        ),
        Err(_) => (None, String::new()),
    };

    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        message
    };

    ScrapeError::Api {
        endpoint,
        status: status.as_u16(),
        reason,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        value: u32,
    }

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::with_config(
            "test-key",
            HttpClientConfig {
                base_url: server.url(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Search.path(), "search");
        assert_eq!(Endpoint::Videos.path(), "videos");
        assert_eq!(Endpoint::CommentThreads.to_string(), "commentThreads");
    }

    #[test]
    fn test_http_client_config_default() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = ApiClient::with_config(
            "k",
            HttpClientConfig {
                base_url: "http://localhost:9000/youtube/v3".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            client.endpoint_url(Endpoint::CommentThreads).unwrap().as_str(),
            "http://localhost:9000/youtube/v3/commentThreads"
        );

        let client = ApiClient::new("k").unwrap();
        assert_eq!(
            client.endpoint_url(Endpoint::Search).unwrap().as_str(),
            "https://www.googleapis.com/youtube/v3/search"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::with_config(
            "k",
            HttpClientConfig {
                base_url: "not a url".to_string(),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(ScrapeError::Url(_))));
    }

    #[tokio::test]
    async fn test_get_json_sends_key_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/videos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "test-key".into()),
                Matcher::UrlEncoded("id".into(), "abc".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": 7}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let sample: Sample = client
            .get_json(Endpoint::Videos, &[("id", "abc")])
            .await
            .unwrap();

        assert_eq!(sample.value, 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_json_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_header(
                "user-agent",
                format!("chanscrape/{}", env!("CARGO_PKG_VERSION")).as_str(),
            )
            .with_status(200)
            .with_body(r#"{"value": 1}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let sample: Sample = client.get_json(Endpoint::Search, &[]).await.unwrap();

        assert_eq!(sample.value, 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_json_maps_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/commentThreads")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error": {"code": 403, "message": "The video has disabled comments.",
                    "errors": [{"domain": "youtube.commentThread", "reason": "commentsDisabled"}]}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get_json::<Sample>(Endpoint::CommentThreads, &[])
            .await
            .unwrap_err();

        match err {
            ScrapeError::Api {
                endpoint,
                status,
                reason,
                message,
            } => {
                assert_eq!(endpoint, Endpoint::CommentThreads);
                assert_eq!(status, 403);
                assert_eq!(reason.as_deref(), Some("commentsDisabled"));
                assert_eq!(message, "The video has disabled comments.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_json_error_without_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get_json::<Sample>(Endpoint::Search, &[])
            .await
            .unwrap_err();

        match err {
            ScrapeError::Api {
                status,
                reason,
                message,
                ..
            } => {
                assert_eq!(status, 500);
                assert!(reason.is_none());
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_json_rejects_unexpected_shape() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"other": true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get_json::<Sample>(Endpoint::Videos, &[])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::UnexpectedResponse {
                endpoint: Endpoint::Videos,
                ..
            }
        ));
    }
}
