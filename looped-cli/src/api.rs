//! HTTP client for the Looped study service.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use looped_core::{ApiError, ApiResult, FeedVideo, QuizPayload, UploadResponse};

use crate::config::Config;

const FETCH_FEED: &str = "fetch feed";
const UPLOAD: &str = "upload";
const FETCH_QUIZ: &str = "fetch quiz";

#[derive(Debug, Deserialize)]
struct FeedBody {
    #[serde(default)]
    videos: Option<Vec<FeedVideo>>,
}

/// Typed wrapper over the three remote operations
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(config.base_url())
            .with_context(|| format!("Invalid server URL: {}", config.server_url))?;
        if base.cannot_be_a_base() {
            bail!("Server URL cannot be used as a base: {base}");
        }

        let mut builder =
            reqwest::Client::builder().user_agent(concat!("looped/", env!("CARGO_PKG_VERSION")));
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /api/feed[?topic=…]`
    pub fn feed_url(&self, topic: Option<&str>) -> Url {
        let mut url = self.endpoint(&["api", "feed"]);
        if let Some(topic) = topic {
            url.query_pairs_mut().append_pair("topic", topic);
        }
        url
    }

    pub fn upload_url(&self) -> Url {
        self.endpoint(&["api", "upload"])
    }

    /// `POST /api/quiz/{videoId}`, the id encoded as one path segment
    pub fn quiz_url(&self, video_id: &str) -> Url {
        self.endpoint(&["api", "quiz", video_id])
    }

    /// Fetch the feed, optionally filtered by topic; a body without `videos` is an empty feed
    pub async fn fetch_feed(&self, topic: Option<&str>) -> ApiResult<Vec<FeedVideo>> {
        let url = self.feed_url(topic);
        debug!("GET {url}");
        let request = self.http.get(url);
        let body: FeedBody = send_json(FETCH_FEED, request).await?;
        Ok(body.videos.unwrap_or_default())
    }

    /// Upload a document for clip generation. Never retried: the server starts work per call.
    pub async fn upload_pdf(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<UploadResponse> {
        let url = self.upload_url();
        debug!("POST {url} ({file_name}, {} bytes)", bytes.len());
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let request = self.http.post(url).multipart(Form::new().part("file", part));
        send_json(UPLOAD, request).await
    }

    /// Ask the service to generate a quiz for `video_id`
    pub async fn fetch_quiz(&self, video_id: &str) -> ApiResult<QuizPayload> {
        let url = self.quiz_url(video_id);
        debug!("POST {url}");
        send_json(FETCH_QUIZ, self.http.post(url)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn send_json<T: DeserializeOwned>(operation: &str, request: reqwest::RequestBuilder) -> ApiResult<T> {
    let response = request.send().await.map_err(|e| {
        warn!("{operation}: request failed: {e}");
        ApiError::network(operation, e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!("{operation}: server answered {status}");
        return Err(ApiError::network(operation, format!("status {status}")));
    }

    response.json::<T>().await.map_err(|e| {
        warn!("{operation}: undecodable body: {e}");
        ApiError::network(operation, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(base: &str) -> ApiClient {
        let config = Config {
            server_url: base.to_string(),
            ..Config::default()
        };
        ApiClient::new(&config).unwrap()
    }

    /// Serve one canned HTTP response and hand back the request head
    async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&head).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_endpoint_urls() {
        let api = client("http://localhost:4000");
        assert_eq!(api.feed_url(None).as_str(), "http://localhost:4000/api/feed");
        assert_eq!(
            api.feed_url(Some("Linear Algebra")).as_str(),
            "http://localhost:4000/api/feed?topic=Linear+Algebra"
        );
        assert_eq!(api.upload_url().as_str(), "http://localhost:4000/api/upload");
        assert_eq!(api.quiz_url("a/b c").as_str(), "http://localhost:4000/api/quiz/a%2Fb%20c");
    }

    #[test]
    fn test_base_with_prefix() {
        let api = client("https://study.example.com/looped/");
        assert_eq!(
            api.quiz_url("v1").as_str(),
            "https://study.example.com/looped/api/quiz/v1"
        );
    }

    #[test]
    fn test_invalid_base_rejected() {
        let config = Config {
            server_url: "not a url".into(),
            ..Config::default()
        };
        assert!(ApiClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_fetch_feed_decodes_videos() {
        let body = serde_json::json!({
            "videos": [{
                "id": "v1",
                "title": "Momentum",
                "topic": "Physics",
                "summary": "p = mv",
                "script": "",
                "keyPoints": ["mass", "velocity"],
                "filepath": "/videos/v1.mp4",
                "duration": 30,
                "thumbnail": null,
                "createdAt": "2024-02-01T09:30:00Z"
            }]
        })
        .to_string();
        let (base, server) = serve_once("200 OK", &body).await;

        let videos = client(&base).fetch_feed(Some("Physics")).await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].key_points, vec!["mass", "velocity"]);

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /api/feed?topic=Physics HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_fetch_feed_without_videos_is_empty() {
        let (base, _server) = serve_once("200 OK", "{}").await;
        let videos = client(&base).fetch_feed(None).await.unwrap();
        assert!(videos.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_network_error() {
        let (base, _server) = serve_once("503 Service Unavailable", "{}").await;
        let err = client(&base).fetch_quiz("v1").await.unwrap_err();
        assert_eq!(err.operation(), FETCH_QUIZ);
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_quiz_posts_without_body() {
        let body = r#"{"videoId":"v1","questions":[{"prompt":"F = ?","choices":["ma","mv"],"answerIndex":0}]}"#;
        let (base, server) = serve_once("200 OK", body).await;

        let quiz = client(&base).fetch_quiz("v1").await.unwrap();
        assert_eq!(quiz.video_id, "v1");

        let head = server.await.unwrap();
        assert!(head.starts_with("POST /api/quiz/v1 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}")).fetch_feed(None).await.unwrap_err();
        assert_eq!(err.operation(), FETCH_FEED);
    }
}
