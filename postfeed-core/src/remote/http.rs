//! HTTP remote source.
//!
//! Fetches `GET {base_url}/posts` and decodes a JSON array of post records.
//! A `null` body is treated as an empty feed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use super::{NetworkError, RemoteSource};
use crate::models::PostRecord;

/// Default request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpRemoteSource {
    client: reqwest::Client,
    posts_url: Url,
}

impl HttpRemoteSource {
    /// Creates a source for the server at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NetworkError> {
        let posts_url = Self::build_posts_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        Ok(Self { client, posts_url })
    }

    pub fn posts_url(&self) -> &str {
        self.posts_url.as_str()
    }

    fn build_posts_url(base_url: &str) -> Result<Url, NetworkError> {
        let joined = format!("{}/posts", base_url.trim_end_matches('/'));
        let url = Url::parse(&joined).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(NetworkError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                other
            ))),
        }
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_all(&self) -> Result<Vec<PostRecord>, NetworkError> {
        tracing::debug!("Fetching posts from {}", self.posts_url);

        let response = self
            .client
            .get(self.posts_url.clone())
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status(status.as_u16()));
        }

        let body: Option<Vec<PostRecord>> = response
            .json()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))?;

        let records = body.unwrap_or_default();
        tracing::debug!("Fetched {} post(s)", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_posts_url_joins_base() {
        let source = HttpRemoteSource::new("http://example.com/api/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(source.posts_url(), "http://example.com/api/posts");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpRemoteSource::new("not a url", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrl(_)));

        let err = HttpRemoteSource::new("ftp://example.com", DEFAULT_TIMEOUT).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[tokio::test]
    async fn test_fetch_all_decodes_records() {
        let app = Router::new().route(
            "/posts",
            get(|| async {
                Json(json!([
                    {"id": 1, "userId": 10, "title": "First", "viewCount": 4, "favorite": true},
                    {"id": 2, "userId": 11, "title": "Second"}
                ]))
            }),
        );
        let base = serve(app).await;

        let source = HttpRemoteSource::new(&base, DEFAULT_TIMEOUT).unwrap();
        let records = source.fetch_all().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], PostRecord::new(1, 10, "First").with_view_count(4).with_favorite(true));
        assert_eq!(records[1], PostRecord::new(2, 11, "Second"));
    }

    #[tokio::test]
    async fn test_fetch_all_null_body_is_empty() {
        let app = Router::new().route("/posts", get(|| async { Json(serde_json::Value::Null) }));
        let base = serve(app).await;

        let source = HttpRemoteSource::new(&base, DEFAULT_TIMEOUT).unwrap();
        assert!(source.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_error_status() {
        let app = Router::new().route(
            "/posts",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = serve(app).await;

        let source = HttpRemoteSource::new(&base, DEFAULT_TIMEOUT).unwrap();
        let err = source.fetch_all().await.unwrap_err();
        assert_eq!(err, NetworkError::Status(503));
    }

    #[tokio::test]
    async fn test_fetch_all_bad_body() {
        let app = Router::new().route("/posts", get(|| async { "definitely not json" }));
        let base = serve(app).await;

        let source = HttpRemoteSource::new(&base, DEFAULT_TIMEOUT).unwrap();
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, NetworkError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_unreachable_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            HttpRemoteSource::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, NetworkError::Request(_)));
    }
}
