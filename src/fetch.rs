//! 文章数据源
//!
//! 视图只依赖 [`ArticleSource`]，HTTP 实现见 [`HttpArticleSource`]。

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::models::{ArticleRecord, Feed};

/// 拉取文章失败的原因
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {status}")]
    Status { status: u16 },

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("response is not valid article JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected a JSON array of articles, got {found}")]
    NotAnArray { found: &'static str },
}

/// 文章数据源
pub trait ArticleSource: Send + Sync + 'static {
    fn fetch(
        &self,
        feed: Feed,
    ) -> impl Future<Output = Result<Vec<ArticleRecord>, FetchError>> + Send;
}

/// 通过 HTTP GET 拉取 JSON 数组
#[derive(Debug, Clone)]
pub struct HttpArticleSource {
    client: Client,
    base_url: Url,
}

impl HttpArticleSource {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// 某个列表的完整地址
    pub fn endpoint(&self, feed: Feed) -> Result<Url, FetchError> {
        Ok(self.base_url.join(feed.path())?)
    }
}

impl ArticleSource for HttpArticleSource {
    #[instrument(level = "info", skip(self), fields(%feed))]
    async fn fetch(&self, feed: Feed) -> Result<Vec<ArticleRecord>, FetchError> {
        let endpoint = self.endpoint(feed)?;
        debug!(%endpoint, "Requesting articles");

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        if !(200..400).contains(&status.as_u16()) {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Received article payload");
        parse_articles(&body)
    }
}

/// 解析响应体，顶层必须是数组；任一元素不合法则整体失败
pub fn parse_articles(body: &str) -> Result<Vec<ArticleRecord>, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => Err(FetchError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 启动一个只应答一次的本地 HTTP 服务，返回其地址
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn source(base_url: Url) -> HttpArticleSource {
        HttpArticleSource::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_array() {
        let records = parse_articles(
            r#"[{"title":"A","url":"/a"},{"title":"B","url":"/b","imageUrl":"/b.png"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].image(), Some("/b.png"));
    }

    #[test]
    fn test_parse_object_is_shape_mismatch() {
        let err = parse_articles(r#"{"title":"A","url":"/a"}"#).unwrap_err();
        assert!(matches!(err, FetchError::NotAnArray { found: "an object" }));
        assert!(err.to_string().contains("expected a JSON array"));
    }

    #[test]
    fn test_parse_rejects_malformed_element() {
        let err = parse_articles(r#"[{"title":"A","url":"/a"}, 7]"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(
            parse_articles("<html>oops</html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_endpoint_is_relative_to_base() {
        let src = source(Url::parse("http://news.local/app/").unwrap());
        assert_eq!(
            src.endpoint(Feed::Good).unwrap().as_str(),
            "http://news.local/app/goodnewsjson"
        );
        assert_eq!(
            src.endpoint(Feed::Bad).unwrap().as_str(),
            "http://news.local/app/badnewsjson"
        );
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let base = serve_once("200 OK", r#"[{"title":"A","url":"/a"}]"#).await;
        let records = source(base).fetch(Feed::Good).await.unwrap();
        assert_eq!(records, vec![ArticleRecord::new("A", "/a")]);
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let base = serve_once("500 Internal Server Error", "boom").await;
        let err = source(base).fetch(Feed::Good).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_object_payload() {
        let base = serve_once("200 OK", r#"{"error":"no articles"}"#).await;
        let err = source(base).fetch(Feed::Bad).await.unwrap_err();
        assert!(matches!(err, FetchError::NotAnArray { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let err = source(base).fetch(Feed::Good).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
