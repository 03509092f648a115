//! 可取消的后台加载任务
//!
//! 任务与发起它的视图绑定：`FetchTask` 被丢弃时任务随之中止，
//! 迟到的结果也会因代数不匹配而被忽略。

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::fetch::{ArticleSource, FetchError};
use crate::models::{ArticleRecord, Feed};

/// 一次加载的结果
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub feed: Feed,
    pub result: Result<Vec<ArticleRecord>, FetchError>,
}

/// 正在进行的加载任务
#[derive(Debug)]
pub struct FetchTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl FetchTask {
    pub fn spawn<S: ArticleSource>(
        source: Arc<S>,
        feed: Feed,
        generation: u64,
        sender: mpsc::UnboundedSender<FetchOutcome>,
    ) -> Self {
        info!(%feed, generation, "Fetching articles");
        let handle = tokio::spawn(async move {
            let result = source.fetch(feed).await;
            match &result {
                Ok(records) => info!(%feed, count = records.len(), "Articles received"),
                Err(e) => error!(%feed, error = %e, "Failed to load articles"),
            }
            // 接收端已关闭说明视图已销毁
            let _ = sender.send(FetchOutcome {
                generation,
                feed,
                result,
            });
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for FetchTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::fetch::parse_articles;
    use crate::models::PLACEHOLDER_IMAGE;
    use crate::ui::App;

    struct StaticSource(Vec<ArticleRecord>);

    impl ArticleSource for StaticSource {
        fn fetch(
            &self,
            _feed: Feed,
        ) -> impl Future<Output = Result<Vec<ArticleRecord>, FetchError>> + Send {
            let records = self.0.clone();
            async move { Ok(records) }
        }
    }

    struct NeverSource;

    impl ArticleSource for NeverSource {
        fn fetch(
            &self,
            _feed: Feed,
        ) -> impl Future<Output = Result<Vec<ArticleRecord>, FetchError>> + Send {
            std::future::pending()
        }
    }

    /// 返回固定错误：`status` 非空时模拟服务端错误，否则解析 `body`
    struct FailingSource {
        status: Option<u16>,
        body: &'static str,
    }

    impl ArticleSource for FailingSource {
        fn fetch(
            &self,
            _feed: Feed,
        ) -> impl Future<Output = Result<Vec<ArticleRecord>, FetchError>> + Send {
            let result = match self.status {
                Some(status) => Err(FetchError::Status { status }),
                None => parse_articles(self.body),
            };
            async move { result }
        }
    }

    /// 收集日志输出
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// 走完整的加载流程，返回应用状态与 WARN 及以上级别的日志行
    async fn load_failing(source: FailingSource) -> (App, Vec<String>) {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut app = App::new(Feed::Good, PLACEHOLDER_IMAGE);
        let generation = app.begin_fetch(Feed::Good);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = FetchTask::spawn(Arc::new(source), Feed::Good, generation, tx);
        let outcome = rx.recv().await.unwrap();
        assert!(app.apply_outcome(outcome));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let lines = output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        (app, lines)
    }

    #[tokio::test]
    async fn test_server_error_logs_once() {
        let (app, lines) = load_failing(FailingSource {
            status: Some(500),
            body: "",
        })
        .await;

        assert!(app.articles.is_empty());
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("status 500"));
    }

    #[tokio::test]
    async fn test_object_payload_logs_shape_mismatch_once() {
        let (app, lines) = load_failing(FailingSource {
            status: None,
            body: r#"{"title":"A","url":"/a"}"#,
        })
        .await;

        assert!(app.articles.is_empty());
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert!(lines[0].contains("expected a JSON array"));
    }

    #[tokio::test]
    async fn test_outcome_carries_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let source = Arc::new(StaticSource(vec![ArticleRecord::new("A", "/a")]));
        let task = FetchTask::spawn(source, Feed::Bad, 7, tx);
        assert_eq!(task.generation(), 7);

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.generation, 7);
        assert_eq!(outcome.feed, Feed::Bad);
        assert_eq!(outcome.result.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = FetchTask::spawn(Arc::new(NeverSource), Feed::Good, 1, tx);
        drop(task);

        // 任务中止后发送端被释放，通道关闭
        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(closed, Ok(None)));
    }
}
