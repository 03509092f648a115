//! 主循环
//!
//! 单线程事件循环：终端事件与加载结果通过 `tokio::select!` 交替处理，
//! 二者永远不会并发修改 App。

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::fetch::ArticleSource;
use crate::loader::{FetchOutcome, FetchTask};
use crate::models::Feed;
use crate::ui::{self, App, Flow, render};

/// 终端句柄
pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// 发起加载；旧任务随赋值被丢弃并中止
fn start_fetch<S: ArticleSource>(
    app: &mut App,
    source: &Arc<S>,
    feed: Feed,
    sender: &mpsc::UnboundedSender<FetchOutcome>,
    task: &mut Option<FetchTask>,
) {
    let generation = app.begin_fetch(feed);
    *task = Some(FetchTask::spawn(
        Arc::clone(source),
        feed,
        generation,
        sender.clone(),
    ));
}

pub async fn run_app<S: ArticleSource>(terminal: &mut Tui, app: &mut App, source: Arc<S>) -> Result<()> {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let mut events = EventStream::new();
    let mut task: Option<FetchTask> = None;

    // 启动时立即请求文章列表
    let feed = app.feed;
    start_fetch(app, &source, feed, &sender, &mut task);

    loop {
        terminal.draw(|f| render(f, app)).context("failed to draw frame")?;

        tokio::select! {
            Some(outcome) = receiver.recv() => {
                if app.apply_outcome(outcome) {
                    task = None;
                }
            }
            maybe_event = events.next() => {
                let event = match maybe_event {
                    Some(Ok(event)) => event,
                    Some(Err(e)) => return Err(e).context("failed to read terminal event"),
                    None => {
                        warn!("Terminal event stream closed");
                        break;
                    }
                };
                let Event::Key(key) = event else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match ui::handle_key_event(app, key) {
                    Flow::Continue => {}
                    Flow::Quit => break,
                    Flow::Fetch(feed) => {
                        debug!(%feed, "Refetch requested");
                        start_fetch(app, &source, feed, &sender, &mut task);
                    }
                }
            }
        }
    }

    if let Some(task) = task.take() {
        info!(generation = task.generation(), "Cancelling in-flight fetch");
    }
    Ok(())
}
