//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含 dispatch 逻辑与加载结果的应用

use tracing::debug;

use super::actions::Action;
use super::state::{App, LoadState};
use crate::article_list::FocusShift;
use crate::loader::FetchOutcome;
use crate::models::Feed;

/// dispatch 之后主循环需要做的事
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    Fetch(Feed),
}

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> Flow {
        match action {
            Action::Quit => return Flow::Quit,
            Action::FocusPrevious => self.shift_focus(FocusShift::Previous),
            Action::FocusNext => self.shift_focus(FocusShift::Next),
            Action::Reload => return Flow::Fetch(self.feed),
            Action::ToggleFeed => {
                self.feed = self.feed.toggled();
                self.articles.clear();
                return Flow::Fetch(self.feed);
            }
        }
        Flow::Continue
    }

    // ============ 导航相关 ============

    /// 左右移动放大的文章，到达两端时保持不动
    pub fn shift_focus(&mut self, shift: FocusShift) {
        if self.articles.shift_focus(shift) {
            debug!(index = ?self.articles.focused_index(), "Focus moved");
        }
    }

    // ============ 加载相关 ============

    /// 开始一次新的加载，返回本次加载的代数
    pub fn begin_fetch(&mut self, feed: Feed) -> u64 {
        self.generation += 1;
        self.feed = feed;
        self.load_state = LoadState::Loading(feed);
        self.generation
    }

    /// 应用加载结果，过期结果直接丢弃
    ///
    /// 返回结果是否被采用。
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "Ignoring stale fetch outcome"
            );
            return false;
        }

        match outcome.result {
            Ok(records) => {
                self.articles.render(&records);
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                debug!(feed = %outcome.feed, "Article list left empty after failed load");
                self.articles.clear();
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
        true
    }
}
