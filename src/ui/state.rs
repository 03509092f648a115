//! App 状态定义 (Model)
//!
//! 页面生命周期内唯一的状态对象，启动时创建，不依赖任何全局变量

use crate::article_list::{ArticleListView, RenderedItem};
use crate::models::Feed;

/// 应用状态
pub struct App {
    pub articles: ArticleListView,
    pub feed: Feed,
    pub load_state: LoadState,
    /// 最近一次发起加载的代数，用于丢弃过期结果
    pub generation: u64,
}

/// 加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading(Feed),
    Loaded,
    Failed(String),
}

impl App {
    /// 创建新的应用实例
    pub fn new(feed: Feed, placeholder: impl Into<String>) -> Self {
        Self {
            articles: ArticleListView::new(placeholder),
            feed,
            load_state: LoadState::Idle,
            generation: 0,
        }
    }

    /// 获取当前放大的文章
    pub fn focused_article(&self) -> Option<&RenderedItem> {
        self.articles.focused_item()
    }
}
