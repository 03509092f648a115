//! 文章列表视图状态
//!
//! 每条记录对应一个渲染条目，索引即身份；
//! 同一时刻至多一个条目处于聚焦（放大）状态。

use chrono::NaiveDateTime;

use crate::models::ArticleRecord;

/// 焦点移动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusShift {
    Previous,
    Next,
}

impl FocusShift {
    pub fn offset(self) -> isize {
        match self {
            FocusShift::Previous => -1,
            FocusShift::Next => 1,
        }
    }
}

/// 渲染后的条目
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem {
    pub title: String,
    pub link: String,
    pub image: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub published: Option<NaiveDateTime>,
    pub polarity: Option<f64>,
}

impl RenderedItem {
    fn from_record(record: &ArticleRecord, placeholder: &str) -> Self {
        Self {
            title: record.title.clone(),
            link: record.url.clone(),
            image: record.image().unwrap_or(placeholder).to_string(),
            author: record.author.clone().filter(|a| !a.trim().is_empty()),
            description: record.description.clone().filter(|d| !d.trim().is_empty()),
            published: record.published(),
            polarity: record.polarity,
        }
    }
}

/// 文章列表视图
#[derive(Debug, Clone)]
pub struct ArticleListView {
    items: Vec<RenderedItem>,
    focused_index: Option<usize>,
    placeholder: String,
}

impl ArticleListView {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            focused_index: None,
            placeholder: placeholder.into(),
        }
    }

    /// 渲染文章序列，替换已有条目，非空时聚焦第一个
    pub fn render(&mut self, records: &[ArticleRecord]) {
        self.items.clear();
        self.items.extend(
            records
                .iter()
                .map(|record| RenderedItem::from_record(record, &self.placeholder)),
        );
        self.focused_index = if self.is_empty() { None } else { Some(0) };
    }

    /// 清空条目与焦点
    pub fn clear(&mut self) {
        self.items.clear();
        self.focused_index = None;
    }

    /// 按方向移动焦点，越界或无焦点时不做任何改变
    ///
    /// 返回焦点是否发生了移动。
    pub fn shift_focus(&mut self, shift: FocusShift) -> bool {
        let Some(current) = self.focused_index else {
            return false;
        };
        match current.checked_add_signed(shift.offset()) {
            Some(next) if next < self.items.len() => {
                self.focused_index = Some(next);
                true
            }
            _ => false,
        }
    }

    pub fn items(&self) -> &[RenderedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    pub fn focused_item(&self) -> Option<&RenderedItem> {
        self.focused_index.and_then(|i| self.items.get(i))
    }

    pub fn is_focused(&self, index: usize) -> bool {
        self.focused_index == Some(index)
    }
}
