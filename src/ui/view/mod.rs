//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, LoadState};
use components::{article_list_item, render_notice};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(6),    // 文章列表
            Constraint::Length(6), // 详情
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_articles(frame, app, chunks[1]);
    render_details(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    if let LoadState::Loading(feed) = &app.load_state {
        let area = centered_rect(40, 30, chunks[1]);
        render_notice(
            frame,
            area,
            "加载中",
            &format!("正在获取{}…", feed.label()),
            Color::Yellow,
        );
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(format!("📰 新闻速览 · {}", app.feed.label()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_articles(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .articles
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| article_list_item(i, item, app.articles.is_focused(i)))
        .collect();

    let list = List::new(items)
        .block(Block::default().title("文章列表").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    // 列表随放大条目滚动
    let mut state = ListState::default();
    state.select(app.articles.focused_index());

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(item) = app.focused_article() {
        format!(
            "标题: {}\n作者: {}  发布于: {}  情感: {}\n{}",
            item.title,
            item.author.as_deref().unwrap_or("(未知)"),
            item.published
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "(未知)".to_string()),
            item.polarity
                .map(|p| format!("{p:+.2}"))
                .unwrap_or_else(|| "-".to_string()),
            item.description.as_deref().unwrap_or(""),
        )
    } else {
        "暂无文章".to_string()
    };

    let details = Paragraph::new(content)
        .block(Block::default().title("详情").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(details, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = "[←/→] 切换文章  [r] 刷新  [Tab] 好/坏消息  [q] 退出";
    let position = match app.articles.focused_index() {
        Some(i) => format!("{}/{}", i + 1, app.articles.len()),
        None => "0/0".to_string(),
    };

    let help = Paragraph::new(format!("{}  |  {}", help_text, position))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}
