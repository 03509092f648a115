//! 通用 UI 组件
//!
//! 文章条目、提示框等

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListItem, Paragraph, Wrap},
};

use crate::article_list::RenderedItem;

/// [组件] 单篇文章条目：标题链接、链接地址、配图地址
pub fn article_list_item(index: usize, item: &RenderedItem, zoomed: bool) -> ListItem<'_> {
    let title_style = if zoomed {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    };
    let title = if item.title.is_empty() {
        "(无标题)"
    } else {
        item.title.as_str()
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(format!("{:>3}. ", index + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(title, title_style),
        ]),
        Line::from(vec![
            Span::raw("     🔗 "),
            Span::styled(item.link.as_str(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::raw("     🖼  "),
            Span::styled(item.image.as_str(), Style::default().fg(Color::Gray)),
        ]),
    ])
}

/// [组件] 居中提示框
pub fn render_notice(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    frame.render_widget(Clear, area);
    let notice = Paragraph::new(message)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(notice, area);
}
