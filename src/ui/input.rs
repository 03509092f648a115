//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action，未识别的按键一律忽略

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::Action;
use super::logic::Flow;
use super::state::App;

/// 根据按键获取对应的 Action
pub fn get_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::FocusPrevious),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::FocusNext),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Tab => Some(Action::ToggleFeed),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Flow {
    match get_action(key) {
        Some(action) => app.dispatch(action),
        None => Flow::Continue,
    }
}
