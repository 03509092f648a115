//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusPrevious, // ←
    FocusNext,     // →

    Reload,
    ToggleFeed,
}
