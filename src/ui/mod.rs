//! UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): App 结构体，持有文章列表视图与加载状态
//! - View (view/): 纯函数，将 State 映射为终端画面
//! - Intent (actions.rs): 按键转化为明确的语义化 Action

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

// Re-export for convenience
pub use input::handle_key_event;
pub use logic::Flow;
pub use state::App;
pub use view::render;
