mod article_list;
mod cli;
mod config;
mod fetch;
mod loader;
mod models;
mod runtime;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{data_dir, default_config_path, load_config};
use crate::fetch::HttpArticleSource;
use crate::runtime::{Tui, run_app};
use crate::ui::App;

/// 初始化日志，终端被 TUI 占用，日志写入文件
fn init_tracing(log_file: Option<PathBuf>) -> Result<PathBuf> {
    let path = match log_file {
        Some(path) => path,
        None => data_dir()?.join("goodnews.log"),
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(path)
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let log_path = init_tracing(args.log_file.clone())?;
    info!(log = %log_path.display(), "goodnews starting up");

    // 加载配置，命令行参数优先
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = load_config(&config_path)?.apply_cli(&args);
    info!(config = %config_path.display(), base_url = %config.base_url, feed = %config.feed, "Loaded configuration");

    let source = Arc::new(HttpArticleSource::new(
        config.base_url()?,
        config.request_timeout(),
    )?);

    // 创建应用状态
    let mut app = App::new(config.feed, config.placeholder_image.clone());

    // 设置终端
    let mut terminal = setup_terminal()?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, source).await;

    // 恢复终端
    restore_terminal(&mut terminal)?;
    info!(articles = app.articles.len(), "goodnews shutting down");

    result
}
