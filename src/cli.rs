//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

use crate::models::Feed;

/// 终端新闻阅读器：拉取文章列表，左右方向键切换放大的文章
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// 配置文件路径（默认 ~/.config/goodnews/config.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 新闻服务地址，覆盖配置文件
    #[arg(short, long, env = "GOODNEWS_BASE_URL")]
    pub base_url: Option<String>,

    /// 启动时加载的列表：good 或 bad
    #[arg(short, long)]
    pub feed: Option<Feed>,

    /// 日志文件路径（默认写入数据目录）
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
