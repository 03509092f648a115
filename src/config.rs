use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::cli::Cli;
use crate::models::{Feed, PLACEHOLDER_IMAGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid base url `{value}`: {source}")]
    BaseUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("unable to determine user {0} directory")]
    NoDir(&'static str),
}

/// TOML 配置文件结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub feed: Feed,
    pub placeholder_image: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".to_string(),
            feed: Feed::Good,
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// 命令行参数覆盖配置文件
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(feed) = cli.feed {
            self.feed = feed;
        }
        self
    }

    /// 服务地址，末尾补 `/` 以便拼接相对路径
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut value = self.base_url.trim().to_string();
        if !value.ends_with('/') {
            value.push('/');
        }
        Url::parse(&value).map_err(|source| ConfigError::BaseUrl {
            value: self.base_url.clone(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// 配置文件默认路径 (~/.config/goodnews/config.toml)
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::NoDir("config"))?
        .join("goodnews")
        .join("config.toml"))
}

/// 数据目录路径 (~/.local/share/goodnews/)，日志写在这里
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = dirs::data_dir()
        .ok_or(ConfigError::NoDir("data"))?
        .join("goodnews");
    fs::create_dir_all(&dir).map_err(|source| ConfigError::Read {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
