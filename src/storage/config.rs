//! 客户端配置持久化
//!
//! `~/.primetask/config.toml`：API 地址与超时设置。文件缺失或损坏时回退到
//! 默认值，不报错。

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use super::{ensure_primetask_dir, primetask_dir};

/// 默认 API 地址（本地开发服务器）
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// 默认请求超时（秒）
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// 远程 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API 基础地址 (e.g., "https://api.primetask.app")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 单个请求的超时时间（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 获取配置文件路径
fn config_path() -> PathBuf {
    primetask_dir().join("config.toml")
}

/// 加载配置（不存在则返回默认值）
///
/// `PRIMETASK_API_URL` 环境变量优先于配置文件。
pub fn load_config() -> Config {
    let path = config_path();
    let mut config = if path.exists() {
        fs::read_to_string(&path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    } else {
        Config::default()
    };

    if let Ok(url) = std::env::var("PRIMETASK_API_URL") {
        if !url.is_empty() {
            config.api.base_url = url;
        }
    }

    config
}

/// 保存配置
pub fn save_config(config: &Config) -> io::Result<()> {
    ensure_primetask_dir()?;

    let path = config_path();
    let content = toml::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, content)
}
