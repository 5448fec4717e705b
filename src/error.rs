//! PrimeTask 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

use crate::api::ApiError;

/// PrimeTask 错误类型
#[derive(Debug, Error)]
pub enum PrimeTaskError {
    /// I/O 错误（凭据文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 远程 API 调用错误
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON 解析错误
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 无效数据（命令行输入、枚举取值等）
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// PrimeTask Result 类型别名
pub type Result<T> = std::result::Result<T, PrimeTaskError>;

#[allow(dead_code)] // 部分辅助构造方法尚未使用
impl PrimeTaskError {
    /// 创建 Config 错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 创建 InvalidData 错误
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrimeTaskError::config("missing base_url");
        assert_eq!(err.to_string(), "Config error: missing base_url");

        let err = PrimeTaskError::invalid_data("unknown status: done");
        assert_eq!(err.to_string(), "Invalid data: unknown status: done");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PrimeTaskError = io_err.into();
        assert!(matches!(err, PrimeTaskError::Io(_)));
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = ApiError::transport("connection refused");
        let err: PrimeTaskError = api_err.into();
        assert!(err.to_string().contains("connection refused"));
    }
}
