// ==========================================
// 门店库存调拨 - 配置模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置值非法 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件解析失败: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
