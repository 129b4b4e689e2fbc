// ==========================================
// 门店库存调拨 - API层错误类型
// ==========================================
// 职责: 统一导入/配置/导出错误，原样上报给调用方
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::report::ExportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ApiError {
    /// 是否为缺列错误（调用方可提示用户改列名后重试）
    pub fn is_missing_columns(&self) -> bool {
        matches!(self, ApiError::Import(ImportError::MissingColumns(_)))
    }
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
