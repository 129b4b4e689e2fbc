// ==========================================
// 门店库存调拨 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 结构性错误中止整次运行；数据质量问题就地修正，不在此处
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    /// 回退编码后仍无法解析为表格
    #[error("无法读取数据源 {source_name}: {message}")]
    UnreadableInput {
        source_name: String,
        message: String,
    },

    // ===== 结构错误 =====
    /// 合并后的表缺少必需列
    #[error("缺少必需列: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ImportError {
    pub fn unreadable(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ImportError::UnreadableInput {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
