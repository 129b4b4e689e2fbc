// ==========================================
// 门店库存调拨 - 库存导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 合并 → 列校验 → 字段映射（含数量清洗）
// ==========================================

use crate::domain::inventory::InputRecord;
use crate::domain::types::ParsedQty;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ==========================================
// RawTable - 单个数据源解析后的原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// 数据源名称（通常为文件路径）
    pub source: String,
    /// 表头（已 TRIM，保留原顺序）
    pub headers: Vec<String>,
    /// 行记录（列名 → 文本值）
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn new(source: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            source: source.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

// ==========================================
// InventoryImporter Trait
// ==========================================
// 用途: 库存导入主接口
// 实现者: InventoryImporterImpl
#[async_trait]
pub trait InventoryImporter: Send + Sync {
    /// 读取单个文件为原始表
    ///
    /// # 返回
    /// - Ok(RawTable): 解析后的表
    /// - Err(UnreadableInput/FileNotFound/UnsupportedFormat): 该数据源被拒绝
    async fn load_table(&self, file_path: PathBuf) -> ImportResult<RawTable>;

    /// 批量读取多个文件（并发执行，结果保持输入顺序）
    ///
    /// # 说明
    /// - 任一数据源失败即整体失败（结构性错误中止运行）
    async fn load_tables(&self, file_paths: Vec<PathBuf>) -> ImportResult<Vec<RawTable>>;

    /// 合并多张表并映射为输入记录
    ///
    /// # 流程
    /// 1. 空批次 → Ok(空列表)
    /// 2. 合并表头（并集）后校验必需列，缺失 → MissingColumns
    /// 3. 逐行映射（数量强制转换，不报错）
    fn records_from_tables(&self, tables: &[RawTable]) -> ImportResult<Vec<InputRecord>>;

    /// 文件 → 输入记录（load_tables + records_from_tables）
    async fn import_files(&self, file_paths: Vec<PathBuf>) -> ImportResult<Vec<InputRecord>> {
        let tables = self.load_tables(file_paths).await?;
        self.records_from_tables(&tables)
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 校验合并后表头是否包含全部必需列
    ///
    /// # 返回
    /// - Err(MissingColumns): 列出所有缺失列名
    fn check_required_columns(&self, headers: &[String]) -> ImportResult<()>;

    /// 将原始行记录映射为 InputRecord
    ///
    /// # 参数
    /// - row: 原始行记录（缺失列视为空文本）
    /// - source: 数据源名称
    /// - row_number: 合并表中的行号
    fn map_to_input_record(
        &self,
        row: &HashMap<String, String>,
        source: &str,
        row_number: usize,
    ) -> InputRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM）
    fn clean_text(&self, value: &str) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 数量强制转换（非数字/缺失 → Defaulted，负数 → Clamped）
    fn parse_quantity(&self, value: Option<&str>) -> ParsedQty;
}
