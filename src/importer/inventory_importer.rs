// ==========================================
// 门店库存调拨 - 库存导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到 InputRecord
// 流程: 解析（并发） → 合并 → 必需列校验 → 映射/清洗
// ==========================================

use crate::domain::inventory::InputRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::inventory_importer_trait::{
    FieldMapper as FieldMapperTrait, FileParser, InventoryImporter, RawTable,
};
use async_trait::async_trait;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument};

// ==========================================
// InventoryImporterImpl - 库存导入器实现
// ==========================================
pub struct InventoryImporterImpl {
    file_parser: Arc<dyn FileParser>,
    field_mapper: Box<dyn FieldMapperTrait>,
}

impl Default for InventoryImporterImpl {
    fn default() -> Self {
        Self::new(Arc::new(UniversalFileParser), Box::new(FieldMapper::default()))
    }
}

impl InventoryImporterImpl {
    /// 创建新的导入器实例
    ///
    /// # 参数
    /// - file_parser: 文件解析器（跨阻塞任务共享）
    /// - field_mapper: 字段映射器
    pub fn new(file_parser: Arc<dyn FileParser>, field_mapper: Box<dyn FieldMapperTrait>) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }
}

/// 合并表头（并集，保持首次出现顺序）
pub fn merged_headers(tables: &[RawTable]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for table in tables {
        for h in &table.headers {
            if !headers.contains(h) {
                headers.push(h.clone());
            }
        }
    }
    headers
}

#[async_trait]
impl InventoryImporter for InventoryImporterImpl {
    #[instrument(skip(self))]
    async fn load_table(&self, file_path: PathBuf) -> ImportResult<RawTable> {
        let parser = Arc::clone(&self.file_parser);
        let source = file_path.display().to_string();

        // 文件解析为阻塞 I/O，放到阻塞线程池执行
        tokio::task::spawn_blocking(move || parser.parse_to_raw_table(&file_path))
            .await
            .map_err(|e| ImportError::InternalError(format!("解析任务异常 ({}): {}", source, e)))?
    }

    async fn load_tables(&self, file_paths: Vec<PathBuf>) -> ImportResult<Vec<RawTable>> {
        info!(count = file_paths.len(), "开始批量读取文件");

        let tasks = file_paths.into_iter().map(|path| {
            let path_str = path.display().to_string();
            async move {
                let result = self.load_table(path).await;
                match &result {
                    Ok(table) => info!(file = %path_str, rows = table.rows.len(), "文件读取成功"),
                    Err(e) => error!(file = %path_str, error = %e, "文件读取失败"),
                }
                result
            }
        });

        // 并发执行，join_all 保持输入顺序
        let results = join_all(tasks).await;
        results.into_iter().collect()
    }

    fn records_from_tables(&self, tables: &[RawTable]) -> ImportResult<Vec<InputRecord>> {
        if tables.is_empty() {
            info!("无可用数据表，返回空结果");
            return Ok(Vec::new());
        }

        // 必需列校验（合并后一次性执行，先于任何行处理）
        let headers = merged_headers(tables);
        self.field_mapper.check_required_columns(&headers)?;

        let mut records = Vec::with_capacity(tables.iter().map(|t| t.rows.len()).sum());
        for table in tables {
            for row in &table.rows {
                let row_number = records.len() + 1;
                records.push(
                    self.field_mapper
                        .map_to_input_record(row, &table.source, row_number),
                );
            }
        }

        let defaulted = records.iter().filter(|r| r.on_hand.is_defaulted()).count();
        let clamped = records.iter().filter(|r| r.on_hand.is_clamped()).count();
        info!(
            tables = tables.len(),
            records = records.len(),
            defaulted,
            clamped,
            "数据表合并完成"
        );
        Ok(records)
    }
}
