// ==========================================
// 门店库存调拨 - 调拨建议 API
// ==========================================
// 职责: 组合 导入层 / 引擎层 / 报表层，对外提供一次性调用
// 策略: 结构性错误中止整次运行，不返回部分结果；不做内部重试
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::RebalanceParams;
use crate::domain::inventory::{InputRecord, RebalanceReport};
use crate::engine::RebalanceOrchestrator;
use crate::importer::{InventoryImporter, InventoryImporterImpl, RawTable};
use crate::report;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct RebalanceApi {
    importer: Arc<dyn InventoryImporter>,
}

impl Default for RebalanceApi {
    fn default() -> Self {
        Self::new(Arc::new(InventoryImporterImpl::default()))
    }
}

impl RebalanceApi {
    pub fn new(importer: Arc<dyn InventoryImporter>) -> Self {
        Self { importer }
    }

    /// 文件 → 调拨报告
    ///
    /// # 错误
    /// - Config: 参数非法
    /// - Import: 文件不可读 / 缺少必需列
    #[instrument(skip(self, file_paths), fields(files = file_paths.len()))]
    pub async fn rebalance_files(
        &self,
        file_paths: Vec<PathBuf>,
        params: RebalanceParams,
    ) -> ApiResult<RebalanceReport> {
        // 参数先于读文件校验
        let engine = RebalanceOrchestrator::new(params)?;
        let records = self.importer.import_files(file_paths).await?;
        Ok(engine.run(&records))
    }

    /// 已解析的表 → 调拨报告（上传内容已在内存中时使用）
    pub fn rebalance_tables(
        &self,
        tables: &[RawTable],
        params: RebalanceParams,
    ) -> ApiResult<RebalanceReport> {
        let engine = RebalanceOrchestrator::new(params)?;
        let records = self.importer.records_from_tables(tables)?;
        Ok(engine.run(&records))
    }

    /// 输入记录 → 调拨报告
    pub fn rebalance_records(
        &self,
        records: &[InputRecord],
        params: RebalanceParams,
    ) -> ApiResult<RebalanceReport> {
        let engine = RebalanceOrchestrator::new(params)?;
        Ok(engine.run(records))
    }

    /// 导出报告到目录
    pub fn export(&self, report: &RebalanceReport, dir: &Path) -> ApiResult<Vec<PathBuf>> {
        if dir.as_os_str().is_empty() {
            return Err(ApiError::InvalidInput("输出目录为空".to_string()));
        }
        let written = report::write_report(dir, report, Utc::now())?;
        info!(files = written.len(), "报告已导出");
        Ok(written)
    }
}
