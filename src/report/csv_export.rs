// ==========================================
// 门店库存调拨 - 报表导出
// ==========================================
// 输出: 建议表 CSV / 调拨表 CSV（有调拨时）/ 运行汇总 JSON / Excel 工作簿
// 命名: branch_transfer_report_<UTC 时间戳>
// ==========================================

use crate::domain::inventory::{RebalanceReport, SUGGESTION_COLUMNS, TRANSFER_COLUMNS};
use crate::report::xlsx_export::write_workbook;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const REPORT_PREFIX: &str = "branch_transfer_report";

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 写入失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel 写入失败: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// 报表文件基础名（不含扩展名）
pub fn report_base_name(timestamp: DateTime<Utc>) -> String {
    format!("{}_{}", REPORT_PREFIX, timestamp.format("%Y%m%dT%H%M%SZ"))
}

/// 写出表格为 CSV；空表也写表头
pub fn write_table<W, T>(writer: W, header: &[&str], rows: &[T]) -> ExportResult<()>
where
    W: Write,
    T: Serialize,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(!rows.is_empty())
        .from_writer(writer);

    if rows.is_empty() {
        csv_writer.write_record(header)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 导出完整报表
///
/// # 返回
/// - 实际写出的文件路径（建议表、调拨表（可选）、汇总、工作簿）
pub fn write_report(
    dir: &Path,
    report: &RebalanceReport,
    timestamp: DateTime<Utc>,
) -> ExportResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let base = report_base_name(timestamp);
    let mut written = Vec::new();

    let suggestions_path = dir.join(format!("{}.csv", base));
    write_table(
        BufWriter::new(File::create(&suggestions_path)?),
        &SUGGESTION_COLUMNS,
        &report.suggestions,
    )?;
    written.push(suggestions_path);

    if !report.transfers.is_empty() {
        let transfers_path = dir.join(format!("{}_transfers.csv", base));
        write_table(
            BufWriter::new(File::create(&transfers_path)?),
            &TRANSFER_COLUMNS,
            &report.transfers,
        )?;
        written.push(transfers_path);
    }

    let summary_path = dir.join(format!("{}_summary.json", base));
    let mut summary_writer = BufWriter::new(File::create(&summary_path)?);
    serde_json::to_writer_pretty(&mut summary_writer, &report.summary)?;
    summary_writer.flush()?;
    written.push(summary_path);

    let workbook_path = dir.join(format!("{}.xlsx", base));
    write_workbook(&workbook_path, report)?;
    written.push(workbook_path);

    info!(dir = %dir.display(), files = written.len(), "报表导出完成");
    Ok(written)
}
